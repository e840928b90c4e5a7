use crate::{ApiResult, EventInfo, EventType, QueryParameters, SdkEventHandler};
use appsign_core::Result;
use log::{debug, warn};
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;

/// EventDispatcher routes events to the handler registered for their type.
#[derive(Clone, Default)]
pub struct EventDispatcher {
    handlers: HashMap<EventType, Arc<dyn SdkEventHandler>>,
}

impl EventDispatcher {
    /// Create a dispatcher without handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `event_type`, replacing any previous one.
    pub fn with_handler(mut self, event_type: EventType, handler: impl SdkEventHandler) -> Self {
        self.handlers.insert(event_type, Arc::new(handler));
        self
    }

    /// Whether a handler is registered for `event_type`.
    pub fn supports(&self, event_type: &EventType) -> bool {
        self.handlers.contains_key(event_type)
    }

    /// Dispatch `event` to its handler.
    ///
    /// Events without a registered handler are answered with an unsuccessful
    /// [`ApiResult`]. Errors from the handler itself are returned as is.
    pub fn dispatch(
        &self,
        consumer_key: &str,
        event: &EventInfo,
        query_parameters: &QueryParameters,
    ) -> Result<ApiResult> {
        let Some(handler) = self.handlers.get(&event.event_type) else {
            warn!("no handler registered for event type {}", event.event_type);
            return Ok(ApiResult::failure(format!(
                "Unsupported event type {}",
                event.event_type
            )));
        };

        debug!("dispatching {} event to {handler:?}", event.event_type);
        handler.handle(consumer_key, event, query_parameters)
    }
}

impl Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("event_types", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}
