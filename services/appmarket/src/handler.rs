use crate::{EventInfo, QueryParameters};
use appsign_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Debug};
use std::marker::PhantomData;

/// ApiResult is the answer returned to the AppMarket once an event is handled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResult {
    /// Whether the event was handled successfully.
    pub success: bool,
    /// Human readable detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ApiResult {
    /// A successful result with a message.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
        }
    }

    /// An unsuccessful result with a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// EventParser turns a raw [`EventInfo`] into a rich event.
pub trait EventParser<T>: Send + Sync + 'static {
    /// Parse `event` received with `consumer_key` and `query_parameters`.
    fn parse(
        &self,
        consumer_key: &str,
        event: &EventInfo,
        query_parameters: &QueryParameters,
    ) -> Result<T>;
}

/// EventHandler is implemented by applications to react to rich events.
pub trait EventHandler<T>: Send + Sync + 'static {
    /// Handle a parsed event.
    fn handle(&self, event: T) -> ApiResult;
}

impl<T, F> EventHandler<T> for F
where
    F: Fn(T) -> ApiResult + Send + Sync + 'static,
{
    fn handle(&self, event: T) -> ApiResult {
        self(event)
    }
}

/// SdkEventHandler handles raw events whatever their rich type.
pub trait SdkEventHandler: Debug + Send + Sync + 'static {
    /// Handle `event` received with `consumer_key` and `query_parameters`.
    fn handle(
        &self,
        consumer_key: &str,
        event: &EventInfo,
        query_parameters: &QueryParameters,
    ) -> Result<ApiResult>;
}

/// ParseAndHandle parses a raw event into `T` and hands it to an [`EventHandler`].
pub struct ParseAndHandle<T> {
    parser: Box<dyn EventParser<T>>,
    handler: Box<dyn EventHandler<T>>,
    _event: PhantomData<fn() -> T>,
}

impl<T: 'static> ParseAndHandle<T> {
    /// Create a new ParseAndHandle.
    pub fn new(parser: impl EventParser<T>, handler: impl EventHandler<T>) -> Self {
        Self {
            parser: Box::new(parser),
            handler: Box::new(handler),
            _event: PhantomData,
        }
    }
}

impl<T> Debug for ParseAndHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseAndHandle")
            .field("event", &std::any::type_name::<T>())
            .finish_non_exhaustive()
    }
}

impl<T: 'static> SdkEventHandler for ParseAndHandle<T> {
    fn handle(
        &self,
        consumer_key: &str,
        event: &EventInfo,
        query_parameters: &QueryParameters,
    ) -> Result<ApiResult> {
        let parsed = self
            .parser
            .parse(consumer_key, event, query_parameters)
            .map_err(|err| {
                Error::request_invalid(format!("failed to parse {} event", event.event_type))
                    .with_source(err)
            })?;
        Ok(self.handler.handle(parsed))
    }
}
