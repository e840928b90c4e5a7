use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// Query parameters of the callback that delivered an event.
///
/// A parameter may appear several times, so each name maps to all of its values.
pub type QueryParameters = HashMap<String, Vec<String>>;

/// Lifecycle event types sent by the AppMarket.
///
/// Types this crate does not know are kept verbatim in [`EventType::Unknown`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    /// A new subscription was purchased.
    SubscriptionOrder,
    /// An existing subscription was upgraded, downgraded or otherwise edited.
    SubscriptionChange,
    /// A subscription was cancelled.
    SubscriptionCancel,
    /// A status notice about a subscription, such as a suspension.
    SubscriptionNotice,
    /// A user was assigned to a subscription.
    UserAssignment,
    /// A user was removed from a subscription.
    UserUnassignment,
    /// Any other event type.
    Unknown(String),
}

impl EventType {
    /// The wire name of this event type.
    pub fn as_str(&self) -> &str {
        match self {
            EventType::SubscriptionOrder => "SUBSCRIPTION_ORDER",
            EventType::SubscriptionChange => "SUBSCRIPTION_CHANGE",
            EventType::SubscriptionCancel => "SUBSCRIPTION_CANCEL",
            EventType::SubscriptionNotice => "SUBSCRIPTION_NOTICE",
            EventType::UserAssignment => "USER_ASSIGNMENT",
            EventType::UserUnassignment => "USER_UNASSIGNMENT",
            EventType::Unknown(v) => v,
        }
    }
}

impl From<String> for EventType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "SUBSCRIPTION_ORDER" => EventType::SubscriptionOrder,
            "SUBSCRIPTION_CHANGE" => EventType::SubscriptionChange,
            "SUBSCRIPTION_CANCEL" => EventType::SubscriptionCancel,
            "SUBSCRIPTION_NOTICE" => EventType::SubscriptionNotice,
            "USER_ASSIGNMENT" => EventType::UserAssignment,
            "USER_UNASSIGNMENT" => EventType::UserUnassignment,
            _ => EventType::Unknown(value),
        }
    }
}

impl From<&str> for EventType {
    fn from(value: &str) -> Self {
        EventType::from(value.to_string())
    }
}

impl From<EventType> for String {
    fn from(value: EventType) -> Self {
        match value {
            EventType::Unknown(v) => v,
            v => v.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flags marking events that must not change production state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventFlag {
    /// The event is a ping and must not be persisted.
    Stateless,
    /// The event was sent from a development marketplace.
    Development,
}

/// The marketplace an event originates from.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Marketplace {
    /// Partner code of the marketplace.
    #[serde(default)]
    pub partner: String,
    /// Base URL of the marketplace API.
    #[serde(default)]
    pub base_url: Option<String>,
}

/// EventInfo is the raw envelope of an event fetched from the AppMarket.
///
/// The payload has no fixed schema here and is kept as a JSON value, the
/// [`EventParser`](crate::EventParser) registered for the event type gives it meaning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventInfo {
    /// The event type.
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Optional flag of this event.
    #[serde(default)]
    pub flag: Option<EventFlag>,
    /// The marketplace that sent this event.
    #[serde(default)]
    pub marketplace: Marketplace,
    /// The user that triggered the event.
    #[serde(default)]
    pub creator: Value,
    /// The event payload.
    #[serde(default)]
    pub payload: Value,
}

impl EventInfo {
    /// Parse an event envelope from its JSON representation.
    pub fn from_json(bs: &[u8]) -> appsign_core::Result<Self> {
        serde_json::from_slice(bs).map_err(|e| {
            appsign_core::Error::request_invalid("failed to parse event envelope").with_source(e)
        })
    }

    /// Whether the event is flagged as stateless.
    pub fn is_stateless(&self) -> bool {
        self.flag == Some(EventFlag::Stateless)
    }
}
