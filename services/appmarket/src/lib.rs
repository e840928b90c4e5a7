//! Inbound AppMarket events and request helpers.
//!
//! The AppMarket notifies applications about subscription and user lifecycle changes
//! with events. This crate models the event envelope, lets applications register a
//! parser and a handler per event type, and routes events to them with
//! [`EventDispatcher`].
//!
//! ```
//! use appsign_appmarket::{
//!     ApiResult, EventDispatcher, EventInfo, EventType, ParseAndHandle, QueryParameters,
//!     SubscriptionChange, SubscriptionChangeParser,
//! };
//!
//! # fn main() -> appsign_core::Result<()> {
//! let dispatcher = EventDispatcher::new().with_handler(
//!     EventType::SubscriptionChange,
//!     ParseAndHandle::new(SubscriptionChangeParser, |change: SubscriptionChange| {
//!         ApiResult::success(format!("changed {}", change.account["accountIdentifier"]))
//!     }),
//! );
//!
//! let event = EventInfo::from_json(
//!     br#"{"type": "SUBSCRIPTION_CHANGE", "payload": {"account": {"accountIdentifier": "a-1"}, "order": {}}}"#,
//! )?;
//! let result = dispatcher.dispatch("some-key", &event, &QueryParameters::new())?;
//! assert!(result.success);
//! # Ok(())
//! # }
//! ```
//!
//! [`parse_accept_language`] parses the `Accept-Language` header sent along with
//! AppMarket requests.

mod event;
pub use event::{EventFlag, EventInfo, EventType, Marketplace, QueryParameters};

mod handler;
pub use handler::{ApiResult, EventHandler, EventParser, ParseAndHandle, SdkEventHandler};

mod subscription;
pub use subscription::{SubscriptionChange, SubscriptionChangeParser};

mod dispatch;
pub use dispatch::EventDispatcher;

mod locale;
pub use locale::{parse_accept_language, LanguageTag};
