use crate::{EventInfo, EventParser, QueryParameters};
use appsign_core::{Error, Result};
use serde_json::Value;

/// SubscriptionChange is the rich event for updates to an account requested by the
/// AppMarket.
///
/// Owner, order and account are kept as the JSON values found in the event.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionChange {
    /// Consumer key used by the request that delivered the event.
    pub consumer_key: String,
    /// The user that requested the change.
    pub owner: Value,
    /// The new state of the order.
    pub order: Value,
    /// The account being changed.
    pub account: Value,
    /// Query parameters of the delivering request.
    pub query_parameters: QueryParameters,
}

/// Parses `SUBSCRIPTION_CHANGE` events into [`SubscriptionChange`].
#[derive(Debug, Clone, Copy, Default)]
pub struct SubscriptionChangeParser;

impl EventParser<SubscriptionChange> for SubscriptionChangeParser {
    fn parse(
        &self,
        consumer_key: &str,
        event: &EventInfo,
        query_parameters: &QueryParameters,
    ) -> Result<SubscriptionChange> {
        Ok(SubscriptionChange {
            consumer_key: consumer_key.to_string(),
            owner: event.creator.clone(),
            order: required(&event.payload, "order")?,
            account: required(&event.payload, "account")?,
            query_parameters: query_parameters.clone(),
        })
    }
}

fn required(payload: &Value, field: &str) -> Result<Value> {
    match payload.get(field) {
        Some(v) if !v.is_null() => Ok(v.clone()),
        _ => Err(Error::request_invalid(format!(
            "event payload has no {field}"
        ))),
    }
}
