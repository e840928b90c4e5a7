use anyhow::Result;
use appsign_appmarket::{
    ApiResult, EventDispatcher, EventInfo, EventType, ParseAndHandle, QueryParameters,
    SubscriptionChange, SubscriptionChangeParser,
};
use appsign_core::ErrorKind;
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn init_dispatcher(seen: Arc<Mutex<Vec<SubscriptionChange>>>) -> EventDispatcher {
    let _ = env_logger::builder().is_test(true).try_init();

    EventDispatcher::new().with_handler(
        EventType::SubscriptionChange,
        ParseAndHandle::new(SubscriptionChangeParser, move |change: SubscriptionChange| {
            seen.lock().unwrap().push(change);
            ApiResult::success("Subscription changed")
        }),
    )
}

const CHANGE_EVENT: &str = r#"{
    "type": "SUBSCRIPTION_CHANGE",
    "marketplace": {"partner": "ACME", "baseUrl": "https://acme.example.com"},
    "creator": {"uuid": "user-1", "email": "owner@example.com"},
    "payload": {
        "account": {"accountIdentifier": "acc-1", "status": "ACTIVE"},
        "order": {"editionCode": "PREMIUM", "pricingDuration": "MONTHLY"}
    }
}"#;

#[test]
fn test_dispatch_to_registered_handler() -> Result<()> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = init_dispatcher(seen.clone());

    let event = EventInfo::from_json(CHANGE_EVENT.as_bytes())?;
    let query = QueryParameters::from([("eventId".to_string(), vec!["1234".to_string()])]);
    let result = dispatcher.dispatch("some-key", &event, &query)?;

    assert_eq!(result, ApiResult::success("Subscription changed"));
    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].consumer_key, "some-key");
    assert_eq!(seen[0].owner["email"], "owner@example.com");
    assert_eq!(seen[0].order["editionCode"], "PREMIUM");
    assert_eq!(seen[0].account["accountIdentifier"], "acc-1");
    assert_eq!(seen[0].query_parameters, query);
    Ok(())
}

#[test]
fn test_dispatch_unknown_event_type() -> Result<()> {
    let dispatcher = init_dispatcher(Arc::default());

    let event = EventInfo::from_json(br#"{"type": "ADDON_ORDER"}"#)?;
    assert!(!dispatcher.supports(&event.event_type));

    let result = dispatcher.dispatch("some-key", &event, &QueryParameters::new())?;
    assert_eq!(result, ApiResult::failure("Unsupported event type ADDON_ORDER"));
    Ok(())
}

#[test]
fn test_dispatch_unregistered_known_type() -> Result<()> {
    let dispatcher = init_dispatcher(Arc::default());

    let event = EventInfo::from_json(br#"{"type": "SUBSCRIPTION_CANCEL"}"#)?;
    let result = dispatcher.dispatch("some-key", &event, &QueryParameters::new())?;

    assert!(!result.success);
    Ok(())
}

#[test]
fn test_dispatch_malformed_payload() -> Result<()> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let dispatcher = init_dispatcher(seen.clone());

    let event = EventInfo::from_json(br#"{"type": "SUBSCRIPTION_CHANGE", "payload": {}}"#)?;
    let err = dispatcher
        .dispatch("some-key", &event, &QueryParameters::new())
        .expect_err("dispatch must fail");

    assert_eq!(err.kind(), ErrorKind::RequestInvalid);
    assert!(seen.lock().unwrap().is_empty());
    Ok(())
}
