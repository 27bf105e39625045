use async_trait::async_trait;
use warp::{ Reply, Rejection };
use warp::http::StatusCode;
use warp::test::request;
use serde_json::{ json, Value };
use std::sync::Arc;
use std::sync::atomic::{ AtomicUsize, Ordering };
use std::time::Duration;
use publisher::{ Broker, BrokerError, EventPublisher, Timeouts };


// a broker that always connects and either accepts or refuses every message
#[derive(Debug)]
struct StubBroker {
    accepts: bool,
    sends: AtomicUsize,
}

#[async_trait]
impl Broker for StubBroker {

    async fn connect(&self) -> Result<(), BrokerError> {
        Ok(())
    }

    async fn send(&self, _key: &str, _payload: &Value) -> Result<(), BrokerError> {

        self.sends.fetch_add(1, Ordering::SeqCst);

        match self.accepts {
            true => Ok(()),
            false => Err(BrokerError::Publish("not enough replicas".to_string())),
        }

    }

    async fn close(&self) -> Result<(), BrokerError> {
        Ok(())
    }

}

// helper function to setup a test version of the api. `connected` decides
// if the publisher gets to connect before the api is used.
async fn setup_api(
    connected: bool,
    accepts: bool
) -> (impl warp::Filter<Extract = impl Reply, Error = Rejection> + Clone, Arc<StubBroker>) {

    let broker = Arc::new(StubBroker { accepts, sends: AtomicUsize::new(0) });

    let publisher = Arc::new(EventPublisher::new(
        broker.clone(),
        Timeouts { connect: Duration::from_millis(200), publish: Duration::from_millis(200) }
    ));

    if connected {
        publisher.start().await.unwrap();
    }

    (entrypoints::endpoints(publisher, 16000), broker)

}

// helper function that posts an order and returns the status and body
async fn post_order<F>(api: &F, body: Value) -> (StatusCode, Value)
where
    F: warp::Filter + 'static,
    F::Extract: Reply + Send
{

    let resp = request()
        .method("POST")
        .path("/orders")
        .json(&body)
        .reply(api)
        .await;

    let body: Value = serde_json::from_slice(resp.body()).unwrap();

    (resp.status(), body)

}


#[tokio::test]
async fn post_order_returns_the_order() {

    let (api, _broker) = setup_api(true, true).await;

    let (status, body) = post_order(&api, json!({ "productId": "p1", "userId": "u1" })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_u64());
    assert_eq!(body["productId"], json!("p1"));
    assert_eq!(body["userId"], json!("u1"));
    assert_eq!(body["status"], json!("PENDING"));
    assert_eq!(body["deliveryMode"], json!("QUEUED"));

    let keys: Vec<&String> = body.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 5, "unexpected fields in {:?}", keys);

}


#[tokio::test]
async fn unreachable_broker_still_returns_created() {

    let (api, broker) = setup_api(false, true).await;

    let (status, body) = post_order(&api, json!({ "productId": "p1", "userId": "u1" })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["deliveryMode"], json!("DIRECT"));
    assert_eq!(broker.sends.load(Ordering::SeqCst), 0);

}


#[tokio::test]
async fn failing_broker_degrades_then_goes_direct() {

    let (api, broker) = setup_api(true, false).await;

    let (status, body) = post_order(&api, json!({ "productId": "p1", "userId": "u1" })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["deliveryMode"], json!("DEGRADED"));

    let (status, body) = post_order(&api, json!({ "productId": "p1", "userId": "u1" })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["deliveryMode"], json!("DIRECT"));
    assert_eq!(broker.sends.load(Ordering::SeqCst), 1);

}


#[tokio::test]
async fn missing_product_id_is_a_bad_request() {

    let (api, broker) = setup_api(true, true).await;

    let (status, body) = post_order(&api, json!({ "productId": null, "userId": "u1" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!(400));
    assert_eq!(body["message"], json!("Your request body is missing the field: productId"));
    assert_eq!(broker.sends.load(Ordering::SeqCst), 0);

}


#[tokio::test]
async fn missing_user_id_is_a_bad_request() {

    let (api, _broker) = setup_api(true, true).await;

    let (status, body) = post_order(&api, json!({ "productId": "p1" })).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], json!("Your request body is missing the field: userId"));

}


#[tokio::test]
async fn numeric_identifiers_are_accepted() {

    let (api, _broker) = setup_api(false, true).await;

    let (status, body) = post_order(&api, json!({ "productId": 3, "userId": 12 })).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["productId"], json!("3"));
    assert_eq!(body["userId"], json!("12"));

}


#[tokio::test]
async fn identical_orders_get_different_ids() {

    let (api, _broker) = setup_api(false, true).await;

    let (_, first) = post_order(&api, json!({ "productId": "p1", "userId": "u1" })).await;
    let (_, second) = post_order(&api, json!({ "productId": "p1", "userId": "u1" })).await;

    assert_ne!(first["id"], second["id"]);

}
