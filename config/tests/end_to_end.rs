use config::bootstrap::{ get_config, start, Service };
use config::errors::StartupError;
use config::tables::Config;
use httpmock::MockServer;
use publisher::ConnectionState;
use serde_json::{ json, Value };
use std::fs::{ remove_file, write };
use std::time::{ Duration, Instant };


// helper function to start the service on an ephemeral port
async fn setup(config_toml: &str) -> (Service, String) {

    let mut config: Config = toml::from_str(config_toml).unwrap();
    config.api.port = 0;

    let service = start(config).await.unwrap();
    let url = format!("http://{}", service.addr);

    (service, url)

}

// helper function that waits for the publisher to reach a state
async fn wait_for(service: &Service, state: ConnectionState) {

    let deadline = Instant::now() + Duration::from_secs(3);

    while service.publisher.state() != state && Instant::now() < deadline {
        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    assert_eq!(service.publisher.state(), state);

}

// helper function that places an order and returns the status and body
async fn place_order(url: &str, body: Value) -> (u16, Value) {

    let resp = reqwest::Client::new()
        .post(format!("{}/orders", url))
        .json(&body)
        .send()
        .await
        .unwrap();

    let status = resp.status().as_u16();
    let body: Value = resp.json().await.unwrap();

    (status, body)

}


#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn health_can_be_checked() {

    let (service, url) = setup(r#"
        [broker]
        enabled = false
    "#).await;

    let resp = reqwest::get(format!("{}/health", url)).await.unwrap();
    let body: Value = resp.json().await.unwrap();

    assert_eq!(body["state"], json!("good"));
    assert_eq!(body["broker"], json!("DISCONNECTED"));

    service.shutdown().await;

}


#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn unreachable_broker_accepts_orders_directly() {

    // nothing listens on the discard port
    let (service, url) = setup(r#"
        [broker]
        url = "http://127.0.0.1:9"
        connect_timeout_ms = 500
    "#).await;

    wait_for(&service, ConnectionState::Disconnected).await;

    let (status, body) = place_order(&url, json!({ "productId": "p1", "userId": "u1" })).await;

    assert_eq!(status, 201);
    assert_eq!(body["deliveryMode"], json!("DIRECT"));

    service.shutdown().await;

}


#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn healthy_broker_queues_orders() {

    let broker = MockServer::start_async().await;

    let _topic = broker.mock_async(|when, then| {
        let _ = when.method("GET").path("/topics/orders");
        let _ = then.status(200).json_body(json!({ "name": "orders" }));
    }).await;

    let produce = broker.mock_async(|when, then| {
        let _ = when.method("POST").path("/topics/orders");
        let _ = then.status(200).json_body(json!({
            "offsets": [ { "partition": 0, "offset": 1, "error_code": null, "error": null } ]
        }));
    }).await;

    let (service, url) = setup(&format!(r#"
        [broker]
        url = "{}"
    "#, broker.base_url())).await;

    wait_for(&service, ConnectionState::Connected).await;

    let (status, body) = place_order(&url, json!({ "productId": "p1", "userId": "u1" })).await;

    assert_eq!(status, 201);
    assert_eq!(body["deliveryMode"], json!("QUEUED"));
    assert_eq!(body["status"], json!("PENDING"));
    produce.assert_async().await;

    service.shutdown().await;

}


#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn failing_broker_degrades_then_goes_direct() {

    let broker = MockServer::start_async().await;

    let _topic = broker.mock_async(|when, then| {
        let _ = when.method("GET").path("/topics/orders");
        let _ = then.status(200).json_body(json!({ "name": "orders" }));
    }).await;

    let _produce = broker.mock_async(|when, then| {
        let _ = when.method("POST").path("/topics/orders");
        let _ = then.status(503);
    }).await;

    let (service, url) = setup(&format!(r#"
        [broker]
        url = "{}"
    "#, broker.base_url())).await;

    wait_for(&service, ConnectionState::Connected).await;

    let (_, first) = place_order(&url, json!({ "productId": "p1", "userId": "u1" })).await;
    let (_, second) = place_order(&url, json!({ "productId": "p1", "userId": "u1" })).await;

    assert_eq!(first["deliveryMode"], json!("DEGRADED"));
    assert_eq!(second["deliveryMode"], json!("DIRECT"));
    assert_eq!(service.publisher.state(), ConnectionState::Disconnected);

    service.shutdown().await;

}


#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn missing_fields_are_bad_requests() {

    let (service, url) = setup(r#"
        [broker]
        enabled = false
    "#).await;

    let (status, body) = place_order(&url, json!({ "userId": "u1" })).await;

    assert_eq!(status, 400);
    assert_eq!(body["code"], json!(400));
    assert_eq!(service.publisher.stats().direct, 0);

    service.shutdown().await;

}


#[test]
fn missing_config_file_reverts_to_defaults() {

    let config = get_config("./does_not_exist.toml").unwrap();

    assert_eq!(config.api.port, 3030);
    assert!(config.broker.enabled);

}


#[test]
fn invalid_config_file_is_an_error() {

    let filepath = "./invalid_config_test.toml";
    write(filepath, "[api]\nport = \"not a port\"\n").unwrap();

    let config = get_config(filepath);
    remove_file(filepath).unwrap();

    assert!(matches!(config, Err(StartupError::Config { .. })));

}


#[tokio::test]
async fn invalid_broker_url_stops_startup() {

    let mut config: Config = toml::from_str(r#"
        [broker]
        url = "not a url"
    "#).unwrap();
    config.api.port = 0;

    assert!(matches!(start(config).await, Err(StartupError::Broker(_))));

}
