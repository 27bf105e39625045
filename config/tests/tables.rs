use config::tables::Config;
use std::net::Ipv4Addr;
use std::time::Duration;


#[test]
fn empty_config_uses_defaults() {

    let config: Config = toml::from_str("").unwrap();

    assert_eq!(config.api.ip, Ipv4Addr::new(127, 0, 0, 1));
    assert_eq!(config.api.port, 3030);
    assert_eq!(config.api.max_request_size, 16384);

    assert!(config.broker.enabled);
    assert_eq!(config.broker.url, "http://127.0.0.1:8082");
    assert_eq!(config.broker.topic, "orders");
    assert_eq!(config.broker.timeouts().connect, Duration::from_millis(2000));
    assert_eq!(config.broker.timeouts().publish, Duration::from_millis(1000));
    assert_eq!(config.broker.reconnect, None);

}


#[test]
fn values_can_be_overridden() {

    let config: Config = toml::from_str(r#"
        [api]
        ip = "0.0.0.0"
        port = 8080

        [broker]
        url = "http://kafka-rest:8082"
        topic = "checkout"
        publish_timeout_ms = 250
        username = "intake"
        password = "secret"
    "#).unwrap();

    assert_eq!(config.api.ip, Ipv4Addr::new(0, 0, 0, 0));
    assert_eq!(config.api.port, 8080);
    assert_eq!(config.api.max_request_size, 16384);

    assert_eq!(config.broker.url, "http://kafka-rest:8082");
    assert_eq!(config.broker.topic, "checkout");
    assert_eq!(config.broker.timeouts().publish, Duration::from_millis(250));
    assert_eq!(config.broker.username.as_deref(), Some("intake"));
    assert_eq!(config.broker.password.as_deref(), Some("secret"));

}


#[test]
fn reconnect_table_enables_reconnecting() {

    let config: Config = toml::from_str(r#"
        [broker.reconnect]
        initial_backoff_ms = 100
    "#).unwrap();

    let backoff = config.broker.reconnect.unwrap().backoff();

    assert_eq!(backoff.initial, Duration::from_millis(100));
    assert_eq!(backoff.max, Duration::from_millis(30000));

}


#[test]
fn backoff_limit_is_never_below_the_first_wait() {

    let config: Config = toml::from_str(r#"
        [broker.reconnect]
        initial_backoff_ms = 1000
        max_backoff_ms = 10
    "#).unwrap();

    let backoff = config.broker.reconnect.unwrap().backoff();

    assert_eq!(backoff.max, Duration::from_millis(1000));

}


#[test]
fn zero_timeouts_are_rejected() {

    let config: Result<Config, toml::de::Error> = toml::from_str(r#"
        [broker]
        publish_timeout_ms = 0
    "#);

    match config {
        Err(e) => assert!(e.message().contains("greater than 0"), "Incorrect error message: {}", e.message()),
        Ok(_) => panic!("Config parse should have returned an error."),
    }

}


#[test]
fn unknown_fields_are_rejected() {

    let config: Result<Config, toml::de::Error> = toml::from_str(r#"
        [broker]
        urls = "http://kafka-rest:8082"
    "#);

    assert!(config.is_err());

}
