mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{free_port, wait_for_server, FakeFactory, Generation};
use vizquiz::config::Config;
use vizquiz::server::{QuizServer, ServerError, PORT_FALLBACK_RANGE};

fn server_on(bind_addr: String) -> QuizServer {
    let mut config = Config::default();
    config.server.bind_addr = bind_addr;
    let factory = FakeFactory::new(Generation::Questions(vec![]), vec![]);
    QuizServer::new(config, Arc::new(factory))
}

#[tokio::test]
async fn test_run_without_bind_fails() {
    let server = server_on("127.0.0.1:0".to_string());
    let err = server.run().await.unwrap_err();
    assert!(matches!(err, ServerError::NotBound));
}

#[tokio::test]
async fn test_invalid_bind_addr() {
    let mut server = server_on("localhost-ish".to_string());
    let err = server.try_bind().await.unwrap_err();
    assert!(matches!(err, ServerError::InvalidBindAddr { .. }));
}

#[tokio::test]
async fn test_busy_port_falls_back() {
    let port = free_port();
    let mut first = server_on(format!("127.0.0.1:{}", port));
    let first_addr = first.try_bind().await.unwrap();
    assert_eq!(first_addr.port(), port);

    let mut second = server_on(format!("127.0.0.1:{}", port));
    let second_addr = second.try_bind().await.unwrap();
    assert_ne!(second_addr.port(), port);
    assert!(second_addr.port() <= port.saturating_add(PORT_FALLBACK_RANGE));
    assert_eq!(second.addr, second_addr);
}

#[tokio::test]
async fn test_serves_health_and_shuts_down() {
    let mut server = server_on("127.0.0.1:0".to_string());
    let addr = server.try_bind().await.unwrap();
    let handle = server.handle();

    let task = tokio::spawn(server.run());
    assert!(wait_for_server(addr, Duration::from_secs(2)).await);

    let body = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("\"healthy\""));

    handle.shutdown();
    assert!(handle.is_shutting_down());

    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("server did not stop after shutdown");
    assert!(result.unwrap().is_ok());
}
