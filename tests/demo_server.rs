//! End-to-end run of the demo server over TCP.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use unless_middleware::config::load_config;
use unless_middleware::http::HttpServer;

async fn raw_get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_server_from_config_file() {
    let path = std::env::temp_dir().join(format!("unless-demo-{}.toml", std::process::id()));
    std::fs::write(
        &path,
        r#"
        [auth]
        api_key = "secret"

        [unless]
        path = ["/health", { regex = "^/assets/" }]
        "#,
    )
    .unwrap();

    let config = load_config(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();
    assert_eq!(server.config().auth.api_key, "secret");

    let handle = tokio::spawn(server.run(listener));
    tokio::time::sleep(Duration::from_millis(50)).await;

    let health = raw_get(addr, "/health").await;
    assert!(health.starts_with("HTTP/1.1 200"), "{health}");
    assert!(health.ends_with("ok"));

    let asset = raw_get(addr, "/assets/site.css").await;
    assert!(asset.starts_with("HTTP/1.1 200"), "{asset}");

    let index = raw_get(addr, "/").await;
    assert!(index.starts_with("HTTP/1.1 401"), "{index}");

    handle.abort();
}
