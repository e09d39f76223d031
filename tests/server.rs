use std::net::SocketAddr;

use chrono::{DateTime, Utc};
use echoip::config::CommonConfig;
use echoip::server::config::ServerConfig;
use echoip::server::factory::ServerFactory;
use echoip::types::client_info::ClientInfoResponse;
use serde_json::Value;

async fn start_server() -> SocketAddr {
    let mut cfg = <ServerConfig as CommonConfig>::default();
    cfg.bind = String::from("127.0.0.1:0");
    cfg.workers = 1;
    cfg.complete().unwrap();

    let srv = ServerFactory::new(cfg).build_server().listen().unwrap();
    let addr = srv.addrs()[0];
    tokio::spawn(srv.wait());
    addr
}

#[tokio::test]
async fn get_client_info() {
    let addr = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://{addr}/"))
        .header("X-Forwarded-For", "1.2.3.4")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );

    let raw = resp.text().await.unwrap();
    let value: Value = serde_json::from_str(&raw).unwrap();
    let obj = value.as_object().unwrap();
    let mut keys: Vec<_> = obj.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, vec!["ip", "timestamp"]);
    assert!(raw.find("\"timestamp\"").unwrap() < raw.find("\"ip\"").unwrap());

    let info: ClientInfoResponse = serde_json::from_str(&raw).unwrap();
    assert_eq!(info.ip.as_deref(), Some("1.2.3.4"));

    let ts = DateTime::parse_from_rfc3339(&info.timestamp).unwrap();
    let diff = Utc::now().signed_duration_since(ts);
    assert!(diff.num_seconds().abs() <= 2);
}

#[tokio::test]
async fn get_client_info_direct() {
    let addr = start_server().await;

    let info: ClientInfoResponse = reqwest::get(format!("http://{addr}/"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(info.ip.as_deref(), Some("127.0.0.1"));

    let client = reqwest::Client::new();
    let info: ClientInfoResponse = client
        .get(format!("http://{addr}/"))
        .header("X-Forwarded-For", "")
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(info.ip.as_deref(), Some("127.0.0.1"));
}

#[tokio::test]
async fn unknown_route() {
    let addr = start_server().await;

    let resp = reqwest::get(format!("http://{addr}/healthz")).await.unwrap();
    assert_eq!(resp.status(), 404);

    let client = reqwest::Client::new();
    let resp = client
        .delete(format!("http://{addr}/"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
}
