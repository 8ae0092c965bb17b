//! End-to-end lookups against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives a real `Client` with
//! the default `UreqTransport` over HTTP. Checks that credentials reach the
//! server, that success envelopes decode into typed payloads, and that the
//! service's error envelopes come back as `Error::Api`.

use std::net::SocketAddr;
use std::sync::Arc;

use foursquare_core::{Client, ClientConfig, Error};
use mock_server::Fixtures;

const CAFE_ID: &str = "40a55d80f964a52020f31ee3";

fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener, Fixtures::sample()).await
        })
        .unwrap();
    });

    addr
}

fn client_for(addr: SocketAddr, client_id: &str, client_secret: &str) -> Client {
    let config = ClientConfig::default().with_base_url(format!("http://{addr}/v2"));
    Client::with_config(client_id, client_secret, config).unwrap()
}

#[test]
fn venue_and_category_lookups() {
    let addr = start_server();
    let client = client_for(addr, "id", "secret");

    // Step 1: look up a known venue.
    let venue = client.venue(CAFE_ID).unwrap();
    assert_eq!(venue.id, CAFE_ID);
    assert_eq!(venue.name, "Clinton St. Baking Co.");
    assert!(venue.verified);
    let location = venue.location.as_ref().unwrap();
    assert_eq!(location.postal_code.as_deref(), Some("10002"));
    assert_eq!(
        venue.primary_category().map(|c| c.name.as_str()),
        Some("Coffee Shop")
    );

    // Step 2: list categories and walk the tree.
    let categories = client.categories().unwrap();
    assert_eq!(categories.len(), 2);
    let food = &categories[0];
    assert_eq!(food.name, "Food");
    assert!(food.find("4bf58dd8d48988d16a941735").is_some(), "bakery under food");

    // Step 3: unknown venue is an API error carrying the code and detail.
    let err = client.venue("does-not-exist").unwrap_err();
    match err {
        Error::Api {
            code,
            error_type,
            error_detail,
        } => {
            assert_eq!(code, 400);
            assert_eq!(error_type.as_deref(), Some("param_error"));
            assert!(error_detail.unwrap().contains("does-not-exist"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }

    // Step 4: close, then nothing more is accepted.
    client.close();
    assert!(matches!(client.venue(CAFE_ID), Err(Error::Closed)));
}

#[test]
fn empty_credentials_are_rejected_by_the_service() {
    let addr = start_server();
    let client = client_for(addr, "", "");

    let err = client.categories().unwrap_err();
    assert_eq!(err.code(), Some(400));
    assert!(matches!(err, Error::Api { ref error_type, .. } if error_type.as_deref() == Some("invalid_auth")));
}

#[test]
fn concurrent_callers_share_one_client() {
    let addr = start_server();
    let client = Arc::new(client_for(addr, "id", "secret"));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = Arc::clone(&client);
            std::thread::spawn(move || {
                if i % 2 == 0 {
                    client.venue(CAFE_ID).map(|v| v.id)
                } else {
                    client.venue("412d2800f964a520df0c1fe3").map(|v| v.id)
                }
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let id = handle.join().unwrap().unwrap();
        let expected = if i % 2 == 0 { CAFE_ID } else { "412d2800f964a520df0c1fe3" };
        assert_eq!(id, expected, "caller {i} got another caller's venue");
    }
}

#[test]
fn unreachable_server_is_transport_error() {
    // Bind then drop to get a port nothing is listening on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let client = client_for(addr, "id", "secret");

    assert!(matches!(client.categories(), Err(Error::Transport(_))));
}
