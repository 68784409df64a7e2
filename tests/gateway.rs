mod common;

use std::time::Duration;

use common::{client, client_with, config, seed_session, user};
use httpmock::prelude::*;
use reefstars_client::{ClientConfig, RequestError, SessionStorage};
use serde_json::{json, Value};

#[tokio::test]
async fn token_is_read_from_storage_at_dispatch() {
    let server = MockServer::start_async().await;
    let first = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/reefstars/rs1")
                .header("authorization", "Bearer T9");
            then.status(200)
                .json_body(json!({ "success": true, "data": { "name": "Acropora" } }));
        })
        .await;
    let second = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/reefstars/rs1")
                .header("authorization", "Bearer T10");
            then.status(200)
                .json_body(json!({ "success": true, "data": { "name": "Acropora" } }));
        })
        .await;

    let (client, _) = client(&server);

    client.storage().set("token", "T9").unwrap();
    let _: Value = client.reef_stars().get_one("rs1").await.unwrap();

    client.storage().set("token", "T10").unwrap();
    let _: Value = client.reef_stars().get_one("rs1").await.unwrap();

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn no_token_means_no_authorization_header() {
    let server = MockServer::start_async().await;
    let anonymous = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/api/stats/overview")
                .header_missing("authorization")
                .header("accept", "application/json");
            then.status(200)
                .json_body(json!({ "success": true, "data": { "reefStars": 12 } }));
        })
        .await;

    let (client, _) = client(&server);

    let overview: Value = client.stats().overview().await.unwrap();

    anonymous.assert_async().await;
    assert_eq!(overview["reefStars"], 12);
}

#[tokio::test]
async fn failure_message_is_surfaced_and_returned() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/reefstars/missing");
            then.status(404)
                .json_body(json!({ "success": false, "message": "Reef Star not found" }));
        })
        .await;

    let (client, notifier) = client(&server);
    seed_session(&client, "T0", &user("u1", "Ana"));
    client.session_store().restore();

    let result = client.reef_stars().get_one::<Value>("missing").await;

    match result {
        Err(RequestError::NotFound(message)) => assert_eq!(message, "Reef Star not found"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(notifier.errors(), vec!["Reef Star not found"]);
    assert!(notifier.redirects().is_empty());
    // Only a 401 ends the session.
    assert!(client.session().is_authenticated());
    assert_eq!(client.storage().get("token").as_deref(), Some("T0"));
}

#[tokio::test]
async fn failure_without_message_uses_the_generic_notice() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/companies/c1");
            then.status(502).body("<html>Bad Gateway</html>");
        })
        .await;

    let (client, notifier) = client(&server);

    let result = client.companies().get_one::<Value>("c1").await;

    assert!(matches!(result, Err(RequestError::Server { status: 502, .. })));
    assert_eq!(notifier.errors(), vec!["An error occurred"]);
}

#[tokio::test]
async fn slow_server_times_out() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/stats/regions");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(json!({ "success": true, "data": [] }));
        })
        .await;

    let (client, notifier) = client_with(config(&server).timeout(Duration::from_millis(200)));

    let result = client.stats().regions::<Value>().await;

    assert!(matches!(result, Err(RequestError::Timeout)));
    assert_eq!(notifier.errors(), vec!["The request timed out"]);
}

#[tokio::test]
async fn unsuccessful_envelope_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/coral-updates/cu1/like");
            then.status(200)
                .json_body(json!({ "success": false, "message": "Already processing" }));
        })
        .await;

    let (client, notifier) = client(&server);

    let result = client.coral_updates().toggle_like::<Value>("cu1").await;

    match result {
        Err(RequestError::Rejected(message)) => {
            assert_eq!(message.as_deref(), Some("Already processing"));
        }
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(notifier.errors(), vec!["Already processing"]);
}

#[tokio::test]
async fn missing_data_is_a_parse_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/api/reefstars/rs1/stats");
            then.status(200).json_body(json!({ "success": true }));
        })
        .await;

    let (client, _) = client(&server);

    let result = client.reef_stars().stats::<Value>("rs1").await;

    assert!(matches!(result, Err(RequestError::ParseError(_))));
}

#[tokio::test]
async fn unreachable_server() {
    let (client, notifier) = client_with(
        ClientConfig::builder()
            .base_url("http://127.0.0.1:9/api")
            .timeout(Duration::from_secs(2))
            .notify_server_on_logout(false),
    );

    let result = client.reef_stars().get_one::<Value>("rs1").await;

    assert!(matches!(
        result,
        Err(RequestError::Unreachable(_) | RequestError::Timeout)
    ));
    assert_eq!(notifier.errors().len(), 1);
}

#[tokio::test]
async fn empty_qr_code_is_refused_locally() {
    let server = MockServer::start_async().await;
    let lookup = server
        .mock_async(|when, then| {
            when.method(GET);
            then.status(200);
        })
        .await;

    let (client, notifier) = client(&server);

    let result = client.reef_stars().get_by_qr::<Value>("   ").await;

    match result {
        Err(RequestError::BadRequest(message)) => assert_eq!(message, "QR code cannot be empty"),
        other => panic!("unexpected result: {other:?}"),
    }
    lookup.assert_hits_async(0).await;
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn empty_comment_is_refused_locally() {
    let server = MockServer::start_async().await;
    let comment = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/coral-updates/cu1/comment");
            then.status(200);
        })
        .await;

    let (client, _) = client(&server);

    let result = client.coral_updates().add_comment::<Value>("cu1", " ").await;

    assert!(matches!(result, Err(RequestError::BadRequest(_))));
    comment.assert_hits_async(0).await;
}

#[tokio::test]
async fn path_segments_are_encoded() {
    let server = MockServer::start_async().await;
    let region = server
        .mock_async(|when, then| {
            when.method(GET).path_includes("/api/companies/region/North");
            then.status(200)
                .json_body(json!({ "success": true, "data": [], "total": 0 }));
        })
        .await;

    let (client, _) = client(&server);

    let listing = client
        .companies()
        .by_region::<Value>("North Bali")
        .call()
        .await
        .unwrap();

    region.assert_async().await;
    assert!(listing.items.is_empty());
    assert_eq!(listing.total, Some(0));
}
