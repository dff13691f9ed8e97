use gws::api::client::{ClientConfig, ScoreClient};
use gws::api::{field, Color, Endpoint, ScoreFilter, ScorePage};
use gws::credentials::API_KEY;
use gws::error::GwsError;
use mockito::{Matcher, Server, ServerGuard};
use pretty_assertions::assert_eq;
use std::collections::HashMap;

const LATEST: &str = "/globalwinescores/latest/";
const HISTORICAL: &str = "/globalwinescores/";

const TWO_WINES: &str = r#"{
    "count": 2,
    "next": null,
    "previous": null,
    "results": [
        {
            "wine_name": "Chateau Latour",
            "vintage": "2010",
            "score": 98.5,
            "confidence_index": "A+",
            "appellation": "Pauillac",
            "color": "Red",
            "wine_id": 174451,
            "lwin": "1012316",
            "is_primeurs": false,
            "journalist_count": 7,
            "date": null
        },
        {
            "wine_name": "Domaine Leflaive Montrachet",
            "vintage": "NV",
            "score": 97,
            "confidence_index": 4,
            "color": "White"
        }
    ]
}"#;

type TestClient = ScoreClient<HashMap<String, String>>;

fn client_for(server: &ServerGuard) -> TestClient {
    let credentials = HashMap::from([(API_KEY.to_string(), "test-token".to_string())]);
    client_with(server, credentials)
}

fn client_with(server: &ServerGuard, credentials: HashMap<String, String>) -> TestClient {
    let config = ClientConfig {
        base_url: server.url(),
        timeout: 5,
        ..Default::default()
    };
    ScoreClient::new(config, credentials).unwrap()
}

#[tokio::test]
async fn test_success_returns_page_verbatim() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST)
        .match_header("authorization", "Token test-token")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TWO_WINES)
        .expect(1)
        .create_async()
        .await;

    let page = client_for(&server)
        .query(Endpoint::Latest, &ScoreFilter::new())
        .await
        .unwrap();

    mock.assert_async().await;

    let expected: ScorePage = serde_json::from_str(TWO_WINES).unwrap();
    assert_eq!(page, expected);
    assert_eq!(page.count, 2);
    assert_eq!(page.results[0].wine_name(), Some("Chateau Latour"));
    assert_eq!(page.results[1].wine_name(), Some("Domaine Leflaive Montrachet"));
    // No coercion: color keeps server casing, numbers stay numbers, nulls stay
    assert_eq!(page.results[0].display(field::COLOR).as_deref(), Some("Red"));
    assert_eq!(page.results[0].get(field::WINE_ID), Some(&serde_json::json!(174451)));
    assert_eq!(page.results[1].get(field::VINTAGE), Some(&serde_json::json!("NV")));
    assert_eq!(page.results[0].fields()["date"], serde_json::Value::Null);
    assert_eq!(
        serde_json::to_value(&page).unwrap(),
        serde_json::from_str::<serde_json::Value>(TWO_WINES).unwrap()
    );
}

#[tokio::test]
async fn test_only_set_fields_are_sent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST)
        .match_query(Matcher::Exact("vintage=2015&is_primeurs=false&limit=5".to_string()))
        .with_status(200)
        .with_body(TWO_WINES)
        .expect(1)
        .create_async()
        .await;

    let filter = ScoreFilter::new().limit(5).is_primeurs(false).vintage("2015");
    client_for(&server)
        .query(Endpoint::Latest, &filter)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_missing_token_sends_nothing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let result = client_with(&server, HashMap::new())
        .query(Endpoint::Latest, &ScoreFilter::new())
        .await;

    assert!(matches!(result, Err(GwsError::Unauthenticated(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_response() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", LATEST)
        .with_status(401)
        .with_body(r#"{"detail": "Invalid token."}"#)
        .create_async()
        .await;

    let result = client_for(&server)
        .query(Endpoint::Latest, &ScoreFilter::new())
        .await;

    assert!(matches!(result, Err(GwsError::Unauthenticated(_))));
}

#[tokio::test]
async fn test_rate_limited_is_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST)
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body(r#"{"detail": "Request was throttled."}"#)
        .expect(1)
        .create_async()
        .await;

    let result = client_for(&server)
        .top_rated(ScoreFilter::new())
        .await;

    assert!(matches!(result, Err(GwsError::RateLimited)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_historical_without_plan() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", HISTORICAL)
        .with_status(403)
        .expect(1)
        .create_async()
        .await;

    let result = client_for(&server)
        .query(Endpoint::Historical, &ScoreFilter::new())
        .await;

    assert!(matches!(result, Err(GwsError::PlanRestricted)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_detail_message_passed_through() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", LATEST)
        .match_query(Matcher::Any)
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"detail": "invalid vintage"}"#)
        .create_async()
        .await;

    let result = client_for(&server)
        .by_vintage("1066", ScoreFilter::new())
        .await;

    match result {
        Err(GwsError::RemoteRejected(message)) => assert_eq!(message, "invalid vintage"),
        other => panic!("Expected RemoteRejected, got {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_body_is_transport_failure() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", LATEST)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><body>maintenance</body></html>")
        .create_async()
        .await;

    let result = client_for(&server)
        .query(Endpoint::Latest, &ScoreFilter::new())
        .await;

    assert!(matches!(result, Err(GwsError::TransportFailure(_))));
}

#[tokio::test]
async fn test_off_type_field_keeps_page() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", LATEST)
        .with_status(200)
        .with_body(
            r#"{"count": 1, "next": null, "previous": null, "results": [
                {"wine_name": "Pontet-Canet", "appellation": {"name": "Pauillac"}, "is_primeurs": "true"}
            ]}"#,
        )
        .create_async()
        .await;

    let page = client_for(&server)
        .query(Endpoint::Latest, &ScoreFilter::new())
        .await
        .unwrap();

    assert_eq!(page.results.len(), 1);
    assert_eq!(page.results[0].wine_name(), Some("Pontet-Canet"));
    assert_eq!(
        page.results[0].get(field::APPELLATION),
        Some(&serde_json::json!({"name": "Pauillac"}))
    );
}

#[tokio::test]
async fn test_server_error_without_detail() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", LATEST)
        .with_status(502)
        .with_body("Bad Gateway")
        .create_async()
        .await;

    let result = client_for(&server)
        .query(Endpoint::Latest, &ScoreFilter::new())
        .await;

    match result {
        Err(GwsError::TransportFailure(message)) => assert!(message.contains("502")),
        other => panic!("Expected TransportFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_repeated_query_is_idempotent() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST)
        .match_query(Matcher::UrlEncoded("lwin".to_string(), "1012316".to_string()))
        .with_status(200)
        .with_body(TWO_WINES)
        .expect(2)
        .create_async()
        .await;

    let client = client_for(&server);
    let first = client.by_lwin("1012316", ScoreFilter::new()).await.unwrap();
    let second = client.by_lwin("1012316", ScoreFilter::new()).await.unwrap();

    assert_eq!(first, second);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_by_color_sends_lowercase() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST)
        .match_query(Matcher::Exact("color=red&limit=50&ordering=-score".to_string()))
        .with_status(200)
        .with_body(TWO_WINES)
        .expect(1)
        .create_async()
        .await;

    client_for(&server)
        .by_color("RED", ScoreFilter::new())
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_top_rated_ignores_caller_ordering() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", LATEST)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("ordering".to_string(), "-score".to_string()),
            Matcher::UrlEncoded("limit".to_string(), "20".to_string()),
            Matcher::UrlEncoded("color".to_string(), "white".to_string()),
        ]))
        .with_status(200)
        .with_body(TWO_WINES)
        .expect(1)
        .create_async()
        .await;

    let overrides = ScoreFilter::new().ordering("date").color(Color::White);
    client_for(&server).top_rated(overrides).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_server() {
    let config = ClientConfig {
        base_url: "http://127.0.0.1:1".to_string(),
        timeout: 2,
        ..Default::default()
    };
    let credentials = HashMap::from([(API_KEY.to_string(), "test-token".to_string())]);
    let client = ScoreClient::new(config, credentials).unwrap();

    let result = client.query(Endpoint::Latest, &ScoreFilter::new()).await;
    assert!(matches!(result, Err(GwsError::TransportFailure(_))));
}
