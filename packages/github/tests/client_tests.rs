// ABOUTME: HTTP-level tests for the GitHub client against a local mock server
// ABOUTME: Covers headers, status handling and response decoding for both endpoints

use daylog_core::Credential;
use daylog_github::{ActivityFeed, ClientOptions, GitHubApiError, GitHubClient};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    let credential = Credential::new("test-token").unwrap();
    let options = ClientOptions {
        api_url: server.uri(),
        ..ClientOptions::default()
    };
    GitHubClient::new(&credential, options).unwrap()
}

#[tokio::test]
async fn test_authenticated_user_sends_token_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("Authorization", "token test-token"))
        .and(header("Accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "octocat",
            "id": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let login = client_for(&server).authenticated_user().await.unwrap();
    assert_eq!(login, "octocat");
}

#[tokio::test]
async fn test_authenticated_user_missing_login() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 1 })))
        .mount(&server)
        .await;

    let err = client_for(&server).authenticated_user().await.unwrap_err();
    match err {
        GitHubApiError::ParseError(msg) => assert!(msg.contains("login"), "{}", msg),
        other => panic!("Expected parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_authenticated_user_login_wrong_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": 42 })))
        .mount(&server)
        .await;

    let err = client_for(&server).authenticated_user().await.unwrap_err();
    assert!(matches!(err, GitHubApiError::ParseError(_)));
}

#[tokio::test]
async fn test_unauthorized_uses_api_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "message": "Bad credentials",
            "documentation_url": "https://docs.github.com/rest"
        })))
        .mount(&server)
        .await;

    let err = client_for(&server).authenticated_user().await.unwrap_err();
    assert!(err.is_auth_error());
    match err {
        GitHubApiError::Status { status, message } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Bad credentials");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_with_plain_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/events"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = client_for(&server).user_events("octocat").await.unwrap_err();
    match err {
        GitHubApiError::Status { status, message } => {
            assert_eq!(status, StatusCode::BAD_GATEWAY);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("Expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_with_empty_body_uses_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/events"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).user_events("octocat").await.unwrap_err();
    assert_eq!(err.to_string(), "GitHub API returned 404 Not Found: Not Found");
}

#[tokio::test]
async fn test_user_events_preserves_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/events"))
        .and(header("Authorization", "token test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "3", "type": "PushEvent", "created_at": "2023-01-03T00:00:00Z" },
            { "id": "2", "type": "IssuesEvent", "created_at": "2023-01-02T00:00:00Z" },
            { "id": "1", "type": "ForkEvent", "created_at": "2023-01-01T00:00:00Z" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let events = client_for(&server).user_events("octocat").await.unwrap();
    let ids: Vec<&str> = events.iter().filter_map(|e| e.id()).collect();
    assert_eq!(ids, vec!["3", "2", "1"]);
}

#[tokio::test]
async fn test_user_events_rejects_non_array() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/events"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .mount(&server)
        .await;

    let err = client_for(&server).user_events("octocat").await.unwrap_err();
    assert!(matches!(err, GitHubApiError::ParseError(_)));
}

#[tokio::test]
async fn test_user_events_rejects_malformed_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/events"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[{\"id\": "))
        .mount(&server)
        .await;

    let err = client_for(&server).user_events("octocat").await.unwrap_err();
    assert!(matches!(err, GitHubApiError::ParseError(_)));
}

#[tokio::test]
async fn test_trailing_slash_in_api_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "login": "octocat" })))
        .mount(&server)
        .await;

    let credential = Credential::new("test-token").unwrap();
    let options = ClientOptions {
        api_url: format!("{}/", server.uri()),
        ..ClientOptions::default()
    };
    let client = GitHubClient::new(&credential, options).unwrap();

    assert_eq!(client.api_url(), server.uri());
    assert_eq!(client.authenticated_user().await.unwrap(), "octocat");
}

#[tokio::test]
async fn test_unreachable_server_is_request_error() {
    let credential = Credential::new("test-token").unwrap();
    let options = ClientOptions {
        // Reserved port on loopback, nothing listens there
        api_url: "http://127.0.0.1:9".to_string(),
        ..ClientOptions::default()
    };
    let client = GitHubClient::new(&credential, options).unwrap();

    let err = client.authenticated_user().await.unwrap_err();
    assert!(matches!(err, GitHubApiError::RequestFailed(_)));
}

#[test]
fn test_token_with_newline_is_rejected() {
    let credential = Credential::new("bad\ntoken").unwrap();
    let result = GitHubClient::new(&credential, ClientOptions::default());
    assert!(matches!(result, Err(GitHubApiError::InvalidConfig(_))));
}
