use leetfresh::browser::SessionCookies;
use leetfresh::leetcode::LeetCodeApi;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn cookies() -> SessionCookies {
    SessionCookies {
        session: "session-value".to_string(),
        csrf: "csrf-value".to_string(),
    }
}

fn can_bind_localhost() -> bool {
    std::net::TcpListener::bind("127.0.0.1:0").is_ok()
}

fn api_for(server: &MockServer) -> LeetCodeApi {
    LeetCodeApi::with_endpoint(&format!("{}/graphql/", server.uri())).expect("build client")
}

#[tokio::test]
async fn username_is_returned_when_cookies_authenticate() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .and(header("Cookie", "LEETCODE_SESSION=session-value; csrftoken=csrf-value"))
        .and(header("x-csrftoken", "csrf-value"))
        .and(header("Referer", "https://leetcode.com"))
        .and(body_partial_json(serde_json::json!({
            "query": "query { userStatus { username } }"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "userStatus": { "username": "octocat" } }
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    assert_eq!(
        api.current_username(&cookies()).await,
        Some("octocat".to_string())
    );
}

#[tokio::test]
async fn server_error_is_not_fatal() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = api_for(&server);
    assert_eq!(api.current_username(&cookies()).await, None);
}

#[tokio::test]
async fn malformed_body_yields_no_identity() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let api = api_for(&server);
    assert_eq!(api.current_username(&cookies()).await, None);
}

#[tokio::test]
async fn missing_username_field_yields_no_identity() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "userStatus": {} }
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    assert_eq!(api.current_username(&cookies()).await, None);
}

#[tokio::test]
async fn empty_username_counts_as_unverified() {
    if !can_bind_localhost() {
        return;
    }

    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/graphql/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": { "userStatus": { "username": "" } }
        })))
        .mount(&server)
        .await;

    let api = api_for(&server);
    assert_eq!(api.current_username(&cookies()).await, None);
}

#[tokio::test]
async fn unreachable_endpoint_yields_no_identity() {
    // Port 0 never accepts; the probe must degrade, not error.
    let api = LeetCodeApi::with_endpoint("http://127.0.0.1:0/graphql/").expect("build client");
    assert_eq!(api.current_username(&cookies()).await, None);
}
