use super::*;
use mockito::{Matcher, Server};

fn resolver_for(server: &Server) -> Apkad {
    Apkad::with_base_urls(
        &NetworkingConfig::default(),
        format!("{}/token", server.url()),
        format!("{}/get", server.url()),
    )
    .unwrap()
}

fn query(package: &str) -> SearchQuery {
    SearchQuery::new(package, None)
}

#[test]
fn event_lines_without_data_prefix_carry_no_payload() {
    assert!(parse_event_line(": heartbeat").is_none());
    assert!(parse_event_line("event: progress").is_none());
    assert!(parse_event_line("").is_none());
}

#[test]
fn malformed_json_lines_are_skipped_not_fatal() {
    assert!(parse_event_line("data: {truncated").is_none());
    assert!(parse_event_line("data: not json at all").is_none());
}

#[test]
fn completion_predicate_requires_progress_100_and_nonempty_html() {
    let partial = parse_event_line("data: {\"progress\":40}").unwrap();
    assert!(!partial.is_terminal());

    let empty_html = parse_event_line("data: {\"progress\":100,\"html\":\"\"}").unwrap();
    assert!(!empty_html.is_terminal());

    let done = parse_event_line("data: {\"progress\":100,\"html\":\"<div></div>\"}").unwrap();
    assert!(done.is_terminal());
}

#[test]
fn stream_payload_is_compact_with_stable_field_order() {
    // Encoded verbatim into the query string; must match the wire shape
    assert_eq!(
        stream_payload("com.example.app", 1736900000).unwrap(),
        "{\"hl\":\"en\",\"package\":\"com.example.app\",\"device\":\"phone\",\
         \"arch\":\"arm64-v8a\",\"vc\":\"\",\"device_id\":\"\",\"sdk\":\"default\",\
         \"timestamp\":1736900000}"
    );
}

#[tokio::test]
async fn token_rejection_means_no_search_request_is_issued() {
    let mut server = Server::new_async().await;
    let token = server
        .mock("POST", "/token")
        .with_status(200)
        .with_body(r#"{"success":false}"#)
        .create_async()
        .await;
    let search = server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let result = resolver.search(&query("com.example.app")).await.unwrap();

    assert!(result.is_none());
    token.assert_async().await;
    search.assert_async().await;
}

#[tokio::test]
async fn token_endpoint_401_is_an_auth_failure() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/token")
        .with_status(401)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let err = resolver.search(&query("com.example.app")).await.unwrap_err();
    assert!(matches!(err, SiteError::Auth { site: Site::Apkad, status: 401 }));
}

#[tokio::test]
async fn token_endpoint_server_error_degrades_to_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/token")
        .with_status(500)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let result = resolver.search(&query("com.example.app")).await.unwrap();
    assert!(result.is_none());
}

const RESULT_HTML: &str = "<ul><li class=\\\"_title\\\">Example App</li></ul>\
<div id=\\\"apkslist\\\">\
<a href=\\\"https://cdn.example.com/files/base.apk\\\">\
<span class=\\\"der_name\\\">base.apk</span></a>\
<a href=\\\"https://cdn.example.com/files/config.arm64_v8a.apk\\\"></a>\
</div>";

async fn token_mock(server: &mut Server) -> mockito::Mock {
    server
        .mock("POST", "/token")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "package": "com.example.app",
            "device": "phone",
            "arch": "arm64-v8a",
        })))
        .with_status(200)
        .with_body(r#"{"success":true,"token":"tok-1","timestamp":1736900000}"#)
        .create_async()
        .await
}

#[tokio::test]
async fn streaming_search_ignores_heartbeats_until_the_terminal_event() {
    let mut server = Server::new_async().await;
    let token = token_mock(&mut server).await;

    let stream_body = format!(
        ": ping\n\
         data: {{\"progress\":10}}\n\
         data: {{broken json\n\
         data: {{\"progress\":100,\"html\":\"\"}}\n\
         data: {{\"progress\":100,\"html\":\"{}\"}}\n",
        RESULT_HTML
    );
    let search = server
        .mock("GET", "/get")
        .match_query(Matcher::UrlEncoded("token".into(), "tok-1".into()))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(stream_body)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let found = resolver
        .search(&query("com.example.app"))
        .await
        .unwrap()
        .expect("terminal event parses into a match");

    assert_eq!(found.title, "Example App");
    let MatchLink::Artifacts(artifacts) = found.link else {
        panic!("APKAD reports artifacts");
    };
    assert_eq!(artifacts.len(), 2);
    assert_eq!(artifacts[0].filename, "base.apk");
    assert_eq!(artifacts[0].url, "https://cdn.example.com/files/base.apk");
    // No label element: filename falls back to the URL's last path segment
    assert_eq!(artifacts[1].filename, "config.arm64_v8a.apk");

    token.assert_async().await;
    search.assert_async().await;
}

#[tokio::test]
async fn stream_ending_without_terminal_event_is_not_found() {
    let mut server = Server::new_async().await;
    token_mock(&mut server).await;
    server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("data: {\"progress\":10}\ndata: {\"progress\":95}\n")
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let result = resolver.search(&query("com.example.app")).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn terminal_event_on_a_final_unterminated_line_still_matches() {
    let mut server = Server::new_async().await;
    token_mock(&mut server).await;

    // No trailing newline after the terminal event
    let stream_body = format!(
        "data: {{\"progress\":10}}\ndata: {{\"progress\":100,\"html\":\"{}\"}}",
        RESULT_HTML
    );
    server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(stream_body)
        .create_async()
        .await;

    let resolver = resolver_for(&server);
    let found = resolver
        .search(&query("com.example.app"))
        .await
        .unwrap()
        .expect("terminal event on the last line parses into a match");
    assert_eq!(found.title, "Example App");
}

#[test]
fn fragment_without_artifact_container_is_not_a_match() {
    // A title alone is not enough
    let html = "<ul><li class=\"_title\">Example App</li></ul>";
    assert!(parse_result_fragment(html, "com.example.app").is_none());
}

#[test]
fn fragment_without_title_falls_back_to_the_package_identifier() {
    let html = "<div id=\"apkslist\">\
                <a href=\"https://cdn.example.com/files/base.apk\"></a></div>";
    let found = parse_result_fragment(html, "com.example.app").unwrap();
    assert_eq!(found.title, "com.example.app");
}

#[test]
fn fragment_with_empty_artifact_container_is_not_a_match() {
    let html = "<div id=\"apkslist\"></div>";
    assert!(parse_result_fragment(html, "com.example.app").is_none());
}
