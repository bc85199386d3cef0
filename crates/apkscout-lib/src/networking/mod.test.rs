use super::*;
use mockito::Server;

#[tokio::test]
async fn session_builds_with_default_config() {
    let session = SiteSession::new(&NetworkingConfig::default(), HeaderMap::new());
    assert!(session.is_ok(), "Should build a site session");
}

#[tokio::test]
async fn request_tracing_session_still_resolves_normally() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/ping")
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let config = NetworkingConfig {
        timeout_seconds: 5,
        trace_requests: true,
    };
    let session = SiteSession::new(&config, HeaderMap::new()).unwrap();
    let response = session
        .client()
        .get(format!("{}/ping", server.url()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    mock.assert_async().await;
}

#[tokio::test]
async fn frozen_client_reports_redirects_instead_of_following() {
    let mut server = Server::new_async().await;
    let redirect = server
        .mock("GET", "/APK/com.example.app")
        .with_status(302)
        .with_header("Location", "https://files.example.com/app.apk")
        .create_async()
        .await;
    let target = server
        .mock("GET", "/app.apk")
        .with_status(200)
        .expect(0)
        .create_async()
        .await;

    let session = SiteSession::new(&NetworkingConfig::default(), HeaderMap::new()).unwrap();
    let response = session
        .frozen()
        .get(format!("{}/APK/com.example.app", server.url()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 302);
    assert_eq!(
        response
            .headers()
            .get("Location")
            .and_then(|v| v.to_str().ok()),
        Some("https://files.example.com/app.apk")
    );
    redirect.assert_async().await;
    target.assert_async().await;
}

#[tokio::test]
async fn default_headers_are_sent_on_every_request() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .match_header("dnt", "1")
        .with_status(200)
        .with_body("ok")
        .create_async()
        .await;

    let mut headers = HeaderMap::new();
    headers.insert("dnt", "1".parse().unwrap());
    let session = SiteSession::new(&NetworkingConfig::default(), headers).unwrap();

    let response = session
        .client()
        .get(format!("{}/search", server.url()))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
    mock.assert_async().await;
}

#[tokio::test]
async fn fan_out_preserves_input_order() {
    let results = fan_out(2, vec![3u64, 1, 2], |n| async move {
        tokio::time::sleep(std::time::Duration::from_millis(n * 5)).await;
        n * 10
    })
    .await
    .unwrap();

    assert_eq!(results, vec![30, 10, 20]);
}

#[tokio::test]
async fn fan_out_rejects_zero_jobs_and_empty_input() {
    let zero = fan_out(0, vec![1], |n| async move { n }).await;
    assert!(matches!(
        zero,
        Err(NetworkingError::InvalidJobCount { count: 0 })
    ));

    let empty = fan_out(2, Vec::<u8>::new(), |n| async move { n }).await;
    assert!(matches!(empty, Err(NetworkingError::NoSitesProvided)));
}
