use super::*;
use mockito::{Matcher, Server};

const SEARCH_PAGE: &str = r#"
<div class="content-apps">
  <a class="l_item" data-package="com.whatsapp.w4b" href="/business-whatsapp/com.whatsapp.w4b/">
    <div class="name">WhatsApp Business</div>
  </a>
  <a class="l_item" data-package="com.whatsapp" href="/whatsapp-messenger/com.whatsapp/">
    <div class="name">
      WhatsApp Messenger
    </div>
  </a>
</div>
"#;

#[tokio::test]
async fn search_scans_cards_for_the_exact_package() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search/com.whatsapp/")
        .with_status(200)
        .with_body(SEARCH_PAGE)
        .create_async()
        .await;

    let resolver =
        ApkCombo::with_base_url(&NetworkingConfig::default(), server.url()).unwrap();
    let found = resolver
        .search(&SearchQuery::new("com.whatsapp", None))
        .await
        .unwrap()
        .expect("exact package card present");

    assert_eq!(found.title, "WhatsApp Messenger");
    assert_eq!(
        found.link,
        MatchLink::Page(format!(
            "{}/whatsapp-messenger/com.whatsapp/",
            server.url()
        ))
    );
}

#[tokio::test]
async fn search_without_result_container_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", Matcher::Any)
        .with_status(200)
        .with_body("<html><body><div class=\"empty\">Nothing found</div></body></html>")
        .create_async()
        .await;

    let resolver =
        ApkCombo::with_base_url(&NetworkingConfig::default(), server.url()).unwrap();
    let result = resolver
        .search(&SearchQuery::new("com.missing.app", None))
        .await
        .unwrap();
    assert!(result.is_none());
}
