//! Shared HTML and wire fixtures for the end-to-end tests
//!
//! Response bodies mirror the markup shapes the resolvers scrape in
//! production, trimmed to the elements the selectors actually touch.

/// APKPure search results: an inexact match ranked above the exact one
pub const APKPURE_SEARCH_WHATSAPP: &str = r#"
<div class="apk-list">
  <a class="apk-item" href="/gb-whatsapp/com.gbwhatsapp" title="GB WhatsApp"
     data-dt-pkg="com.gbwhatsapp"></a>
  <a class="apk-item" href="/whatsapp/com.whatsapp" title="WhatsApp"
     data-dt-pkg="com.whatsapp"></a>
</div>
"#;

/// APKPure search results with no exact candidate at all
pub const APKPURE_SEARCH_NO_MATCH: &str = r#"
<div class="apk-list">
  <a class="apk-item" href="/other/com.other.app" title="Other App"
     data-dt-pkg="com.other.app"></a>
</div>
"#;

/// APKPure version history page with two entries, newest first
pub const APKPURE_VERSIONS: &str = r#"
<ul class="version-list">
  <li class="version dt-version-item">
    <a class="dt-version-icon" href="/whatsapp/com.whatsapp/download/2.2.0"></a>
    <div class="version-info"><span class="name one-line">2.2.0</span></div>
  </li>
  <li class="version dt-version-item">
    <a class="dt-version-icon" href="/whatsapp/com.whatsapp/download/2.1.0"></a>
    <div class="version-info"><span class="name one-line">2.1.0</span></div>
  </li>
</ul>
"#;

/// APKAD result fragment with a title and two downloadable artifacts
pub const APKAD_RESULT_FRAGMENT: &str = r#"
<ul><li class="_title">MyApp</li></ul>
<div id="apkslist">
  <a href="https://cdn.example.com/myapp_arm64.apk"><span class="der_name">myapp_arm64.apk</span></a>
  <a href="https://cdn.example.com/myapp_x86.apk"><span class="der_name">myapp_x86.apk</span></a>
</div>
"#;

/// One push-stream line in the `data: ` framing the APKAD endpoint emits
pub fn stream_line(progress: u64, html: &str) -> String {
    format!(
        "data: {}\n",
        serde_json::json!({ "progress": progress, "html": html })
    )
}

/// Token endpoint response body
pub fn token_body(success: bool, token: &str, timestamp: i64) -> String {
    if success {
        serde_json::json!({ "success": true, "token": token, "timestamp": timestamp }).to_string()
    } else {
        serde_json::json!({ "success": false }).to_string()
    }
}
