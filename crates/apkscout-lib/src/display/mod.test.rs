use super::*;
use crate::sites::Artifact;
use crate::sites::Site;
use crate::terminal::TerminalColorCaps;

fn plain() -> StatusDisplay {
    StatusDisplay::new(&TerminalCapabilities {
        color: TerminalColorCaps::None,
        is_tty: false,
    })
}

fn report(site: Site, outcome: SiteOutcome) -> SiteReport {
    SiteReport { site, outcome }
}

#[test]
fn found_page_renders_title_line_and_indented_link() {
    let lines = plain().render(&report(
        Site::ApkPure,
        SiteOutcome::Found {
            title: "WhatsApp".to_string(),
            link: MatchLink::Page("https://apkpure.net/whatsapp".to_string()),
        },
    ));
    assert_eq!(
        lines,
        vec![
            "✓ WhatsApp on APKPure".to_string(),
            "  https://apkpure.net/whatsapp".to_string(),
        ]
    );
}

#[test]
fn found_artifacts_render_one_bullet_per_variant() {
    let lines = plain().render(&report(
        Site::Apkad,
        SiteOutcome::Found {
            title: "MyApp".to_string(),
            link: MatchLink::Artifacts(vec![
                Artifact {
                    filename: "myapp_arm64.apk".to_string(),
                    url: "https://cdn.example.com/a".to_string(),
                },
                Artifact {
                    filename: "myapp_x86.apk".to_string(),
                    url: "https://cdn.example.com/b".to_string(),
                },
            ]),
        },
    ));
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "✓ MyApp on APKAD");
    assert_eq!(lines[1], "  • myapp_arm64.apk https://cdn.example.com/a");
    assert_eq!(lines[2], "  • myapp_x86.apk https://cdn.example.com/b");
}

#[test]
fn version_outcomes_distinguish_empty_history_from_absent_label() {
    let display = plain();
    let empty = display.render(&report(
        Site::ApkPure,
        SiteOutcome::VersionNotFound {
            title: "MyApp".to_string(),
            listed: 0,
        },
    ));
    assert_eq!(
        empty,
        vec!["! APKPure: MyApp found, but the site lists no versions".to_string()]
    );

    let absent = display.render(&report(
        Site::ApkPure,
        SiteOutcome::VersionNotFound {
            title: "MyApp".to_string(),
            listed: 4,
        },
    ));
    assert_eq!(
        absent,
        vec!["! APKPure: MyApp found, but none of the 4 listed versions match".to_string()]
    );
}

#[test]
fn not_found_and_unreachable_render_single_lines() {
    let display = plain();
    assert_eq!(
        display.render(&report(Site::ApkFab, SiteOutcome::NotFound)),
        vec!["✗ APKFab: not found".to_string()]
    );
    assert_eq!(
        display.render(&report(
            Site::AppTeka,
            SiteOutcome::Unreachable {
                reason: "connection refused".to_string(),
            },
        )),
        vec!["! AppTeka: unreachable (connection refused)".to_string()]
    );
}

#[test]
fn styling_is_applied_only_when_color_is_enabled() {
    let colored = StyleManager::new(&TerminalCapabilities {
        color: TerminalColorCaps::Ansi16,
        is_tty: true,
    });
    assert!(colored.format_success("ok").contains("\x1b["));

    let plain = StyleManager::new(&TerminalCapabilities {
        color: TerminalColorCaps::None,
        is_tty: false,
    });
    assert_eq!(plain.format_success("ok"), "✓ ok");
}
