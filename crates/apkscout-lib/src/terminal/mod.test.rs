use super::*;

#[test]
fn never_intent_disables_color_unconditionally() {
    let caps = TerminalCapabilities::detect(ColorIntent::Never);
    assert_eq!(caps.color, TerminalColorCaps::None);
    assert!(!caps.color_enabled());
}

#[test]
fn always_intent_yields_at_least_basic_ansi() {
    let caps = TerminalCapabilities::detect(ColorIntent::Always);
    assert_ne!(caps.color, TerminalColorCaps::None);
    assert!(caps.color_enabled());
}

#[test]
fn max_ansi16_only_promotes_none() {
    assert_eq!(TerminalColorCaps::None.max_ansi16(), TerminalColorCaps::Ansi16);
    assert_eq!(
        TerminalColorCaps::TrueColor.max_ansi16(),
        TerminalColorCaps::TrueColor
    );
}
