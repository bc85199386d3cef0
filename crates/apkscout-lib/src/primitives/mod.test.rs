use super::*;

#[test]
fn log_level_from_verbosity_maps_full_range() {
    assert_eq!(LogLevel::from_verbosity(0), LogLevel::Error);
    assert_eq!(LogLevel::from_verbosity(1), LogLevel::Warning);
    assert_eq!(LogLevel::from_verbosity(2), LogLevel::Info);
    assert_eq!(LogLevel::from_verbosity(3), LogLevel::Debug);
    assert_eq!(LogLevel::from_verbosity(4), LogLevel::Trace);
    // Anything beyond trace saturates
    assert_eq!(LogLevel::from_verbosity(200), LogLevel::Trace);
}

#[test]
fn log_level_should_log_respects_ordering() {
    assert!(LogLevel::Error.should_log(LogLevel::Trace));
    assert!(LogLevel::Info.should_log(LogLevel::Info));
    assert!(!LogLevel::Debug.should_log(LogLevel::Warning));
}

#[test]
fn value_enums_parse_primary_names_and_aliases() {
    assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);
    assert_eq!("verbose".parse::<LogLevel>().unwrap(), LogLevel::Trace);
    assert_eq!("plain".parse::<LogFormat>().unwrap(), LogFormat::Text);
    assert_eq!("yml".parse::<LogFormat>().unwrap(), LogFormat::Yaml);
    assert_eq!("stdout".parse::<LogOutput>().unwrap(), LogOutput::Stdout);
    assert_eq!("auto".parse::<ColorIntent>().unwrap(), ColorIntent::Auto);
}

#[test]
fn value_enum_parse_rejects_unknown_values() {
    let err = "loud".parse::<LogLevel>().unwrap_err();
    assert!(matches!(err, ConfigError::ParseError { .. }));
}

#[test]
fn log_context_tracks_progress() {
    let mut ctx = LogContext::with_progress("site search", 6);
    assert_eq!(ctx.total_items, Some(6));
    assert_eq!(ctx.current_item, None);
    ctx.set_progress(3);
    assert_eq!(ctx.current_item, Some(3));
}
