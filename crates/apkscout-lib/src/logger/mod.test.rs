use super::*;

#[test]
fn log_context_defaults_to_no_progress() {
    let context = LogContext::new("resolve");
    assert_eq!(context.operation, "resolve");
    assert_eq!(context.total_items, None);
    assert_eq!(context.current_item, None);
}

#[test]
fn progress_context_flows_through_the_logging_facade() {
    use crate::terminal::TerminalCapabilities;

    let config = LoggerConfig {
        level: LogLevel::Info,
        format: LogFormat::Text,
        output: LogOutput::Stderr,
        terminal_caps: TerminalCapabilities::detect(ColorIntent::Never),
    };
    // Parallel tests may have initialized the logger already
    let logger = match Logger::init(config) {
        Ok(logger) => logger,
        Err(LoggerError::AlreadyInitialized) => Logger::global().unwrap(),
        Err(e) => panic!("logger init failed: {e}"),
    };

    let mut context = LogContext::with_progress("site resolution", 3);
    context.set_progress(1);
    logger.info("apkpure resolved", Some(context.clone()));
    logger.warn("appteka unreachable: connection refused", Some(context));
    logger.info("resolution finished", None);
}

#[test]
fn logger_global_matches_initialization_state() {
    // Note: other tests in the process may have initialized the logger;
    // only the invariant between the two accessors is checked here.
    assert!(!Logger::is_initialized() || Logger::global().is_some());
}
