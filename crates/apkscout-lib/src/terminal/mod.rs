//! Terminal color capability detection
//!
//! Resolves the configured color intent (auto/always/never) against the
//! actual terminal: TTY check plus COLORTERM/TERM environment hints. The
//! result feeds both the tracing logger (ANSI on/off) and the display
//! layer (styled status lines).

use crate::primitives::ColorIntent;
use std::io::IsTerminal;

/// Color depth the terminal is believed to support
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminalColorCaps {
    None,
    Ansi16,
    Ansi256,
    TrueColor,
}

/// Resolved terminal capabilities for one process invocation
#[derive(Debug, Clone)]
pub struct TerminalCapabilities {
    pub color: TerminalColorCaps,
    pub is_tty: bool,
}

impl TerminalCapabilities {
    /// Detect capabilities honoring the configured intent
    pub fn detect(intent: ColorIntent) -> Self {
        let is_tty = std::io::stderr().is_terminal();

        let color = match intent {
            ColorIntent::Never => TerminalColorCaps::None,
            ColorIntent::Always => color_from_environment().max_ansi16(),
            ColorIntent::Auto => {
                if is_tty {
                    color_from_environment()
                } else {
                    TerminalColorCaps::None
                }
            }
        };

        Self { color, is_tty }
    }

    /// Whether any ANSI styling should be emitted
    pub fn color_enabled(&self) -> bool {
        self.color != TerminalColorCaps::None
    }
}

impl TerminalColorCaps {
    /// Forced-on intent still deserves at least basic ANSI
    fn max_ansi16(self) -> Self {
        match self {
            TerminalColorCaps::None => TerminalColorCaps::Ansi16,
            other => other,
        }
    }
}

/// Classify color support from COLORTERM/TERM, the conventional hints
fn color_from_environment() -> TerminalColorCaps {
    if let Ok(colorterm) = std::env::var("COLORTERM") {
        let colorterm = colorterm.to_lowercase();
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return TerminalColorCaps::TrueColor;
        }
    }

    match std::env::var("TERM") {
        Ok(term) if term == "dumb" || term.is_empty() => TerminalColorCaps::None,
        Ok(term) if term.contains("256color") => TerminalColorCaps::Ansi256,
        Ok(_) => TerminalColorCaps::Ansi16,
        Err(_) => TerminalColorCaps::None,
    }
}

#[cfg(test)]
mod tests {
    include!("mod.test.rs");
}
