use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

/// Terminal preferences for table output, fixed once per process.
#[derive(Clone, Copy, Debug, Default)]
pub struct UiPrefs {
    pub table_color: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

/// `HLM_COLOR=always|never` wins over terminal detection and `NO_COLOR`.
fn color_wanted(flags: &GlobalFlags, stdout_is_tty: bool) -> bool {
    if flags.format != OutputFormat::Table || flags.quiet {
        return false;
    }
    match std::env::var("HLM_COLOR").ok().as_deref() {
        Some("always") => true,
        Some("never") => false,
        _ => stdout_is_tty && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Narrow terminals are ignored; tables below 40 columns are unreadable anyway.
fn parse_width(raw: Option<String>) -> Option<usize> {
    raw.and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|width| *width >= 40)
}

pub fn init(flags: &GlobalFlags) {
    let prefs = UiPrefs {
        table_color: color_wanted(flags, std::io::stdout().is_terminal()),
        term_width: parse_width(std::env::var("COLUMNS").ok()),
    };
    let _ = UI_PREFS.set(prefs);
}

#[must_use]
pub fn prefs() -> UiPrefs {
    UI_PREFS.get().copied().unwrap_or_default()
}
