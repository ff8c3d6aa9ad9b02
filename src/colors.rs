//! Terminal color control.
//!
//! Honors `NO_COLOR` (https://no-color.org/), `CLICOLOR_FORCE` and
//! `CLICOLOR`, in that order, then falls back to TTY detection on stdout.

use colored::control;

/// Whether output should be colored, given the relevant environment values
pub fn should_colorize(
    no_color: Option<&str>,
    clicolor_force: Option<&str>,
    clicolor: Option<&str>,
    stdout_is_tty: bool,
) -> bool {
    if no_color.is_some() {
        return false;
    }
    if clicolor_force.is_some_and(|v| v != "0") {
        return true;
    }
    if clicolor == Some("0") {
        return false;
    }
    stdout_is_tty
}

/// Configure `colored` for the whole process; call early in `main`
pub fn init_colors() {
    let no_color = std::env::var("NO_COLOR").ok();
    let force = std::env::var("CLICOLOR_FORCE").ok();
    let clicolor = std::env::var("CLICOLOR").ok();
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());

    control::set_override(should_colorize(
        no_color.as_deref(),
        force.as_deref(),
        clicolor.as_deref(),
        is_tty,
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_wins() {
        assert!(!should_colorize(Some(""), Some("1"), None, true));
    }

    #[test]
    fn test_force_overrides_tty_and_clicolor() {
        assert!(should_colorize(None, Some("1"), Some("0"), false));
        assert!(!should_colorize(None, Some("0"), None, false));
    }

    #[test]
    fn test_clicolor_zero_and_tty_default() {
        assert!(!should_colorize(None, None, Some("0"), true));
        assert!(should_colorize(None, None, Some("1"), true));
        assert!(!should_colorize(None, None, None, false));
    }
}
