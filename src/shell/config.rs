//! Start-up configuration of the shell.

use super::log::Level;
use super::mode::Mode;

/// Start-up configuration.
///
/// # Examples
///
/// ```rust
/// use libcdli::shell::{Config, Level, Mode};
///
/// let config = Config::new("Weather Station")
///     .with_copyright("(C) 2024 ACME")
///     .with_initial_mode(Mode::Debug)
///     .with_threshold(Level::Info);
///
/// assert_eq!(config.prompt_char, '%');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Project name printed in the banner. Empty to skip it.
    pub project_name: &'static str,
    /// Copyright line printed under the project name.
    pub project_copyright: Option<&'static str>,
    /// Character shown before `"> "` in the prompt.
    pub prompt_char: char,
    /// Character the banner divider lines are drawn with.
    pub divider_char: char,
    /// Mode the shell starts in.
    pub initial_mode: Mode,
    /// Initial debug threshold.
    pub threshold: Level,
    /// Echo typed characters back while in Command mode.
    pub echo: bool,
    /// Line that switches from Command to Debug mode.
    pub enter_debug: &'static str,
    /// Line that switches from Debug to Command mode.
    pub enter_command: &'static str,
}

impl Default for Config {
    fn default() -> Self {
        Self::new("")
    }
}

impl Config {
    /// Default configuration for `project_name`.
    pub const fn new(project_name: &'static str) -> Self {
        Self {
            project_name,
            project_copyright: None,
            prompt_char: '%',
            divider_char: '*',
            initial_mode: Mode::Command,
            threshold: Level::Debug,
            echo: false,
            enter_debug: "---",
            enter_command: "+++",
        }
    }

    /// Sets the banner copyright line.
    pub const fn with_copyright(mut self, copyright: &'static str) -> Self {
        self.project_copyright = Some(copyright);
        self
    }

    /// Sets the prompt character.
    pub const fn with_prompt_char(mut self, prompt_char: char) -> Self {
        self.prompt_char = prompt_char;
        self
    }

    /// Sets the start-up mode.
    pub const fn with_initial_mode(mut self, mode: Mode) -> Self {
        self.initial_mode = mode;
        self
    }

    /// Sets the initial debug threshold.
    pub const fn with_threshold(mut self, threshold: Level) -> Self {
        self.threshold = threshold;
        self
    }

    /// Enables or disables local echo.
    pub const fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Sets the two mode-switch lines.
    pub const fn with_mode_switches(
        mut self,
        enter_debug: &'static str,
        enter_command: &'static str,
    ) -> Self {
        self.enter_debug = enter_debug;
        self.enter_command = enter_command;
        self
    }
}
