//! Output side of the dashboard.

use std::io::Write;

use crate::{dispatcher::Update, formatter::DashboardFormatter};

/// Prompt shown by the interactive line editor
pub const PROMPT: &str = "sweetdash> ";

/// Where dashboard output goes
#[cfg_attr(test, mockall::automock)]
pub trait Screen: Send {
    /// Show a block of text
    fn show(&mut self, text: &str);
}

/// Screen writing to stdout
///
/// When interactive, the prompt is redisplayed after every block so that
/// pushed events do not leave the line editor without one.
pub struct TerminalScreen {
    interactive: bool,
}

impl TerminalScreen {
    pub fn new(interactive: bool) -> Self {
        Self { interactive }
    }
}

impl Screen for TerminalScreen {
    fn show(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        if self.interactive {
            // clear the pending prompt before printing over it
            write!(stdout, "\r\x1b[2K").ok();
        }
        writeln!(stdout, "{}", text).ok();
        if self.interactive {
            write!(stdout, "{}", PROMPT).ok();
        }
        stdout.flush().ok();
    }
}

/// Render one dashboard update
pub fn render_update(screen: &mut dyn Screen, update: &Update) {
    match update {
        Update::Logged(entry) => screen.show(&DashboardFormatter::format_log_entry(entry)),
        Update::DeviceUpserted(record) => {
            screen.show(&DashboardFormatter::format_device_update(record))
        }
        Update::CounterUpdated { name, value } => {
            screen.show(&DashboardFormatter::format_counter(name, value))
        }
        Update::Disconnected { banner, entry } => {
            screen.show(&DashboardFormatter::format_log_entry(entry));
            screen.show(&DashboardFormatter::format_banner(banner));
        }
    }
}
