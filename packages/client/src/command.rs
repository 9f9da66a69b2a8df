//! Interactive commands typed at the dashboard prompt.

/// A command entered by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Print the device table
    Devices,
    /// Print the log view
    Log,
    /// Toggle the stats display
    Stats,
    Help,
    Quit,
    /// Anything else, kept verbatim for the hint
    Unknown(String),
}

impl Command {
    /// Command names and descriptions, in display order
    pub const HELP: [(&'static str, &'static str); 5] = [
        ("devices", "show the device table"),
        ("log", "show the log, newest first"),
        ("stats", "toggle the stats display"),
        ("help", "show this list"),
        ("quit", "leave the dashboard"),
    ];

    /// Parse one line of input. Blank lines yield `None`.
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        let command = match input.to_ascii_lowercase().as_str() {
            "devices" | "d" => Command::Devices,
            "log" | "l" => Command::Log,
            "stats" | "s" => Command::Stats,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            _ => Command::Unknown(input.to_string()),
        };
        Some(command)
    }
}
