//! Dashboard configuration resolved from the command line.

use crate::{error::ClientError, route::socket_url};

/// Page URL used when none is given
pub const DEFAULT_PAGE_URL: &str = "http://127.0.0.1:5000/";

/// Settings consumed by the runner
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Event stream URL
    pub socket_url: String,
    /// Maximum number of log lines kept
    pub log_capacity: usize,
    /// Whether metrics update the displayed counters from the start
    pub show_stats: bool,
    /// Whether to read commands from an interactive line editor
    pub interactive: bool,
}

impl DashboardConfig {
    /// Resolve the socket URL and build the configuration.
    ///
    /// An explicit `socket_url` wins over the one derived from `page_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidPageUrl`] if the socket URL has to be
    /// derived and `page_url` has no scheme or host.
    pub fn resolve(
        page_url: &str,
        explicit_socket_url: Option<String>,
        log_capacity: usize,
        show_stats: bool,
    ) -> Result<Self, ClientError> {
        let socket_url = match explicit_socket_url {
            Some(url) => url,
            None => socket_url(page_url)?,
        };

        Ok(Self {
            socket_url,
            log_capacity: log_capacity.max(1),
            show_stats,
            interactive: true,
        })
    }

    /// Disable the interactive line editor (e.g. when stdin is not a terminal)
    pub fn non_interactive(mut self) -> Self {
        self.interactive = false;
        self
    }
}
