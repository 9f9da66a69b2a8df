//! Dashboard execution: wires configuration, input and screen to a session.

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::mpsc;

use crate::{
    command::Command,
    config::DashboardConfig,
    dispatcher::Dashboard,
    error::ClientError,
    formatter::DashboardFormatter,
    screen::{PROMPT, Screen, TerminalScreen},
    session::run_session,
};

/// Run the dashboard against the configured event stream.
///
/// There is no reconnect: the returned dashboard reports
/// [`Dashboard::is_disconnected`] if the stream went away before the user
/// quit.
pub async fn run_dashboard(config: DashboardConfig) -> Result<Dashboard, ClientError> {
    tracing::info!("Connecting to {}", config.socket_url);

    let dashboard = Dashboard::new(config.log_capacity, config.show_stats);
    let mut screen = TerminalScreen::new(config.interactive);
    let (command_tx, command_rx) = mpsc::unbounded_channel();

    if config.interactive {
        screen.show(&DashboardFormatter::format_help());
        spawn_line_editor(command_tx);
    } else {
        drop(command_tx);
    }

    run_session(&config.socket_url, dashboard, &mut screen, command_rx).await
}

/// Read commands on a blocking thread and forward them to the session.
///
/// The thread ends on Ctrl+D or when the session is gone. Ctrl+C sends
/// [`Command::Quit`].
fn spawn_line_editor(command_tx: mpsc::UnboundedSender<Command>) {
    std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                tracing::error!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(PROMPT) {
                Ok(line) => {
                    let Some(command) = Command::parse(&line) else {
                        continue;
                    };
                    rl.add_history_entry(line.trim()).ok();
                    if command_tx.send(command).is_err() {
                        // Session ended
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    tracing::info!("Interrupted");
                    command_tx.send(Command::Quit).ok();
                    break;
                }
                Err(ReadlineError::Eof) => {
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });
}
