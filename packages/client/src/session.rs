//! WebSocket session: one connection, one event loop.
//!
//! Inbound frames and user commands are handled in arrival order by a
//! single task that owns the [`Dashboard`]. Nothing is ever sent on the
//! socket and a lost connection is never re-established.

use std::ops::ControlFlow;

use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_tungstenite::{
    connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    command::Command,
    dispatcher::{Dashboard, NETWORK_ERROR_BANNER},
    dto::decode_message,
    error::ClientError,
    formatter::DashboardFormatter,
    screen::{Screen, render_update},
};

/// Connect to `url` and run the dashboard until the user quits.
///
/// When the connection closes the banner is shown and commands keep being
/// served against the last known state. The session ends on `quit`, or once
/// the connection is gone and the command channel is closed.
///
/// # Errors
///
/// Returns [`ClientError::ConnectionError`] if the connection cannot be
/// established.
pub async fn run_session(
    url: &str,
    mut dashboard: Dashboard,
    screen: &mut dyn Screen,
    mut commands: mpsc::UnboundedReceiver<Command>,
) -> Result<Dashboard, ClientError> {
    let (mut stream, response) = connect_async(url)
        .await
        .map_err(|e| ClientError::ConnectionError(e.to_string()))?;
    tracing::info!(
        "Connected to event stream at {} (HTTP {})",
        url,
        response.status()
    );

    let mut connected = true;
    let mut input_open = true;

    loop {
        tokio::select! {
            frame = stream.next(), if connected => {
                if handle_frame(frame, &mut dashboard, screen).is_break() {
                    let update = dashboard.connection_closed();
                    render_update(screen, &update);
                    connected = false;
                    if !input_open {
                        break;
                    }
                }
            }
            command = commands.recv(), if input_open => {
                match command {
                    Some(command) => {
                        if handle_command(&mut dashboard, command, screen).is_break() {
                            break;
                        }
                    }
                    None => {
                        tracing::debug!("Command input closed");
                        input_open = false;
                        if !connected {
                            break;
                        }
                    }
                }
            }
            else => break,
        }
    }

    Ok(dashboard)
}

/// Handle one frame from the socket.
///
/// Breaks when the connection is gone: close frame, read error or end of
/// stream.
pub fn handle_frame(
    frame: Option<Result<Message, tungstenite::Error>>,
    dashboard: &mut Dashboard,
    screen: &mut dyn Screen,
) -> ControlFlow<()> {
    match frame {
        Some(Ok(Message::Text(text))) => {
            match decode_message(text.as_str()) {
                Ok(message) => {
                    if let Some(update) = dashboard.dispatch(message) {
                        render_update(screen, &update);
                    }
                }
                Err(e) => {
                    tracing::warn!("{}", e);
                    screen.show(&DashboardFormatter::format_raw_message(text.as_str()));
                }
            }
            ControlFlow::Continue(())
        }
        Some(Ok(Message::Binary(data))) => {
            screen.show(&DashboardFormatter::format_binary_message(data.len()));
            ControlFlow::Continue(())
        }
        Some(Ok(Message::Close(frame))) => {
            tracing::info!("Server closed the connection: {:?}", frame);
            ControlFlow::Break(())
        }
        Some(Ok(_)) => ControlFlow::Continue(()),
        Some(Err(e)) => {
            tracing::warn!("WebSocket read error: {}", e);
            ControlFlow::Break(())
        }
        None => {
            tracing::info!("Event stream ended");
            ControlFlow::Break(())
        }
    }
}

/// Handle one user command. Breaks on `quit`.
///
/// Once the connection is gone the device table is replaced by the banner.
pub fn handle_command(
    dashboard: &mut Dashboard,
    command: Command,
    screen: &mut dyn Screen,
) -> ControlFlow<()> {
    match command {
        Command::Devices if dashboard.is_disconnected() => {
            screen.show(&DashboardFormatter::format_banner(NETWORK_ERROR_BANNER))
        }
        Command::Devices => {
            let now = dashboard.clock().now();
            screen.show(&DashboardFormatter::format_device_table(
                dashboard.devices(),
                &now,
            ));
        }
        Command::Log => screen.show(&DashboardFormatter::format_log_view(dashboard.log())),
        Command::Stats => {
            let show_stats = dashboard.toggle_stats();
            screen.show(&DashboardFormatter::format_stats(
                show_stats,
                dashboard.counters(),
            ));
        }
        Command::Help => screen.show(&DashboardFormatter::format_help()),
        Command::Quit => {
            tracing::info!("Leaving the dashboard");
            return ControlFlow::Break(());
        }
        Command::Unknown(input) => {
            screen.show(&DashboardFormatter::format_unknown_command(&input))
        }
    }
    ControlFlow::Continue(())
}
