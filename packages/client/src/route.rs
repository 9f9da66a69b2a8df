//! Socket URL derivation from the page the backup service serves.

use tokio_tungstenite::tungstenite::http::Uri;

use crate::error::ClientError;

/// Path suffix of the event stream endpoint, relative to the page path
pub const SOCKET_PATH_SUFFIX: &str = "ws";

/// Derive the event stream URL from the dashboard page URL.
///
/// `http` becomes `ws`, anything else becomes `wss`. Host, port and path are
/// kept; login details, query and fragment are dropped. [`SOCKET_PATH_SUFFIX`]
/// is appended to the path.
///
/// # Examples
///
/// ```
/// use sweetdash_client::route::socket_url;
///
/// let url = socket_url("https://backup.example.net/dashboard/").unwrap();
/// assert_eq!(url, "wss://backup.example.net/dashboard/ws");
/// ```
pub fn socket_url(page_url: &str) -> Result<String, ClientError> {
    let uri: Uri = page_url
        .trim()
        .parse()
        .map_err(|_| ClientError::InvalidPageUrl(page_url.to_string()))?;

    let scheme = uri
        .scheme_str()
        .ok_or_else(|| ClientError::InvalidPageUrl(page_url.to_string()))?;
    let host = uri
        .host()
        .filter(|host| !host.is_empty())
        .ok_or_else(|| ClientError::InvalidPageUrl(page_url.to_string()))?;
    // host and port only, login details never reach the socket URL
    let host = match uri.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };

    let socket_scheme = if scheme.eq_ignore_ascii_case("http") {
        "ws"
    } else {
        "wss"
    };
    let path = match uri.path() {
        "" => "/",
        path => path,
    };

    Ok(format!(
        "{}://{}{}{}",
        socket_scheme, host, path, SOCKET_PATH_SUFFIX
    ))
}
