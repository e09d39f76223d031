use serde::{Deserialize, Serialize};

/// What the server knows about the client that sent a request.
///
/// Fields are serialized in declaration order, so `timestamp` always comes
/// before `ip` in the JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientInfoResponse {
    /// Server time when the request was handled, RFC 3339 in UTC
    /// (`2024-01-01T12:00:00.123456+00:00`).
    pub timestamp: String,

    /// Client address, taken from the first `X-Forwarded-For` entry if
    /// present, otherwise from the connection. `None` when neither is known.
    pub ip: Option<String>,
}
