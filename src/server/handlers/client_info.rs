use std::net::SocketAddr;

use actix_web::HttpRequest;
use chrono::{SecondsFormat, Utc};
use log::debug;

use crate::server::response::Response;
use crate::types::client_info::ClientInfoResponse;

use super::Handler;

pub const HEADER_FORWARDED_FOR: &str = "X-Forwarded-For";

/// Reports the client address and the current server time.
///
/// The address comes from the first entry of `X-Forwarded-For` when a proxy
/// sets it, otherwise from the connection itself. Forwarded values are
/// trusted as-is: they are neither validated as IP addresses nor checked
/// against a list of known proxies.
pub struct ClientInfoHandler;

impl ClientInfoHandler {
    pub fn new() -> Self {
        Self
    }

    /// The `X-Forwarded-For` value, if the request carries a non-blank one.
    /// Repeated header lines are joined with `", "`, and bytes that are not
    /// valid UTF-8 are replaced rather than discarding the whole value.
    fn forwarded_for(req: &HttpRequest) -> Option<String> {
        let values: Vec<_> = req
            .headers()
            .get_all(HEADER_FORWARDED_FOR)
            .map(|value| String::from_utf8_lossy(value.as_bytes()))
            .collect();
        let value = values.join(", ");
        if value.trim().is_empty() {
            return None;
        }
        Some(value)
    }
}

impl Handler for ClientInfoHandler {
    fn handle(&self, req: &HttpRequest) -> Response {
        let timestamp = now_rfc3339();
        let forwarded_for = Self::forwarded_for(req);
        let ip = resolve_client_ip(forwarded_for.as_deref(), req.peer_addr());
        debug!(
            "- {} {}, peer: {:?}, forwarded_for: {:?}, ip: {:?}",
            req.method(),
            req.path(),
            req.peer_addr(),
            forwarded_for,
            ip
        );

        Response::json(ClientInfoResponse { timestamp, ip })
    }
}

/// Picks the client address: the first comma-separated entry of the
/// forwarded header (trimmed) when there is one, otherwise the peer's IP
/// without its port.
pub fn resolve_client_ip(
    forwarded_for: Option<&str>,
    peer_addr: Option<SocketAddr>,
) -> Option<String> {
    if let Some(value) = forwarded_for {
        let first = value.split(',').next().unwrap_or(value).trim();
        return Some(String::from(first));
    }
    peer_addr.map(|addr| addr.ip().to_string())
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false)
}
