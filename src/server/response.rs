use actix_web::http::StatusCode;
use actix_web::{HttpResponse, HttpResponseBuilder};
use serde::Serialize;

use crate::types::response::{CommonResponse, MIME_JSON};

/// A wrapper struct for HTTP responses that provides convenient methods
/// for creating common response types
pub struct Response {
    http_response: HttpResponse,
}

impl Response {
    /// Serializes `data` as the whole response body. Unlike the error
    /// responses, the payload is not wrapped in a [`CommonResponse`].
    pub fn json<T: Serialize>(data: T) -> Self {
        let http_response = match serde_json::to_vec(&data) {
            Ok(body) => HttpResponse::Ok().content_type(MIME_JSON).body(body),
            Err(e) => {
                return Self::error(&format!("Encode JSON failed: {e}"));
            }
        };
        Self { http_response }
    }

    pub fn not_found(message: impl AsRef<str>) -> Self {
        Self::err_response(StatusCode::NOT_FOUND, message.as_ref().to_string())
    }

    pub fn error(message: &str) -> Self {
        let message = format!("Server error: {message}");
        Self::err_response(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    fn err_response(status: StatusCode, message: String) -> Self {
        let resp = CommonResponse {
            code: status.into(),
            message: Some(message),
        };
        Self {
            http_response: HttpResponseBuilder::new(status).json(resp),
        }
    }
}

impl From<Response> for HttpResponse {
    fn from(val: Response) -> Self {
        val.http_response
    }
}
