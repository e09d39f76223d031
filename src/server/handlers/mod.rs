use actix_web::HttpRequest;

use super::response::Response;

pub mod client_info;

pub trait Handler {
    fn handle(&self, req: &HttpRequest) -> Response;
}
