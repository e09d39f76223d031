use std::sync::Arc;

use super::config::ServerConfig;
use super::handlers::client_info::ClientInfoHandler;
use super::restful::{RestfulContext, RestfulServer};

pub struct ServerFactory {
    cfg: ServerConfig,
}

impl ServerFactory {
    pub fn new(cfg: ServerConfig) -> Self {
        Self { cfg }
    }

    pub fn build_server(&self) -> RestfulServer {
        let ctx = self.build_context();

        let mut srv = RestfulServer::new(self.cfg.bind.clone(), ctx);
        if self.cfg.keep_alive_secs > 0 {
            srv.set_keep_alive_secs(self.cfg.keep_alive_secs);
        }
        if self.cfg.workers > 0 {
            srv.set_workers(self.cfg.workers);
        }

        srv
    }

    pub fn build_context(&self) -> Arc<RestfulContext> {
        let client_info_handler = ClientInfoHandler::new();

        let ctx = RestfulContext {
            client_info_handler,
        };
        Arc::new(ctx)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::CommonConfig;

    use super::*;

    #[actix_web::test]
    async fn test_build_server() {
        let mut cfg = <ServerConfig as CommonConfig>::default();
        cfg.bind = String::from("127.0.0.1:0");
        cfg.keep_alive_secs = 5;
        cfg.workers = 1;
        cfg.complete().unwrap();

        let factory = ServerFactory::new(cfg);
        let srv = factory.build_server().listen().unwrap();
        assert!(srv.addrs()[0].ip().is_loopback());
    }
}
