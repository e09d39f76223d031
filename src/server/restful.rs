use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use actix_web::body::BoxBody;
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web::{self, Data};
use actix_web::{App, Error, HttpRequest, HttpResponse, HttpServer};
use anyhow::{Context, Result};
use log::info;
use sd_notify::NotifyState;

use super::handlers::client_info::ClientInfoHandler;
use super::handlers::Handler;
use super::response::Response;

pub struct RestfulServer {
    ctx: Arc<RestfulContext>,

    keep_alive_secs: Option<u64>,
    workers: Option<u64>,

    bind: String,
}

pub struct RestfulContext {
    pub client_info_handler: ClientInfoHandler,
}

/// A server that is bound to its sockets but not yet awaited.
pub struct ListeningServer {
    server: Server,
    addrs: Vec<SocketAddr>,
}

impl RestfulServer {
    const ROOT_PATH: &str = "/";

    pub fn new(bind: String, ctx: Arc<RestfulContext>) -> Self {
        Self {
            ctx,
            keep_alive_secs: None,
            workers: None,
            bind,
        }
    }

    pub fn set_keep_alive_secs(&mut self, keep_alive_secs: u64) {
        self.keep_alive_secs = Some(keep_alive_secs);
    }

    pub fn set_workers(&mut self, workers: u64) {
        self.workers = Some(workers);
    }

    pub fn build_app(
        ctx: Arc<RestfulContext>,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<BoxBody>,
            Error = Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(Data::new(ctx))
            .service(
                web::resource(Self::ROOT_PATH).route(web::get().to(Self::handle_client_info)),
            )
            .default_service(web::route().to(Self::default_handler))
    }

    pub fn listen(self) -> Result<ListeningServer> {
        let ctx = self.ctx.clone();
        let mut srv = HttpServer::new(move || Self::build_app(ctx.clone()));

        if let Some(keep_alive) = self.keep_alive_secs {
            srv = srv.keep_alive(Duration::from_secs(keep_alive));
        }
        if let Some(workers) = self.workers {
            srv = srv.workers(workers as usize);
        }

        info!("Binding to http://{}", self.bind);
        srv = srv
            .bind(&self.bind)
            .with_context(|| format!("bind to '{}'", self.bind))?;

        let addrs = srv.addrs();
        Ok(ListeningServer {
            server: srv.run(),
            addrs,
        })
    }

    pub async fn run(self) -> Result<()> {
        let srv = self.listen()?;

        sd_notify::notify(true, &[NotifyState::Ready]).context("notify systemd")?;
        info!("Starting restful server");
        srv.wait().await?;

        info!("Server stopped by user");
        Ok(())
    }

    async fn handle_client_info(
        req: HttpRequest,
        ctx: Data<Arc<RestfulContext>>,
    ) -> HttpResponse {
        ctx.client_info_handler.handle(&req).into()
    }

    async fn default_handler(req: HttpRequest) -> HttpResponse {
        let path = req.uri().path().to_string();
        let method = req.method().as_str().to_string();
        let message = format!("No route to {method} {path}");
        Response::not_found(message).into()
    }
}

impl ListeningServer {
    pub fn addrs(&self) -> &[SocketAddr] {
        &self.addrs
    }

    pub fn handle(&self) -> ServerHandle {
        self.server.handle()
    }

    /// Runs until the server is stopped, either through a [`ServerHandle`]
    /// or by SIGINT/SIGTERM.
    pub async fn wait(self) -> Result<()> {
        self.server.await.context("run server")
    }
}
