//! Bibliotek JSON API Server

use std::process;

use salvo::{
    affix_state::inject,
    oapi::{
        OpenApi,
        security::{Http, HttpAuthScheme, SecurityScheme},
        swagger_ui::SwaggerUi,
    },
    prelude::*,
    trailing_slash::remove_slash,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bibliotek_app::{context::AppContext, integrations::accounting::AccountingClient};

use crate::{config::ServerConfig, state::State};

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod auth;
mod authors;
mod books;
mod config;
mod extensions;
mod healthcheck;
mod home;
mod integrations;
mod loans;
mod shutdown;
mod state;
mod store;
#[cfg(test)]
mod test_helpers;

/// Bibliotek JSON API Server entry point
///
/// # Panics
///
/// Panics if the server fails to bind or serve requests
#[tokio::main]
pub async fn main() {
    // Load configuration from .env and CLI arguments
    let config = ServerConfig::load().unwrap_or_else(|e| {
        #[expect(
            clippy::print_stderr,
            reason = "logging not initialized yet, must use eprintln for config errors"
        )]
        {
            eprintln!("Configuration error: {e}");
        }

        process::exit(1);
    });

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let addr = config.socket_addr();

    info!("Starting server on {addr}");

    // Bind server
    let listener = TcpListener::new(addr).bind().await;

    let accounting = match AccountingClient::new(config.accounting_config()) {
        Ok(accounting) => accounting,
        Err(client_error) => {
            error!("failed to build accounting client: {client_error}");

            process::exit(1);
        }
    };

    let app = match AppContext::from_database_url(&config.database_url, accounting).await {
        Ok(app) => app,
        Err(init_error) => {
            error!("failed to initialize app context: {init_error}");

            process::exit(1);
        }
    };

    let router = Router::new()
        .hoop(CatchPanic::new())
        .hoop(remove_slash())
        .hoop(inject(State::from_app_context(app)))
        .push(Router::with_path("healthcheck").get(healthcheck::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .get(home::handler)
                .push(
                    Router::with_path("authors")
                        .get(authors::index::handler)
                        .post(authors::create::handler)
                        .push(
                            Router::with_path("{author}")
                                .get(authors::get::handler)
                                .put(authors::update::handler)
                                .delete(authors::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("books")
                        .get(books::index::handler)
                        .post(books::create::handler)
                        .push(Router::with_path("import").post(books::import::handler))
                        .push(
                            Router::with_path("{book}")
                                .get(books::get::handler)
                                .put(books::update::handler)
                                .delete(books::delete::handler),
                        ),
                )
                .push(
                    Router::with_path("loans")
                        .push(Router::with_path("mine").get(loans::mine::handler))
                        .push(Router::with_path("borrowed").get(loans::borrowed::handler))
                        .push(Router::with_path("{copy}/renew").post(loans::renew::handler)),
                )
                .push(
                    Router::with_path("store")
                        .get(store::index::handler)
                        .push(
                            Router::with_path("items/{book}")
                                .post(store::add_item::handler)
                                .delete(store::remove_item::handler),
                        )
                        .push(Router::with_path("clear").post(store::clear::handler))
                        .push(Router::with_path("cart/{cart}").get(store::cart_detail::handler)),
                )
                .push(
                    Router::with_path("integrations")
                        .get(integrations::status::handler)
                        .push(
                            Router::with_path("accounting")
                                .delete(integrations::disconnect::handler)
                                .push(
                                    Router::with_path("connect")
                                        .get(integrations::connect::handler),
                                )
                                .push(
                                    Router::with_path("callback")
                                        .get(integrations::callback::handler),
                                ),
                        ),
                ),
        );

    let doc = OpenApi::new("Bibliotek API", "0.1.0")
        .add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        )
        .merge_router(&router);

    let router = router
        .push(doc.into_router("/api-doc/openapi.json"))
        .push(SwaggerUi::new("/api-doc/openapi.json").into_router("docs"));

    let server = Server::new(listener);

    let handle = server.handle();

    // Listen for shutdown signal
    tokio::spawn(async move {
        if let Err(error) = shutdown::listen(handle).await {
            error!("failed to listen for shutdown signal: {error}");
        }
    });

    // Start serving requests
    server.serve(router).await;
}
