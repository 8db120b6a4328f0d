use crate::approvals::SqliteLedger;
use crate::config::AppConfig;
use crate::db::{init_db, Database};
use crate::router::handle;
use crate::service::ReviewService;
use astra::Server;
use tracing_subscriber::EnvFilter;

mod aggregate;
mod approvals;
mod config;
mod db;
mod domain;
mod errors;
mod normalize;
mod query;
mod responses;
mod router;
mod service;
mod upstream;

#[cfg(test)]
mod tests;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("guest_reviews=info")),
        )
        .init();

    let config = AppConfig::from_env();

    // 1. Approval ledger database
    let db = Database::new(config.db_path.clone());
    if let Err(e) = init_db(&db) {
        tracing::error!(error = %e, "database initialization failed");
        std::process::exit(1);
    }

    // 2. Review pipeline with the durable ledger injected
    let app = match ReviewService::new(&config, Box::new(SqliteLedger::new(db))) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "failed to build review service");
            std::process::exit(1);
        }
    };

    // 3. Serve
    tracing::info!(addr = %config.bind_addr, "starting server");
    let server = Server::bind(&config.bind_addr).max_workers(config.max_workers);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => responses::json_error_response(&err),
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "server ended with error");
    }

    tracing::info!("server shut down");
}
