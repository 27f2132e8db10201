//! Backend entry-point: wires the feedback REST API and OpenAPI docs.

use std::env;
use std::net::SocketAddr;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use feedback_backend::inbound::http::health::HealthState;
use feedback_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use feedback_backend::server::{ServerConfig, create_server};

fn bind_addr_from_env() -> SocketAddr {
    let port = env::var("PORT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(8080);
    SocketAddr::from(([0, 0, 0, 0], port))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let mut config = ServerConfig::new(bind_addr_from_env());

    match env::var("DATABASE_URL") {
        Ok(database_url) => {
            // Migrations run on a blocking connection before the pool exists
            // so the server never accepts traffic against a stale schema.
            run_pending_migrations(&database_url).map_err(std::io::Error::other)?;
            let pool = DbPool::new(PoolConfig::new(database_url))
                .await
                .map_err(std::io::Error::other)?;
            config = config.with_db_pool(pool);
        }
        Err(_) => {
            warn!("DATABASE_URL not set; storing feedback in memory");
        }
    }

    info!(addr = %config.bind_addr(), "starting feedback backend");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}
