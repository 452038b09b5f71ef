//! API Gateway Library
//!
//! HTTP REST API for CRM user provisioning. Wires the identity provider client
//! and the profile store into the provisioning workflow and serves it.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod openapi;
pub mod routes;
pub mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use identity_service_lib::GoTrueAdminClient;
use profile_service_lib::{Database, ProfileStore};
use provisioning_service_lib::Provisioner;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Connect collaborators and build the shared state.
pub async fn build_state(config: &GatewayConfig) -> Result<AppState, Box<dyn std::error::Error>> {
    let database = Database::connect(&config.database).await?;
    let profiles = Arc::new(ProfileStore::new(database.get_connection()));
    let identity = Arc::new(GoTrueAdminClient::new(&config.identity)?);

    info!(
        orphan_policy = ?config.provisioning.orphan_policy,
        identity_url = %config.identity.url,
        "Provisioning workflow configured"
    );
    let provisioning = Arc::new(Provisioner::new(
        identity,
        profiles,
        config.provisioning.orphan_policy,
    ));

    Ok(AppState::new(provisioning, database))
}

/// Run the HTTP server with the given configuration.
pub async fn run_server(config: GatewayConfig) -> Result<(), Box<dyn std::error::Error>> {
    let state = build_state(&config).await?;
    let app = create_router(state);

    let addr: SocketAddr = config.server.addr().parse()?;
    info!("{} listening on {}", config.server.service_name, addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
