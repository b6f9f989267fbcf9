/*
 * Responsibility
 * - Config load → dependency wiring → Router assembly
 * - tracing / panic hook setup
 * - axum::serve()
 */
use std::{panic, process, sync::Arc};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::middleware::auth::{AuthPolicy, access::AUTHORIZATION_HEADER};
use crate::middleware::http::{self, HttpLimits};
use crate::repos::account_repo::InMemoryAccountStore;
use crate::state::AppState;
use crate::token::{SystemClock, build_token_maker};

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,bank_api=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        tracing::error!(?info, "panic");

        // Development: crash the whole process so the panic is noticed.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        token_maker = %config.token_maker,
        "starting API in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = build_state(&config)?;
    let app = build_router(
        state,
        HttpLimits {
            timeout: config.http_timeout,
            body_limit_bytes: config.http_body_limit_bytes,
        },
    );

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Build process-level services and inject them into the shared state.
///
/// Fails (and the process refuses to start) on a secret shorter than 32 bytes.
pub fn build_state(config: &Config) -> Result<AppState> {
    let token_maker = build_token_maker(
        config.token_maker,
        &config.token_symmetric_key,
        Arc::new(SystemClock),
    )
    .inspect_err(|e| tracing::error!(error = %e, "cannot create token maker"))?;

    let auth_policy = AuthPolicy::new(AUTHORIZATION_HEADER, &config.auth_scheme);

    Ok(AppState::new(
        token_maker,
        auth_policy,
        Arc::new(InMemoryAccountStore::new()),
    ))
}

pub fn build_router(state: AppState, limits: HttpLimits) -> Router {
    let router = Router::new()
        .nest("/api/v1", api::v1::routes(state.clone()))
        .with_state(state);

    http::apply(router, limits)
}
