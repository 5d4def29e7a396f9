mod cache;
mod config;
mod engine;
mod error;
mod model;
mod net;
mod sources;

use std::sync::atomic::AtomicI64;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::routing::{get, post};
use axum::Router;
use config::Config;
use net::admin::{force_reload, AdminState, ReloadSignal};
use net::health::{health, stats, HealthState};
use net::sse::{home, oracle, panel, SseState};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    dotenvy::dotenv().ok();

    info!("starting sse gateway...");

    let config = Config::from_env();
    let started_at = Instant::now();

    info!("connecting to relational store...");
    let pool = sources::db::connect(&config.database_url).await?;
    info!("connected to relational store");

    info!("connecting to cache store...");
    let cache_store = sources::CacheStore::connect(&config.redis_url()).await?;
    info!("connected to cache store");

    let event_info =
        sources::EventInfoSource::new(pool.clone(), Duration::from_secs(config.event_info_ttl_secs));

    let broadcaster = cache::Broadcaster::new(
        cache_store.clone(),
        event_info,
        Duration::from_secs(config.oracle_ttl_secs),
        Duration::from_secs(config.oracle_cleanup_interval_secs),
    );
    broadcaster.spawn_refresh_task(Duration::from_secs(config.snapshot_refresh_secs));

    let auth = cache::AuthResolver::new(Some(pool), Duration::from_secs(config.auth_ttl_secs));
    let reload = Arc::new(ReloadSignal::new());
    let connections = Arc::new(AtomicI64::new(0));

    let sse_state = Arc::new(SseState {
        broadcaster,
        auth,
        cache_store,
        reload: reload.clone(),
        connections: connections.clone(),
        max_connections: config.max_connections,
        subscriber_tick: Duration::from_secs(config.subscriber_tick_secs),
        free_tick: Duration::from_secs(config.free_tick_secs),
        goal_log_ttl_secs: config.goal_log_ttl_secs,
    });

    let admin_state = Arc::new(AdminState {
        reload,
        connections: connections.clone(),
    });

    let health_state = Arc::new(HealthState {
        connections,
        max_connections: config.max_connections,
        started_at,
    });

    let sse_routes = Router::new()
        .route("/sse/panel", get(panel))
        .route("/sse/home", get(home))
        .route("/sse/oracle/:matchId", get(oracle))
        .with_state(sse_state);

    let admin_routes = Router::new()
        .route("/sse/admin/force-reload", post(force_reload))
        .with_state(admin_state);

    let health_routes = Router::new()
        .route("/sse/health", get(health))
        .route("/stats", get(stats))
        .with_state(health_state);

    let app = sse_routes
        .merge(admin_routes)
        .merge(health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.server_port);
    info!(addr = %addr, "sse gateway ready");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    let mut graceful_rx = shutdown_rx.clone();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        let _ = graceful_rx.wait_for(|triggered| *triggered).await;
    });
    tokio::pin!(server);

    let mut deadline_rx = shutdown_rx;
    tokio::select! {
        res = &mut server => {
            res?;
        }
        _ = deadline_rx.wait_for(|triggered| *triggered) => {
            // Shutdown requested: the server future above is now draining
            // in-flight connections. Only this post-signal wait is bounded
            // by the 30s deadline, not the server's total uptime.
            match tokio::time::timeout(Duration::from_secs(30), &mut server).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(e.into()),
                Err(_) => warn!("graceful shutdown deadline elapsed, exiting with connections still draining"),
            }
        }
    }

    Ok(())
}

/// Resolves once an interrupt/terminate signal arrives, so `axum::serve`
/// stops accepting new connections and waits (bounded by the 30s timeout
/// above) for in-flight ones to finish.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.expect("failed to install ctrl-c handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install terminate signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received");
}
