// Main entry point for the Tokyo Weekend Events service
use chrono::Duration;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tokyo_weekend_events::api::{auth_state, create_router, AppState};
use tokyo_weekend_events::auth::password::PasswordHasher;
use tokyo_weekend_events::auth::service::AuthService;
use tokyo_weekend_events::config::Config;
use tokyo_weekend_events::core::crypto::TokenService;
use tokyo_weekend_events::loader::seed::seeded_store;
use tokyo_weekend_events::state::memory_store::InMemoryStore;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // 1. Load and validate configuration first (before any logging)
    //    An optional first argument names an env file to load.
    let loaded = match std::env::args().nth(1) {
        Some(path) => Config::from_env_file(&PathBuf::from(path)),
        None => Config::from_env(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // 2. Initialize tracing subscriber with config values
    init_tracing(&config)?;

    info!("Starting Tokyo Weekend Events API");
    info!(
        bind_address = %config.bind_address,
        port = config.port,
        seed_data = config.seed_data,
        "Configuration loaded"
    );

    // 3. Password hasher
    let hasher = PasswordHasher::with_cost(
        config.password_hash_memory_kib,
        config.password_hash_iterations,
    )
    .map_err(|e| {
        error!(error = %e, "Invalid password hashing parameters");
        e
    })?;

    // 4. Store, seeded unless disabled
    let store = if config.seed_data {
        seeded_store(hasher.clone()).map_err(|e| {
            error!(error = %e, "Failed to load seed data");
            e
        })?
    } else {
        warn!("Seed data disabled, starting with an empty store");
        InMemoryStore::empty(hasher.clone())
    };
    let store = Arc::new(store);

    // 5. Token service
    let token_service = Arc::new(
        TokenService::new(&config.jwt_secret, config.jwt_algorithm()?).map_err(|e| {
            error!(error = %e, "Failed to initialize token service");
            e
        })?,
    );
    info!("Token service initialized");

    // 6. Auth service
    let ttl_minutes = i64::try_from(config.access_token_expire_minutes)?;
    let auth_service = Arc::new(
        AuthService::new(store.clone(), hasher, token_service)
            .with_access_token_ttl(Duration::minutes(ttl_minutes)),
    );

    // 7. Router
    let addr = format!("{}:{}", config.bind_address, config.port);
    let app_state = AppState {
        store,
        auth_service,
        config: Arc::new(config),
    };
    let router = create_router(app_state.clone(), auth_state(&app_state));
    info!("Router created");

    // 8. Start HTTP server
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        error!(error = %e, addr = %addr, "Failed to bind to address");
        e
    })?;
    info!(addr = %addr, "Server listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

/// Initialize tracing subscriber based on configuration
///
/// `RUST_LOG` takes precedence over `LOG_LEVEL` when set.
fn init_tracing(config: &Config) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_env_filter(filter);

    if config.log_format == "json" {
        subscriber.json().try_init()?;
    } else {
        subscriber.try_init()?;
    }

    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Ctrl+C received, starting graceful shutdown");
        },
        _ = terminate => {
            info!("SIGTERM received, starting graceful shutdown");
        },
    }
}
