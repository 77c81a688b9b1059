use anyhow::Context;
use clap::Parser;
use dialoguer::{Input, Password};
use dotenvy::dotenv;

use mbkm::cli::{AdminAccount, Cli, Commands, create_admin, run_migrations};
use mbkm::logging::{init_tracing, shutdown_tracer};
use mbkm::metrics::init_metrics;
use mbkm::router::init_router;
use mbkm::state::init_app_state;
use mbkm_config::{CorsConfig, DatabaseConfig, JwtConfig, ObservabilityConfig, ServerConfig};
use mbkm_db::init_db_pool;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    match Cli::parse().command() {
        Commands::Serve => serve().await,
        Commands::Migrate => migrate().await,
        Commands::CreateAdmin {
            username,
            email,
            password,
            full_name,
        } => handle_create_admin(username, email, password, full_name).await,
    }
}

async fn serve() -> anyhow::Result<()> {
    let observability = ObservabilityConfig::from_env();
    init_tracing(&observability)?;

    let server_config = ServerConfig::from_env()?;
    let db_config = DatabaseConfig::from_env()?;
    let jwt_config = JwtConfig::from_env()?;
    let cors_config = CorsConfig::from_env();

    let state = init_app_state(&db_config, jwt_config, cors_config)
        .await
        .context("Failed to connect to database")?;

    let metrics_handle = if observability.metrics_enabled {
        Some(init_metrics()?)
    } else {
        None
    };

    let app = init_router(state, metrics_handle);

    let address = server_config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    tracing::info!(%address, "MBKM API listening");
    tracing::info!("Swagger UI available at http://{address}/swagger-ui");
    tracing::info!("Scalar UI available at http://{address}/scalar");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracer();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
    tracing::info!("Shutdown signal received");
}

async fn migrate() -> anyhow::Result<()> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;

    run_migrations(&pool).await?;
    println!("✅ Migrations applied");
    Ok(())
}

async fn handle_create_admin(
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    full_name: Option<String>,
) -> anyhow::Result<()> {
    let username = match username {
        Some(username) => username,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    let full_name = match full_name {
        Some(full_name) => Some(full_name),
        None => {
            let name: String = Input::new()
                .with_prompt("Full name (optional)")
                .allow_empty(true)
                .interact_text()?;
            Some(name).filter(|n| !n.trim().is_empty())
        }
    };

    let db_config = DatabaseConfig::from_env()?;
    let pool = init_db_pool(&db_config)
        .await
        .context("Failed to connect to database")?;

    let account = AdminAccount {
        username,
        email,
        password,
        full_name,
    };

    match create_admin(&pool, account).await {
        Ok(user) => {
            println!("\n✅ Admin created successfully!");
            println!("   Username: {}", user.username);
            println!("   Email: {}", user.email);
            Ok(())
        }
        Err(e) => {
            eprintln!("\n❌ Error creating admin: {}", e.error);
            std::process::exit(1);
        }
    }
}
