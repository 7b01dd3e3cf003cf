mod auth;
mod config;
mod entities;
mod handlers;
mod middleware;
mod models;
mod repositories;
mod routes;
mod seeders;
mod services;
#[cfg(test)]
mod testing;
mod utils;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tracing_subscriber::EnvFilter;

use crate::config::{AppState, Config};
use crate::middleware::rate_limiter::RateLimiter;
use crate::repositories::{
    otp_repository::OtpRepository, submission_repository::SubmissionRepository, tag_repository::TagRepository,
    user_repository::UserRepository,
};
use crate::services::{
    auth_service::AuthService, credential_service::CredentialService, email_service::EmailService,
    imagekit_service::ImageKitService, media_storage::MediaStorage, otp_service::OtpService,
    s3_service::S3Service, submission_service::SubmissionService, tag_service::TagService,
    user_service::UserService, CredentialIssuer,
};

type BoxResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")))
        .init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, "server exited with an error");
        std::process::exit(1);
    }
}

async fn run() -> BoxResult<()> {
    let cfg = Arc::new(Config::from_env()?);
    tracing::info!(env = %cfg.environment, "starting prompt gallery backend");

    // 1. Database
    let mut options = ConnectOptions::new(cfg.database_url.clone());
    options
        .max_connections(cfg.db_max_connections)
        .connect_timeout(Duration::from_secs(10))
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    tracing::info!("database connected");

    Migrator::up(&db, None).await?;
    tracing::info!("migrations applied");

    // 2. Repositories and collaborators
    let users = Arc::new(UserRepository::new(db.clone()));
    let otps = Arc::new(OtpRepository::new(db.clone()));
    let tags = Arc::new(TagRepository::new(db.clone()));
    let submissions = Arc::new(SubmissionRepository::new(db.clone()));

    let credentials: Arc<dyn CredentialIssuer> =
        Arc::new(CredentialService::new(cfg.jwt_secret.clone(), cfg.token_ttl()));
    let mailer = Arc::new(EmailService::new(&cfg));
    let storage = MediaStorage::new(
        Arc::new(ImageKitService::new(&cfg)),
        Arc::new(S3Service::new(&cfg, &cfg.s3_bucket_gif).await),
        Arc::new(S3Service::new(&cfg, &cfg.s3_bucket_video).await),
    );

    // 3. Seed data
    if let Err(e) = seeders::run_seeders(&cfg, users.as_ref(), tags.as_ref(), credentials.as_ref()).await {
        tracing::error!(error = %e, "seeding failed");
    }

    // 4. Services
    let state = AppState {
        config: cfg.clone(),
        credentials: credentials.clone(),
        auth_service: Arc::new(AuthService::new(users.clone(), credentials.clone())),
        otp_service: Arc::new(OtpService::new(users.clone(), otps, mailer, credentials.clone())),
        user_service: Arc::new(UserService::new(users)),
        tag_service: Arc::new(TagService::new(tags, cfg.tag_delete_policy)),
        submission_service: Arc::new(SubmissionService::new(submissions, storage, cfg.moderation)),
        rate_limiter: Arc::new(RateLimiter::new(100, Duration::from_secs(60))),
    };

    // 5. Router and server
    let app = routes::create_routes(state.clone()).with_state(state);

    let addr: SocketAddr = cfg.bind_address().parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => tracing::error!(error = %e, "failed to listen for SIGTERM"),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
