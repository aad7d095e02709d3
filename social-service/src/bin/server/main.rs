use std::sync::Arc;

use auth::Authenticator;
use social_service::config::Config;
use social_service::domain::auth::service::AuthService;
use social_service::domain::notification::service::NotificationService;
use social_service::domain::post::service::PostService;
use social_service::domain::user::service::UserService;
use social_service::inbound::http::router::create_router;
use social_service::inbound::http::router::AppState;
use social_service::outbound::images::DeepAiImageGenerator;
use social_service::outbound::mail::MailgunMailer;
use social_service::outbound::repositories::PostgresPostRepository;
use social_service::outbound::repositories::PostgresUserRepository;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "social_service=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "social-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;
    let signing_config = config.jwt.signing_config()?;

    tracing::info!(
        http_port = config.server.http_port,
        public_url = %config.server.public_url,
        jwt_algorithm = %config.jwt.algorithm,
        mail_domain = %config.mail.domain,
        "Configuration loaded"
    );

    let pg_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .connect(&config.database.url)
        .await?;
    tracing::info!(
        max_connections = config.database.max_connections,
        database = "postgresql",
        "Database connection pool created"
    );

    sqlx::migrate!("./migrations").run(&pg_pool).await?;
    tracing::info!(database = "postgresql", "Database migrations completed");

    let authenticator = Arc::new(Authenticator::new(&signing_config));
    let user_repository = Arc::new(PostgresUserRepository::new(pg_pool.clone()));
    let post_repository = Arc::new(PostgresPostRepository::new(pg_pool));
    let mailer = Arc::new(MailgunMailer::new(
        config.mail.api_url.clone(),
        config.mail.domain.clone(),
        config.mail.api_key.clone(),
    )?);
    let image_generator = Arc::new(DeepAiImageGenerator::new(
        config.image_generation.api_url.clone(),
        config.image_generation.api_key.clone(),
    )?);

    let state = AppState {
        user_service: Arc::new(UserService::new(
            Arc::clone(&user_repository),
            Arc::clone(&authenticator),
        )),
        auth_service: Arc::new(AuthService::new(
            user_repository,
            Arc::clone(&authenticator),
        )),
        post_service: Arc::new(PostService::new(Arc::clone(&post_repository))),
        notification_service: Arc::new(NotificationService::new(
            mailer,
            image_generator,
            post_repository,
        )),
        public_url: config.server.public_url.clone(),
    };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    if let Err(e) = axum::serve(http_listener, create_router(state)).await {
        tracing::error!(error = %e, "Server error");
        return Err(e.into());
    }

    tracing::info!("Server exited successfully");
    Ok(())
}
