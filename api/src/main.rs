use std::io;
use std::sync::Arc;

use actix_web::HttpServer;
use log::info;

use bv_api::app::{create_app, AppState};
use bv_core::services::credential::{CredentialService, CredentialServiceConfig};
use bv_core::services::password::PasswordService;
use bv_core::services::token::{TokenService, TokenServiceConfig};
use bv_core::services::verification::{VerificationService, VerificationServiceConfig};
use bv_infra::cache::{RedisClient, RedisCodeStore};
use bv_infra::database::{DatabasePool, MySqlUserRepository};
use bv_infra::delivery::ConsoleCodeDelivery;
use bv_shared::config::AppConfig;

#[actix_web::main]
async fn main() -> io::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    info!("Starting BookVerse API Server");

    let config = AppConfig::from_env();
    info!("Running in {} mode", config.environment);

    // Connect the backing stores before accepting traffic
    let database = DatabasePool::new(&config.database)
        .await
        .map_err(startup_error)?;
    let redis = RedisClient::new(&config.cache).await.map_err(startup_error)?;

    // Adapters
    let user_repository = Arc::new(MySqlUserRepository::new(database.get_pool().clone()));
    let code_store = Arc::new(RedisCodeStore::new(redis, &config.verification));
    let code_delivery = Arc::new(ConsoleCodeDelivery::new());

    // Domain services
    let password_service = Arc::new(PasswordService::new());
    let token_service = Arc::new(TokenService::new(TokenServiceConfig {
        jwt_secret: config.auth.jwt_secret.clone(),
        session_token_expiry_days: config.auth.session_token_expiry_days,
    }));
    let verification_service = Arc::new(VerificationService::new(
        code_delivery,
        code_store,
        VerificationServiceConfig {
            code_expiration_minutes: config.verification.code_expiration_minutes,
            resend_cooldown_seconds: config.verification.resend_cooldown_seconds,
            max_attempts: config.verification.max_attempts as i32,
        },
    ));
    let credential_service = Arc::new(CredentialService::new(
        Arc::clone(&user_repository),
        password_service,
        Arc::clone(&token_service),
        verification_service,
        CredentialServiceConfig::default(),
    ));

    let state = AppState {
        credential_service,
        token_service,
        user_repository,
    };

    let bind_address = config.server.bind_address();
    info!("Server listening on {}", bind_address);

    HttpServer::new(move || create_app(state.clone()))
        .bind(&bind_address)?
        .run()
        .await
}

/// Maps an infrastructure failure into the `io::Error` main reports
fn startup_error<E>(error: E) -> io::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    io::Error::new(io::ErrorKind::Other, error)
}
