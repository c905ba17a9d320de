//! Portal Entry Point
//!
//! Headless driver for the session lifecycle: bootstrap, optional
//! sign-in from the environment, gate decision, sign-out. Uses `anyhow`
//! for startup errors; session-level errors stay `SessionError`.

use std::env;
use std::sync::Arc;

use platform::config::TransportConfig;
use platform::http::HttpTransport;
use session::application::{
    BootstrapUseCase, SessionConfig, SignInInput, SignInOutput, SignInUseCase, SignOutUseCase,
};
use session::error::SessionError;
use session::gate;
use session::infra::HttpAuthApi;
use session::store::SessionStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal=info,session=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = env::var("PORTAL_API_URL").unwrap_or_else(|_| "http://localhost:31113".into());
    let transport = Arc::new(HttpTransport::new(TransportConfig::new(&base_url)?)?);
    tracing::info!(%base_url, "Transport ready");

    let api = Arc::new(HttpAuthApi::new(Arc::clone(&transport)));
    let store = Arc::new(SessionStore::new());
    let config = Arc::new(SessionConfig::admin_portal());

    // Validate any existing cookie session once
    BootstrapUseCase::new(Arc::clone(&api), Arc::clone(&store), Arc::clone(&config))
        .execute()
        .await;
    tracing::info!(decision = ?gate::decide(&store.snapshot()), "After bootstrap");

    // Sign in when credentials are provided via the environment
    let (Ok(email), Ok(password)) = (env::var("PORTAL_EMAIL"), env::var("PORTAL_PASSWORD")) else {
        tracing::info!("PORTAL_EMAIL / PORTAL_PASSWORD not set; nothing more to do");
        return Ok(());
    };

    let sign_in = SignInUseCase::new(Arc::clone(&api), Arc::clone(&store), Arc::clone(&config));
    match sign_in.execute(SignInInput::new(email, password)).await {
        Ok(SignInOutput::Authenticated(identity)) => {
            tracing::info!(user_id = %identity.id, email = %identity.email, "Signed in");
        }
        Ok(SignInOutput::MfaRequired) => {
            tracing::info!("Second factor required; complete it interactively");
            return Ok(());
        }
        Err(SessionError::InvalidCredentials) => {
            anyhow::bail!("Sign-in rejected: invalid credentials");
        }
        Err(error) => return Err(error.to_app_error().into()),
    }
    tracing::info!(decision = ?gate::decide(&store.snapshot()), "After sign-in");

    SignOutUseCase::new(Arc::clone(&api), Arc::clone(&store))
        .execute()
        .await;
    tracing::info!(decision = ?gate::decide(&store.snapshot()), "After sign-out");

    Ok(())
}
