mod config;
mod http;
mod mail;
mod pipeline;
mod recaptcha;
mod state;

use anyhow::Context;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::info;

use crate::config::{Settings, StoreSettings};
use crate::http::router::build_router;
use crate::mail::{MailConfig, Mailer};
use crate::recaptcha::RecaptchaVerifier;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let settings = Settings::new().context("Failed to load configuration")?;

    let store_config = match settings.store.clone() {
        StoreSettings::Sqlite { url } => adapter::StoreConfig::Sqlite { url },
        StoreSettings::Airtable {
            api_key,
            base_id,
            table,
        } => adapter::StoreConfig::Airtable(adapter::AirtableConfig {
            api_key,
            base_id,
            table,
        }),
    };
    let store = adapter::connect(store_config)
        .await
        .context("Failed to initialize comment store")?;

    let recaptcha = if settings.security.recaptcha_secret.is_empty() {
        info!("reCAPTCHA secret not set, bot verification disabled");
        None
    } else {
        Some(Arc::new(RecaptchaVerifier::new(
            settings.security.recaptcha_secret.clone(),
        )?))
    };

    let mailer = if settings.mail.api_key.is_empty() || settings.mail.contact_email.is_empty() {
        info!("Mail credentials not set, inquiry form disabled");
        None
    } else {
        Some(Arc::new(Mailer::new(MailConfig {
            api_key: settings.mail.api_key.clone(),
            from_address: settings.mail.from_address.clone(),
            contact_email: settings.mail.contact_email.clone(),
        })?))
    };

    let state = AppState {
        store,
        recaptcha,
        mailer,
    };

    let app = build_router(state, &settings.server.cors_origins);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
