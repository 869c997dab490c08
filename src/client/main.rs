// src/client/main.rs

use std::sync::Arc;

use keywarden::config::init_config;
use keywarden::errors::{ApiError, ApiResult};
use keywarden::{is_access_key_present, AppKeyManager, HttpExecutor, SessionAuthenticator};

/// Simple demo entrypoint for the KeyWarden client.
///
/// Drives the whole lifecycle once, with credentials taken from
/// `KEYWARDEN_LOGIN` / `KEYWARDEN_PASSWORD`:
/// authenticate -> create app key -> activate -> check activations ->
/// update activations.
///
/// Real applications are expected to call the `SessionAuthenticator` and
/// `AppKeyManager` types directly and hold the returned keys themselves.
#[tokio::main]
async fn main() -> ApiResult<()> {
    let config = init_config()?;

    if config.logging.enabled {
        let level: tracing::Level = config
            .logging
            .level
            .parse()
            .unwrap_or(tracing::Level::INFO);
        tracing_subscriber::fmt().with_max_level(level).init();
    }

    let login = std::env::var("KEYWARDEN_LOGIN")
        .map_err(|_| ApiError::Config("KEYWARDEN_LOGIN is not set".to_string()))?;
    let password = std::env::var("KEYWARDEN_PASSWORD")
        .map_err(|_| ApiError::Config("KEYWARDEN_PASSWORD is not set".to_string()))?;

    let executor = Arc::new(HttpExecutor::new(&config.api)?);
    let authenticator = SessionAuthenticator::new(executor.clone());
    let manager =
        AppKeyManager::with_update_contract(executor, config.compat.update_contract());

    let Some(access_key) = authenticator.authenticate(&login, &password).await else {
        println!("Authentication failed.");
        return Ok(());
    };
    debug_assert!(is_access_key_present(&access_key));
    println!("Authenticated.");

    let Some(app_key) = manager.create_app_key(&access_key).await else {
        println!("App key creation failed.");
        return Ok(());
    };
    println!("Issued app key: {app_key}");

    if manager.authenticate_app(&app_key, &access_key).await {
        println!("App key activated.");
    } else {
        println!("App key activation was denied.");
    }

    let activations_left = manager.check_app_key_activations(&app_key).await;
    println!("Activations left: {activations_left}");

    if manager.update_app_key(&app_key, 10, &access_key).await {
        println!("Activation budget set to 10.");
    } else {
        println!("Activation update failed.");
    }

    Ok(())
}
