//! Form Builder Backend
//!
//! Layered architecture:
//! - domain: Backend-side entities (local drafts)
//! - repository: Data access abstractions and implementations
//! - api: REST backend client
//! - persistence: Load/save flow on top of the api and the draft store
//! - commands: Tauri command handlers

use std::path::PathBuf;
use std::sync::Arc;
use tauri::{Emitter, Manager};

mod api;
mod commands;
mod config;
mod domain;
mod persistence;
mod repository;

use api::{FormBackend, HttpFormBackend};
use config::BackendConfig;
use repository::{init_db, DbState};

/// Application state shared across commands
pub struct AppState {
    pub backend: Arc<dyn FormBackend>,
    pub config: BackendConfig,
    pub db_state: DbState,
}

/// Get database path from app handle
fn get_db_path(app_handle: &tauri::AppHandle) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let app_dir = app_handle.path().app_data_dir()?;
    std::fs::create_dir_all(&app_dir)?;
    Ok(app_dir.join("form_builder.db"))
}

fn load_config(app_handle: &tauri::AppHandle) -> BackendConfig {
    let dir = match app_handle.path().app_config_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!(error = %e, "no config dir, using defaults");
            return BackendConfig::default().with_overrides(|name| std::env::var(name).ok());
        }
    };
    BackendConfig::load(&dir).unwrap_or_else(|e| {
        tracing::error!(error = %e, "config not loaded, using defaults");
        BackendConfig::default().with_overrides(|name| std::env::var(name).ok())
    })
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let result = tauri::Builder::default()
        .setup(|app| {
            // Single instance check - must be first!
            #[cfg(desktop)]
            app.handle().plugin(tauri_plugin_single_instance::init(|app, _args, _cwd| {
                if let Some(window) = app.get_webview_window("main") {
                    let _ = window.set_focus();
                }
            }))?;

            let app_handle = app.handle().clone();

            rolling_logger::init_logger(app_handle.path().app_log_dir()?, "FormBuilder")?;
            tracing::info!("app setup starting");

            let config = load_config(&app_handle);
            tracing::info!(api = %config.api_base_url, "backend configured");
            let backend = HttpFormBackend::new(config.clone())?;

            let db_path = get_db_path(&app_handle)?;

            // Managed before the connection exists
            let db_state = DbState::new(db_path.clone());
            app.manage(AppState {
                backend: Arc::new(backend),
                config,
                db_state: db_state.clone(),
            });

            tauri::async_runtime::spawn(async move {
                match init_db(&db_path).await {
                    Ok(initialized_state) => {
                        {
                            let mut conn_guard = db_state.conn.lock().await;
                            *conn_guard = initialized_state.conn.lock().await.take();
                        }
                        let _ = rolling_logger::info(&format!("Draft store ready at {}", db_state.path.display()));

                        if let Err(e) = app_handle.emit("db-initialized", ()) {
                            tracing::warn!(error = %e, "failed to emit db-initialized");
                        }
                    }
                    Err(e) => {
                        let _ = rolling_logger::error(&format!("Draft store init failed: {}", e));
                    }
                }
            });

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // Catalog
            commands::fetch_field_catalog,
            // Layout cascade
            commands::list_apps,
            commands::list_modules,
            commands::list_layouts,
            commands::load_layout_document,
            // Save
            commands::save_form,
            // Drafts
            commands::load_draft,
            commands::discard_draft,
            // Window
            commands::close_window,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        tracing::error!(error = %e, "error while running tauri application");
        std::process::exit(1);
    }
}
