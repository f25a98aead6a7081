//! Window Commands

use tauri::{AppHandle, Manager};

/// Close the builder window (Save & Close)
#[tauri::command]
pub async fn close_window(app: AppHandle) -> Result<(), String> {
    #[cfg(not(any(target_os = "android", target_os = "ios")))]
    {
        let window = app.get_webview_window("main").ok_or("Window not found")?;
        window.close().map_err(|e| e.to_string())?;
    }
    tracing::info!("builder window closed");
    Ok(())
}
