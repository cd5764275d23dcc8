//! Candidates Panel — pro-forma extraction and document generation server.

use std::sync::Arc;

use panel_core::PanelConfig;
use panel_server::{build_router, AppState};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--help" | "-h" | "help" => {
                println!("Candidates Panel server");
                println!();
                println!("Usage: candidates-panel");
                println!();
                println!("Environment:");
                println!("  PORT                     Listen port (default 3001)");
                println!("  PANEL_STATIC_DIR         Built front-end directory (default dist)");
                println!("  PANEL_MAX_UPLOAD_BYTES   Upload size limit (default 10485760)");
                println!("  RUST_LOG                 Log filter (default info)");
                return Ok(());
            }
            other => {
                eprintln!("Unknown argument: {}. Use 'candidates-panel help' for usage.", other);
                std::process::exit(1);
            }
        }
    }

    let config = PanelConfig::from_env();
    config.validate()?;
    let addr = config.bind_addr();
    info!(
        "Upload limit {} bytes, static dir {}",
        config.max_upload_bytes,
        config.static_dir.display()
    );

    let state = Arc::new(AppState::new(config));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Candidates Panel server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
