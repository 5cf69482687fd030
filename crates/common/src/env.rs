//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use tracing::info;

/// Ensure the media directory exists before the server starts taking uploads.
pub async fn ensure_media_dir(media_dir: &str) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(media_dir)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {media_dir}: {e}"))?;
    info!(%media_dir, "media directory ready");
    Ok(())
}
