use crate::config::Source;
use crate::errors::{AppError, LoadError};
use crate::models::{Itinerary, Preferences, Quote};
use crate::quotes::fallback_quotes;
use reqwest::header::{CACHE_CONTROL, PRAGMA};
use std::path::Path;
use tokio::fs;
use tracing::{error, warn};

/// Reads the raw document. `fresh` asks intermediaries to skip their caches.
pub async fn fetch_document(
    client: &reqwest::Client,
    source: &Source,
    fresh: bool,
) -> Result<Vec<u8>, LoadError> {
    match source {
        Source::File(path) => fs::read(path).await.map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        }),
        Source::Url(url) => {
            let mut request = client.get(url);
            if fresh {
                request = request
                    .header(CACHE_CONTROL, "no-cache, no-store")
                    .header(PRAGMA, "no-cache");
            }
            let response = request.send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(LoadError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            Ok(response.bytes().await?.to_vec())
        }
    }
}

pub async fn load_itinerary(
    client: &reqwest::Client,
    source: &Source,
) -> Result<Itinerary, LoadError> {
    let bytes = fetch_document(client, source, false).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Never fails: any problem yields the built-in quotes.
pub async fn load_quotes(client: &reqwest::Client, source: &Source) -> Vec<Quote> {
    let loaded: Result<Vec<Quote>, LoadError> = match fetch_document(client, source, true).await {
        Ok(bytes) => serde_json::from_slice(&bytes).map_err(LoadError::from),
        Err(err) => Err(err),
    };
    match loaded {
        Ok(quotes) => quotes,
        Err(err) => {
            warn!("using fallback quotes: {err}");
            fallback_quotes()
        }
    }
}

pub async fn load_prefs(path: &Path) -> Preferences {
    match fs::read(path).await {
        Ok(bytes) => match serde_json::from_slice(&bytes) {
            Ok(prefs) => prefs,
            Err(err) => {
                error!("failed to parse preferences file: {err}");
                Preferences::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Preferences::default(),
        Err(err) => {
            error!("failed to read preferences file: {err}");
            Preferences::default()
        }
    }
}

pub async fn persist_prefs(path: &Path, prefs: &Preferences) -> Result<(), AppError> {
    let payload = serde_json::to_vec_pretty(prefs).map_err(AppError::internal)?;
    fs::write(path, payload).await.map_err(AppError::internal)?;
    Ok(())
}

/// Reads one file from the images directory. Names that could leave the
/// directory are treated as missing.
pub async fn read_image(dir: &Path, name: &str) -> Result<(&'static str, Vec<u8>), AppError> {
    if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
        return Err(AppError::not_found("image not found"));
    }
    match fs::read(dir.join(name)).await {
        Ok(bytes) => Ok((image_content_type(name), bytes)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::not_found("image not found"))
        }
        Err(err) => {
            error!("failed to read image {name}: {err}");
            Err(AppError::internal(err))
        }
    }
}

fn image_content_type(name: &str) -> &'static str {
    let extension = name.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
