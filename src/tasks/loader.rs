use tracing::{error, info, instrument};

use crate::config::DataSource;
use crate::error::LoadError;
use crate::store::{GalleryItem, ItemStore};

/// Fetches and decodes the gallery document once.
pub async fn fetch_items(source: &DataSource) -> Result<Vec<GalleryItem>, LoadError> {
    let bytes = match source {
        DataSource::File(path) => {
            tokio::fs::read(path)
                .await
                .map_err(|source| LoadError::Read {
                    path: path.clone(),
                    source,
                })?
        }
        DataSource::Url(url) => {
            let http = |source| LoadError::Http {
                url: url.clone(),
                source,
            };
            reqwest::get(url)
                .await
                .and_then(reqwest::Response::error_for_status)
                .map_err(http)?
                .bytes()
                .await
                .map_err(http)?
                .to_vec()
        }
    };
    Ok(serde_json::from_slice(&bytes)?)
}

/// Loads the item store. A failed fetch is logged and yields an empty gallery.
#[instrument(skip_all, fields(source = %source))]
pub async fn load_store(source: &DataSource) -> ItemStore {
    match fetch_items(source).await {
        Ok(items) => {
            info!(count = items.len(), "gallery data loaded");
            ItemStore::new(items)
        }
        Err(err) => {
            error!(error = %err, "error fetching gallery data; continuing with an empty gallery");
            ItemStore::default()
        }
    }
}
