use std::time::Duration;

use tracing::warn;

use crate::engine::word::{Category, CategoryId};
use crate::error::LoadError;
use crate::repository::cache::DiskCache;
use crate::repository::{
    CATEGORY_INDEX_PATH, WordRepository, parse_list, simple_path, target_path,
};

/// Word lists served as JSON files under a base URL, laid out like the
/// bundled assets. Successful fetches are mirrored to disk and used as a
/// fallback when the network is unavailable.
pub struct RemoteRepository {
    base_url: String,
    client: reqwest::blocking::Client,
    disk: Option<DiskCache>,
}

impl RemoteRepository {
    pub fn new(base_url: &str) -> Result<Self, LoadError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|_| LoadError::Fetch {
                what: base_url.to_string(),
            })?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            disk: DiskCache::new("words"),
        })
    }

    fn fetch(&self, path: &str) -> Result<String, LoadError> {
        let url = format!("{}/{}", self.base_url, path);
        if let Some(body) = fetch_url(&self.client, &url) {
            if let Some(ref disk) = self.disk {
                disk.put(path, &body);
            }
            return Ok(body);
        }
        warn!(%url, "fetch failed, trying offline copy");
        self.disk
            .as_ref()
            .and_then(|disk| disk.get(path))
            .ok_or(LoadError::Fetch { what: url })
    }

    fn read<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, LoadError> {
        let body = self.fetch(path)?;
        parse_list(path, body.as_bytes())
    }
}

impl WordRepository for RemoteRepository {
    fn load_category_index(&self) -> Result<Vec<Category>, LoadError> {
        self.read(CATEGORY_INDEX_PATH)
    }

    fn load_target_category(
        &self,
        category: &CategoryId,
        language: &str,
    ) -> Result<Vec<String>, LoadError> {
        self.read(&target_path(category, language))
    }

    fn load_simple_words(&self, language: &str) -> Result<Vec<Vec<String>>, LoadError> {
        self.read(&simple_path(language))
    }
}

fn fetch_url(client: &reqwest::blocking::Client, url: &str) -> Option<String> {
    let response = client.get(url).send().ok()?;
    if response.status().is_success() {
        response.text().ok()
    } else {
        None
    }
}
