/**
 * This module contains all logic for loading textures from external files.
 *
 * Loads never block the event loop. They are spawned on the async runtime
 * (tokio natively, the browser's microtask queue on the web) and report back
 * through an unbounded channel that the event loop drains once per frame.
 */
pub mod texture;

use anyhow::Context as _;
use futures::channel::mpsc::UnboundedSender;

use crate::data_structures::material::TextureKey;

/// Raw file contents of one texture, or why they could not be read.
#[derive(Debug)]
pub struct LoadedTexture {
    pub key: TextureKey,
    pub bytes: anyhow::Result<Vec<u8>>,
}

/// Which texture loads are still outstanding and which of the finished ones
/// failed.
#[derive(Clone, Debug, Default)]
pub struct LoadProgress {
    pending: Vec<TextureKey>,
    failed: Vec<TextureKey>,
}

impl LoadProgress {
    pub fn new(keys: &[TextureKey]) -> Self {
        Self {
            pending: keys.to_vec(),
            failed: Vec::new(),
        }
    }

    /// Record a finished load. Returns true exactly once, for the load that
    /// empties the pending list. Keys that are not pending are ignored.
    pub fn finish(&mut self, key: TextureKey, succeeded: bool) -> bool {
        let Some(index) = self.pending.iter().position(|pending| *pending == key) else {
            return false;
        };
        self.pending.remove(index);
        if !succeeded {
            self.failed.push(key);
        }
        self.pending.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn pending(&self) -> &[TextureKey] {
        &self.pending
    }

    pub fn failed(&self) -> &[TextureKey] {
        &self.failed
    }
}

#[cfg(target_arch = "wasm32")]
fn format_url(asset_root: &str, file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().context("no global window")?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| anyhow::anyhow!("page origin unavailable: {:?}", e))?;
    let base = reqwest::Url::parse(&format!("{}/{}/", origin, asset_root))?;
    Ok(base.join(file_name)?)
}

/// Read `file_name` below `asset_root`: from disk natively, over HTTP from the
/// page origin on the web.
pub async fn load_binary(asset_root: &str, file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(asset_root, file_name)?;
        reqwest::get(url)
            .await?
            .error_for_status()?
            .bytes()
            .await?
            .to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new(asset_root).join(file_name);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    Ok(data)
}

/// Start one load per key. Results arrive on `sender` in completion order.
pub fn spawn_texture_loads(
    #[cfg(not(target_arch = "wasm32"))] async_runtime: &tokio::runtime::Runtime,
    asset_root: &str,
    keys: &[TextureKey],
    sender: UnboundedSender<LoadedTexture>,
) {
    for &key in keys {
        let asset_root = asset_root.to_string();
        let sender = sender.clone();
        let load = async move {
            let bytes = load_binary(&asset_root, &key.asset_path()).await;
            if sender.unbounded_send(LoadedTexture { key, bytes }).is_err() {
                log::debug!("Texture '{}' arrived after shutdown", key);
            }
        };

        #[cfg(not(target_arch = "wasm32"))]
        async_runtime.spawn(load);

        #[cfg(target_arch = "wasm32")]
        wasm_bindgen_futures::spawn_local(load);
    }
}
