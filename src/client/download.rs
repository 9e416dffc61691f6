//! Wallpaper downloads

use super::WallhavenClient;
use crate::{Result, WallhavenError};
use futures_util::StreamExt;
use reqwest::Response;
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

/// Write size used when the caller passes 0
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Extension tried first for the full-size file
pub const PRIMARY_EXTENSION: &str = "jpg";

/// Extension tried when the primary file is not there
pub const FALLBACK_EXTENSION: &str = "png";

impl WallhavenClient {
    /// Downloads the full-size file of a wallpaper to `destination`
    ///
    /// The body is written in pieces of at most `chunk_size` bytes (0 means
    /// [`DEFAULT_CHUNK_SIZE`]). Missing parent directories are created and an
    /// existing file is overwritten. Nothing is written unless the wallpaper exists and one
    /// of its files could be opened.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - File written
    /// * `Ok(false)` - No such wallpaper, or neither file format available
    /// * `Err(WallhavenError)` - Transport or filesystem failure
    pub async fn download(
        &self,
        id: &str,
        destination: impl AsRef<Path>,
        chunk_size: usize,
    ) -> Result<bool> {
        let destination = destination.as_ref();

        if !self.exists(id).await? {
            tracing::warn!("Wallpaper {} does not exist", id);
            return Ok(false);
        }

        let Some(response) = self.open_asset(id).await? else {
            tracing::warn!("No downloadable file for wallpaper {}", id);
            return Ok(false);
        };

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let chunk_size = if chunk_size == 0 {
            DEFAULT_CHUNK_SIZE
        } else {
            chunk_size
        };

        let url = response.url().to_string();
        let file = File::create(destination).await?;
        let mut writer = BufWriter::with_capacity(chunk_size, file);
        let mut stream = response.bytes_stream();
        let mut bytes_written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|source| WallhavenError::Http {
                url: url.clone(),
                source,
            })?;
            write_in_chunks(&mut writer, &chunk, chunk_size).await?;
            bytes_written += chunk.len() as u64;
        }

        writer.flush().await?;

        tracing::info!(
            "Downloaded {} ({} bytes) to {}",
            id,
            bytes_written,
            destination.display()
        );

        Ok(true)
    }

    /// Opens the first available file format of a wallpaper
    async fn open_asset(&self, id: &str) -> Result<Option<Response>> {
        for extension in [PRIMARY_EXTENSION, FALLBACK_EXTENSION] {
            let url = self.asset_url(id, extension);
            let response = self.fetcher.open_stream(&url).await?;

            if response.status().is_success() {
                return Ok(Some(response));
            }
        }

        Ok(None)
    }
}

/// Writes `data` in pieces of at most `chunk_size` bytes, returning the
/// number of writes issued
async fn write_in_chunks<W>(writer: &mut W, data: &[u8], chunk_size: usize) -> std::io::Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let mut writes = 0;
    for piece in data.chunks(chunk_size.max(1)) {
        writer.write_all(piece).await?;
        writes += 1;
    }
    Ok(writes)
}
