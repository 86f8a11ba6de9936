use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Resolve the classifier artifact by name, checking caches before
/// downloading.
///
/// Resolution order:
/// 1. User cache directory (platform-specific)
/// 2. Bundled path (for development / pre-packaged installs)
/// 3. Download from URL to cache
pub fn resolve(
    name: &str,
    url: &str,
    bundled_dir: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cache_dir = model_cache_dir()?;
    let cached_path = cache_dir.join(name);
    if cached_path.exists() {
        return Ok(cached_path);
    }

    if let Some(dir) = bundled_dir {
        let bundled_path = dir.join(name);
        if bundled_path.exists() {
            return Ok(bundled_path);
        }
    }

    fs::create_dir_all(&cache_dir).map_err(ModelResolveError::CacheDir)?;
    download(url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Platform-specific cache directory for classifier artifacts, e.g.
/// `~/.cache/plateguard/models/` on Linux.
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    dirs::cache_dir()
        .map(|d| d.join("plateguard").join("models"))
        .ok_or(ModelResolveError::NoCacheDir)
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|e| ModelResolveError::Download {
            url: url.to_string(),
            source: e,
        })?;

    let total = response.content_length().unwrap_or(0);
    let bytes = response.bytes().map_err(|e| ModelResolveError::Download {
        url: url.to_string(),
        source: e,
    })?;

    // Write to a temp file first, then rename, so a failed download never
    // leaves a half-written artifact at the final path.
    let temp_path = dest.with_extension("part");
    let mut file = fs::File::create(&temp_path).map_err(|e| ModelResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;

    let mut written: u64 = 0;
    for chunk in bytes.chunks(256 * 1024) {
        file.write_all(chunk).map_err(|e| ModelResolveError::Write {
            path: temp_path.clone(),
            source: e,
        })?;
        written += chunk.len() as u64;
        if let Some(ref cb) = progress {
            cb(written, total);
        }
    }

    file.flush().map_err(|e| ModelResolveError::Write {
        path: temp_path.clone(),
        source: e,
    })?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(|e| ModelResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_model_cache_dir_layout() {
        let dir = model_cache_dir().unwrap();
        assert!(dir.to_string_lossy().contains("plateguard"));
        assert!(dir.ends_with("plateguard/models") || dir.ends_with("models"));
    }

    #[test]
    fn test_resolve_prefers_bundled_file() {
        let tmp = TempDir::new().unwrap();
        let bundled = tmp.path().join("bundled");
        fs::create_dir_all(&bundled).unwrap();
        // Unique name so the global cache cannot already hold it.
        let name = "test_cascade_bundled_only.xml";
        fs::write(bundled.join(name), b"<cascade/>").unwrap();

        let resolved = resolve(name, "http://invalid.example/cascade.xml", Some(&bundled), None)
            .unwrap();
        assert_eq!(resolved, bundled.join(name));
    }

    #[test]
    fn test_download_invalid_url_errors() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("cascade.xml");
        let result = download("http://invalid.nonexistent.example.com/cascade", &dest, None);
        assert!(matches!(result, Err(ModelResolveError::Download { .. })));
    }

    #[test]
    fn test_failed_download_leaves_no_partial_file() {
        let tmp = TempDir::new().unwrap();
        let dest = tmp.path().join("cascade.xml");
        let _ = download("http://invalid.nonexistent.example.com/cascade", &dest, None);
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }
}
