//! File-based caching layer for optimized output
//!
//! ARCHITECTURE: Cache optimized results with mtime-based invalidation.
//! - Cache key: SHA256(canonical_path + mtime_secs + policy debug repr)
//! - Cache location: ~/.cache/distill/ (platform-specific)
//! - Invalidation: File mtime change or policy change
//! - Storage format: JSON with metadata

use anyhow::Result;
use distill_core::Policy;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Cache entry with metadata for validation
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry {
    /// Original file path (for debugging)
    path: String,
    /// File modification time (seconds since UNIX epoch)
    mtime_secs: u64,
    /// Policy fingerprint (debug representation of the resolved `Policy`)
    policy: String,
    /// Cached optimized output
    content: String,
    /// Original token count (optional for backward compatibility)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    original_tokens: Option<usize>,
    /// Optimized token count (optional for backward compatibility)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    optimized_tokens: Option<usize>,
}

/// Get platform-specific cache directory (~/.cache/distill/ on Linux/macOS)
fn get_cache_dir() -> Result<PathBuf> {
    let cache_dir = dirs::cache_dir()
        .ok_or_else(|| anyhow::anyhow!("Failed to determine cache directory"))?
        .join("distill");

    // Create cache directory with secure permissions (owner-only on Unix)
    #[cfg(unix)]
    {
        use std::fs::DirBuilder;
        use std::os::unix::fs::DirBuilderExt;

        if !cache_dir.exists() {
            let mut builder = DirBuilder::new();
            builder.mode(0o700); // rwx------ (owner-only)
            builder.recursive(true);
            builder.create(&cache_dir)?;
        }
    }

    #[cfg(not(unix))]
    {
        fs::create_dir_all(&cache_dir)?;
    }

    Ok(cache_dir)
}

/// Generate cache key from file path, mtime, and policy
fn cache_key(path: &Path, mtime: SystemTime, policy: &Policy) -> Result<String> {
    // Get canonical path (resolves symlinks, relative paths)
    let canonical_path = path.canonicalize()?;

    // Convert mtime to seconds since UNIX epoch
    let mtime_secs = mtime.duration_since(SystemTime::UNIX_EPOCH)?.as_secs();

    // Create hash input: "path|mtime|policy"
    let policy_str = format!("{policy:?}");
    let hash_input = format!("{}|{}|{}", canonical_path.display(), mtime_secs, policy_str);

    // Generate SHA256 hash
    let mut hasher = Sha256::new();
    hasher.update(hash_input.as_bytes());
    let hash = hasher.finalize();

    // Convert to hex string
    Ok(format!("{hash:x}"))
}

/// Read cached output if valid (mtime matches)
/// Returns: (content, original_tokens, optimized_tokens)
pub fn read_cache(path: &Path, policy: &Policy) -> Option<(String, Option<usize>, Option<usize>)> {
    // Get file metadata
    let metadata = fs::metadata(path).ok()?;
    let mtime = metadata.modified().ok()?;

    // Generate cache key
    let key = cache_key(path, mtime, policy).ok()?;
    let cache_dir = get_cache_dir().ok()?;
    let cache_file = cache_dir.join(format!("{key}.json"));

    // Check if cache file exists
    if !cache_file.exists() {
        return None;
    }

    // Read cache file
    let cache_content = fs::read_to_string(&cache_file).ok()?;
    let entry: CacheEntry = serde_json::from_str(&cache_content).ok()?;

    // Validate cache entry matches current file state
    let mtime_secs = mtime.duration_since(SystemTime::UNIX_EPOCH).ok()?.as_secs();
    let policy_str = format!("{policy:?}");

    if entry.mtime_secs == mtime_secs && entry.policy == policy_str {
        Some((entry.content, entry.original_tokens, entry.optimized_tokens))
    } else {
        // Cache is stale, delete it
        let _ = fs::remove_file(&cache_file);
        None
    }
}

/// Write optimized output to cache
pub fn write_cache(
    path: &Path,
    policy: &Policy,
    content: &str,
    original_tokens: Option<usize>,
    optimized_tokens: Option<usize>,
) -> Result<()> {
    // Get file metadata
    let metadata = fs::metadata(path)?;
    let mtime = metadata.modified()?;

    // Generate cache key
    let key = cache_key(path, mtime, policy)?;
    let cache_dir = get_cache_dir()?;
    let cache_file = cache_dir.join(format!("{key}.json"));

    // Create cache entry
    let mtime_secs = mtime.duration_since(SystemTime::UNIX_EPOCH)?.as_secs();
    let entry = CacheEntry {
        path: path.display().to_string(),
        mtime_secs,
        policy: format!("{policy:?}"),
        content: content.to_string(),
        original_tokens,
        optimized_tokens,
    };

    // Write to cache file
    let json = serde_json::to_string(&entry)?;
    fs::write(&cache_file, json)?;

    // Set secure file permissions on Unix (owner read/write only)
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&cache_file, perms)?;
    }

    Ok(())
}

/// Clear entire cache directory
pub fn clear_cache() -> Result<()> {
    let cache_dir = get_cache_dir()?;

    if cache_dir.exists() {
        fs::remove_dir_all(&cache_dir)?;
        fs::create_dir_all(&cache_dir)?;
    }

    Ok(())
}
