use std::path::Path;

/// Detect Content-Type based on file extension
///
/// Resolves through the `mime_guess` registry, case-insensitively. Unknown
/// or missing extensions fall back to "application/octet-stream".
pub fn detect_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string())
}
