use chrono::Utc;

/// Extracts the lowercase-insensitive extension of a filename, if any.
pub fn extension(filename: &str) -> Option<&str> {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ext)
        .filter(|ext| !ext.is_empty())
}

/// Returns whether `filename` carries one of the allowed extensions.
pub fn extension_allowed(filename: &str, allowed: &[String]) -> bool {
    extension(filename)
        .is_some_and(|ext| allowed.iter().any(|a| a.eq_ignore_ascii_case(ext)))
}

/// Reduces an uploaded filename to a safe single path component: keeps the
/// final component, maps anything outside `[A-Za-z0-9._-]` to `_`, and strips
/// leading/trailing dots so the result can never be hidden or a traversal.
pub fn sanitize_filename(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let trimmed = cleaned.trim_matches('.');
    if trimmed.is_empty() {
        "photo".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Derives a unique blob-store key for an upload: millisecond timestamp,
/// random nonce, sanitized original name.
pub fn storage_key(original: &str) -> String {
    format!(
        "{}_{:08x}_{}",
        Utc::now().timestamp_millis(),
        rand::random::<u32>(),
        sanitize_filename(original)
    )
}
