use crate::error::AppError;

/// Result of validating or resolving a tenant-scoped path.
#[derive(Debug, PartialEq, Eq)]
pub enum PathError {
    /// Path is empty or whitespace-only.
    Empty,
    /// Path exceeds the maximum length.
    TooLong,
    /// Path contains null bytes or other control characters.
    ControlCharacter,
    /// Path contains backslashes.
    Backslash,
    /// Path contains `..` traversal segments.
    Traversal,
    /// A path segment starts with a dot (hidden entries are not served).
    Hidden,
    /// Path contains empty segments (`//`).
    EmptySegment,
    /// Path contains characters outside the allowed set.
    InvalidCharacter,
    /// The resolved key does not sit under the tenant's namespace.
    TenantMismatch,
}

impl PathError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Path cannot be empty",
            Self::TooLong => "Path exceeds maximum length of 512 characters",
            Self::ControlCharacter => "Path must not contain control characters",
            Self::Backslash => "Path must not contain backslashes",
            Self::Traversal => "Path must not contain '..' traversal",
            Self::Hidden => "Path segments must not start with '.'",
            Self::EmptySegment => "Path must not contain empty segments",
            Self::InvalidCharacter => {
                "Path contains invalid characters (allowed: a-zA-Z0-9, /, -, _, .)"
            }
            Self::TenantMismatch => "Path resolves outside the tenant namespace",
        }
    }
}

impl From<PathError> for AppError {
    fn from(err: PathError) -> Self {
        match err {
            PathError::Traversal | PathError::TenantMismatch => AppError::AccessDenied,
            other => AppError::InvalidName(other.message().into()),
        }
    }
}

/// Normalize a user-supplied relative path.
///
/// Leading and trailing slashes are stripped; an empty result is allowed
/// (it addresses the tenant root). Traversal segments, backslashes, hidden
/// segments, and characters outside the storage-safe set are rejected, so
/// the tenant-prefix check in [`resolve_key`] can never be bypassed by
/// crafted input.
pub fn normalize_rel_path(path: &str) -> Result<String, PathError> {
    let trimmed = path.trim().trim_matches('/');

    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if trimmed.len() > 512 {
        return Err(PathError::TooLong);
    }
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(PathError::ControlCharacter);
    }
    if trimmed.contains('\\') {
        return Err(PathError::Backslash);
    }

    for segment in trimmed.split('/') {
        if segment.is_empty() {
            return Err(PathError::EmptySegment);
        }
        if segment == ".." {
            return Err(PathError::Traversal);
        }
        if segment.starts_with('.') {
            return Err(PathError::Hidden);
        }
    }

    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '-' | '_' | '.'))
    {
        return Err(PathError::InvalidCharacter);
    }

    Ok(trimmed.to_string())
}

/// Validate a tenant identifier for use as a namespace prefix.
pub fn validate_tenant_id(tenant_id: &str) -> Result<&str, PathError> {
    let trimmed = tenant_id.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(PathError::EmptySegment);
    }
    if trimmed == ".." || trimmed.starts_with('.') {
        return Err(PathError::Traversal);
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_'))
    {
        return Err(PathError::InvalidCharacter);
    }
    Ok(trimmed)
}

/// Resolve a tenant id and a relative-or-absolute path to an absolute key.
///
/// A path already carrying the `"{tenant_id}/"` prefix is used as-is;
/// anything else is prefixed. The result is guaranteed to sit under the
/// tenant's namespace; this is the sole tenant-isolation boundary.
pub fn resolve_key(tenant_id: &str, path: &str) -> Result<String, PathError> {
    let tenant = validate_tenant_id(tenant_id)?;
    let normalized = normalize_rel_path(path)?;
    if normalized.is_empty() {
        return Err(PathError::Empty);
    }

    let prefix = format!("{tenant}/");
    let key = if normalized.starts_with(&prefix) {
        normalized
    } else {
        format!("{prefix}{normalized}")
    };

    if !key.starts_with(&prefix) {
        return Err(PathError::TenantMismatch);
    }
    Ok(key)
}

/// Resolve a listing prefix for a tenant. An empty path addresses the root.
pub fn resolve_prefix(tenant_id: &str, path: &str) -> Result<String, PathError> {
    let tenant = validate_tenant_id(tenant_id)?;
    let normalized = normalize_rel_path(path)?;
    let prefix = format!("{tenant}/");
    if normalized.is_empty() {
        Ok(prefix)
    } else if normalized.starts_with(&prefix) {
        Ok(normalized)
    } else {
        Ok(format!("{prefix}{normalized}"))
    }
}

/// Validate a single name for rename targets (no directory components).
pub fn validate_name(name: &str) -> Result<&str, PathError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(PathError::Empty);
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(PathError::EmptySegment);
    }
    if trimmed == ".." {
        return Err(PathError::Traversal);
    }
    if trimmed.starts_with('.') {
        return Err(PathError::Hidden);
    }
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(PathError::ControlCharacter);
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(PathError::InvalidCharacter);
    }
    Ok(trimmed)
}

/// Strip the tenant namespace prefix from an absolute key.
pub fn strip_tenant_prefix<'a>(key: &'a str, tenant_id: &str) -> &'a str {
    key.strip_prefix(&format!("{tenant_id}/"))
        .unwrap_or(key)
        .trim_start_matches('/')
}

/// Replace the final path segment of a key with `new_name`.
pub fn replace_final_segment(key: &str, new_name: &str) -> String {
    match key.rfind('/') {
        Some(pos) => format!("{}/{}", &key[..pos], new_name),
        None => new_name.to_string(),
    }
}

/// Append `.html` when the final segment has no extension.
pub fn ensure_html_ext(name: &str) -> String {
    let final_segment = name.rsplit('/').next().unwrap_or(name);
    if final_segment.contains('.') {
        name.to_string()
    } else {
        format!("{name}.html")
    }
}

/// Exact-segment check for the publish gate's `unpublished` convention.
///
/// `a/unpublished/b` matches; `a/unpublishedx/b` does not.
pub fn has_unpublished_segment(path: &str) -> bool {
    path.split('/').any(|segment| segment == "unpublished")
}

/// Derive a page title from a path: extension stripped, `/` becomes ` - `.
pub fn derive_title(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    let without_ext = match (trimmed.rfind('.'), trimmed.rfind('/')) {
        (Some(dot), Some(slash)) if dot > slash => &trimmed[..dot],
        (Some(dot), None) => &trimmed[..dot],
        _ => trimmed,
    };
    without_ext.replace('/', " - ")
}
