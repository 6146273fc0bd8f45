//! Filename conventions and derivation.
//!
//! Generates the suggested download filename for brand-kit assets
//! (`aurastream-<type>-<id8>-<date>.<ext>`) and derives fallbacks from
//! the asset URL, sanitized for local filesystems.

use chrono::NaiveDate;

/// Product tag used in generated filenames.
const PRODUCT: &str = "aurastream";

/// Default when the URL yields nothing usable.
const DEFAULT_FILENAME: &str = "download.bin";

/// Suggested filename for an asset, dated today.
///
/// See [`asset_filename_on`] for the convention; callers that need
/// deterministic output inject the date there instead.
pub fn asset_filename(asset_type: &str, asset_id: &str, format: &str) -> String {
    asset_filename_on(chrono::Local::now().date_naive(), asset_type, asset_id, format)
}

/// Suggested filename for an asset on an explicit date:
/// `aurastream-<assetType>-<first 8 chars of id>-<ISO date>.<format>`.
///
/// Shorter asset ids are kept whole. The result is sanitized, since
/// asset types and formats are caller-supplied strings.
pub fn asset_filename_on(
    date: NaiveDate,
    asset_type: &str,
    asset_id: &str,
    format: &str,
) -> String {
    let short_id: String = asset_id.chars().take(8).collect();
    let name = format!(
        "{}-{}-{}-{}.{}",
        PRODUCT,
        asset_type,
        short_id,
        date.format("%Y-%m-%d"),
        format
    );
    sanitize_filename(&name)
}

/// Derives a suggested filename from a URL's last path segment, for
/// callers with no asset metadata at hand.
pub fn default_filename_for(url: &str) -> String {
    let raw = match filename_from_url_path(url) {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };
    let sanitized = sanitize_filename(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// Last non-empty path segment of a URL, or `None` for root/unparseable
/// URLs. Query strings and fragments are not part of the path.
fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed
        .path()
        .split('/')
        .filter(|s| !s.is_empty())
        .last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// Sanitizes a candidate filename for the local filesystem.
///
/// Path separators, NUL, control characters, and whitespace become `_`
/// (runs collapsed); leading/trailing dots and underscores are trimmed;
/// length is capped at 255 bytes on a char boundary.
pub fn sanitize_filename(name: &str) -> String {
    const NAME_MAX: usize = 255;

    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        let mapped = match c {
            '\0' | '/' | '\\' | ' ' | '\t' => '_',
            c if c.is_control() => '_',
            c => c,
        };
        if mapped == '_' && out.ends_with('_') {
            continue;
        }
        out.push(mapped);
    }

    let trimmed = out.trim_matches(|c| c == '.' || c == '_');
    let mut take = trimmed.len().min(NAME_MAX);
    while take > 0 && !trimmed.is_char_boundary(take) {
        take -= 1;
    }
    trimmed[..take].to_string()
}
