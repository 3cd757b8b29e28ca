//! # Image URL Resolver
//!
//! Maps a stored image key to an absolute URL on the asset bucket.
//!
//! ```text
//! None / ""                → placeholder
//! "https://cdn/x.jpg"      → unchanged
//! "hero/a.jpg"             → {base}/hero/a.jpg
//! "/images/hero/a.jpg"     → {base}/hero/a.jpg   (legacy prefix dropped)
//! ```

pub const DEFAULT_PLACEHOLDER: &str = "/placeholder.svg";

/// Older records stored keys under this folder; the bucket no longer has it.
const LEGACY_PREFIX: &str = "images/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageResolver {
    base_url: String,
    placeholder: String,
}

impl ImageResolver {
    pub fn new(base_url: impl Into<String>, placeholder: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            placeholder: placeholder.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn resolve(&self, key: Option<&str>) -> String {
        let Some(key) = key.filter(|k| !k.is_empty()) else {
            return self.placeholder.clone();
        };

        if key.starts_with("http") {
            return key.to_string();
        }

        let key = key.strip_prefix('/').unwrap_or(key);
        let key = key.strip_prefix(LEGACY_PREFIX).unwrap_or(key);
        format!("{}/{}", self.base_url, key)
    }

    /// First image of a record, or the placeholder when there is none.
    pub fn first(&self, keys: &[String]) -> String {
        self.resolve(keys.first().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://assets.example.com/villa";

    fn resolver() -> ImageResolver {
        ImageResolver::new(BASE, DEFAULT_PLACEHOLDER)
    }

    #[test]
    fn test_missing_key_gives_placeholder() {
        assert_eq!(resolver().resolve(None), DEFAULT_PLACEHOLDER);
        assert_eq!(resolver().resolve(Some("")), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_key_is_used_as_given() {
        assert_eq!(
            resolver().resolve(Some(" hero/a.jpg")),
            format!("{BASE}/ hero/a.jpg")
        );
        assert_ne!(resolver().resolve(Some("   ")), DEFAULT_PLACEHOLDER);
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        assert_eq!(resolver().resolve(Some("https://x/y.jpg")), "https://x/y.jpg");
        assert_eq!(resolver().resolve(Some("http://x/y.jpg")), "http://x/y.jpg");
    }

    #[test]
    fn test_relative_key_joins_base() {
        assert_eq!(resolver().resolve(Some("hero/a.jpg")), format!("{BASE}/hero/a.jpg"));
    }

    #[test]
    fn test_leading_slash_and_legacy_prefix_are_stripped() {
        assert_eq!(
            resolver().resolve(Some("/images/hero/a.jpg")),
            format!("{BASE}/hero/a.jpg")
        );
        assert_eq!(resolver().resolve(Some("images/a.jpg")), format!("{BASE}/a.jpg"));
        assert_eq!(resolver().resolve(Some("/a.jpg")), format!("{BASE}/a.jpg"));
    }

    #[test]
    fn test_trailing_slash_on_base_is_ignored() {
        let r = ImageResolver::new(format!("{BASE}/"), DEFAULT_PLACEHOLDER);
        assert_eq!(r.resolve(Some("a.jpg")), format!("{BASE}/a.jpg"));
    }

    #[test]
    fn test_first_falls_back_to_placeholder() {
        assert_eq!(resolver().first(&[]), DEFAULT_PLACEHOLDER);
        assert_eq!(
            resolver().first(&["rooms/1.jpg".to_string(), "rooms/2.jpg".to_string()]),
            format!("{BASE}/rooms/1.jpg")
        );
    }
}
