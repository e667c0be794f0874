//! Logo and thumbnail URL resolution for content rows.
//!
//! Content rows store a bare list of image paths; the logo and thumbnail
//! shown in listings are derived at read time and never persisted.

use serde::Serialize;

/// Resolved display images for a content row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedThumb {
    /// Absolute URL of the full-size lead image.
    pub logo: String,
    /// Absolute URL of the thumbnail variant.
    pub thumb: String,
}

/// Resolve the logo/thumbnail pair for an image list.
///
/// - The first image in the list is the lead image.
/// - Remote images (`http`/`https`) are used as-is for both logo and thumb.
/// - Local paths are prefixed with `base_url`; the thumbnail lives next to
///   the original with a `thumb_` filename prefix.
/// - With no images, falls back to `default_thumb` (relative to `base_url`).
///
/// Returns `None` when there is neither an image nor a default configured.
pub fn resolve(images: &[String], base_url: &str, default_thumb: &str) -> Option<ResolvedThumb> {
    if let Some(first) = images.first() {
        if first.starts_with("http") {
            return Some(ResolvedThumb {
                logo: first.clone(),
                thumb: first.clone(),
            });
        }

        let (dir, file) = match first.rfind('/') {
            Some(idx) => first.split_at(idx + 1),
            None => ("", first.as_str()),
        };
        return Some(ResolvedThumb {
            logo: format!("{base_url}{first}"),
            thumb: format!("{base_url}{dir}thumb_{file}"),
        });
    }

    if default_thumb.is_empty() {
        return None;
    }

    let logo = format!("{base_url}{default_thumb}");
    Some(ResolvedThumb {
        thumb: logo.clone(),
        logo,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com";

    #[test]
    fn remote_image_passes_through() {
        let images = vec!["https://cdn.example.com/a.jpg".to_string()];
        let resolved = resolve(&images, BASE, "").unwrap();
        assert_eq!(resolved.logo, "https://cdn.example.com/a.jpg");
        assert_eq!(resolved.thumb, "https://cdn.example.com/a.jpg");
    }

    #[test]
    fn local_image_gets_thumb_prefix() {
        let images = vec!["/uploads/2024/a.jpg".to_string()];
        let resolved = resolve(&images, BASE, "").unwrap();
        assert_eq!(resolved.logo, "https://example.com/uploads/2024/a.jpg");
        assert_eq!(
            resolved.thumb,
            "https://example.com/uploads/2024/thumb_a.jpg"
        );
    }

    #[test]
    fn first_image_wins() {
        let images = vec![
            "/uploads/first.png".to_string(),
            "/uploads/second.png".to_string(),
        ];
        let resolved = resolve(&images, BASE, "").unwrap();
        assert_eq!(resolved.logo, "https://example.com/uploads/first.png");
    }

    #[test]
    fn falls_back_to_default_thumb() {
        let resolved = resolve(&[], BASE, "/static/default.png").unwrap();
        assert_eq!(resolved.logo, "https://example.com/static/default.png");
        assert_eq!(resolved.thumb, resolved.logo);
    }

    #[test]
    fn nothing_to_resolve() {
        assert_eq!(resolve(&[], BASE, ""), None);
    }
}
