//! Sitemap configuration and XML rendering.
//!
//! Rendering is pure string building; the API layer decides which rows go
//! in and where the file lands.

use serde::{Deserialize, Serialize};

/// Sitemap plugin configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SitemapConfig {
    /// `1` to rebuild the sitemap automatically after content mutations.
    pub auto_build: i64,
    /// Unix seconds of the last successful build, `0` if never built.
    pub updated_time: i64,
}

impl SitemapConfig {
    /// Whether mutations should trigger a background rebuild.
    pub fn auto_build_enabled(&self) -> bool {
        self.auto_build == 1
    }
}

/// A single `<url>` entry in the sitemap.
#[derive(Debug, Clone)]
pub struct SitemapEntry {
    /// Absolute URL of the page.
    pub loc: String,
    /// `YYYY-MM-DD` last-modified date, omitted when unknown.
    pub lastmod: Option<String>,
}

/// Render a sitemaps.org `urlset` document for the given entries.
pub fn render(entries: &[SitemapEntry]) -> String {
    let mut xml = String::with_capacity(128 + entries.len() * 96);
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n");

    for entry in entries {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(&entry.loc));
        xml.push_str("</loc>\n");
        if let Some(lastmod) = &entry.lastmod {
            xml.push_str("    <lastmod>");
            xml.push_str(&escape_xml(lastmod));
            xml.push_str("</lastmod>\n");
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

/// Escape the five XML special characters in text content.
fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_empty_urlset() {
        let xml = render(&[]);
        assert!(xml.starts_with("<?xml version=\"1.0\""));
        assert!(xml.contains("<urlset"));
        assert!(xml.ends_with("</urlset>\n"));
    }

    #[test]
    fn renders_entries_with_optional_lastmod() {
        let entries = vec![
            SitemapEntry {
                loc: "https://example.com/products/widget".to_string(),
                lastmod: Some("2026-08-01".to_string()),
            },
            SitemapEntry {
                loc: "https://example.com/".to_string(),
                lastmod: None,
            },
        ];
        let xml = render(&entries);
        assert!(xml.contains("<loc>https://example.com/products/widget</loc>"));
        assert!(xml.contains("<lastmod>2026-08-01</lastmod>"));
        assert_eq!(xml.matches("<url>").count(), 2);
        assert_eq!(xml.matches("<lastmod>").count(), 1);
    }

    #[test]
    fn escapes_special_characters_in_loc() {
        let entries = vec![SitemapEntry {
            loc: "https://example.com/search?q=a&b=<c>".to_string(),
            lastmod: None,
        }];
        let xml = render(&entries);
        assert!(xml.contains("q=a&amp;b=&lt;c&gt;"));
    }

    #[test]
    fn auto_build_flag() {
        assert!(!SitemapConfig::default().auto_build_enabled());
        let config = SitemapConfig {
            auto_build: 1,
            updated_time: 0,
        };
        assert!(config.auto_build_enabled());
    }
}
