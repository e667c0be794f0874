//! Anchor-text SEO: keyword-to-link replacement in HTML content.
//!
//! The engine never touches text inside existing anchors or inside tag
//! markup, so attributes and already-linked keywords are left alone.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Anchor plugin configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnchorConfig {
    /// Minimum content length (chars) per inserted link; `0` means no
    /// density limit.
    pub anchor_density: i64,
    /// `1` to link every occurrence (within the density budget), anything
    /// else links only the first occurrence of each keyword.
    pub replace_way: i64,
    /// How keyword lists are sourced (manual vs harvested). Stored for the
    /// admin UI; the replacement engine does not interpret it.
    pub keyword_way: i64,
}

impl AnchorConfig {
    /// Maximum links to insert per keyword for content of `content_chars`.
    fn budget(&self, content_chars: usize) -> usize {
        let cap = if self.anchor_density > 0 {
            (content_chars / self.anchor_density as usize).max(1)
        } else {
            usize::MAX
        };
        if self.replace_way == 1 {
            cap
        } else {
            1
        }
    }
}

/// A keyword and the URL it should link to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchorKeyword {
    pub keyword: String,
    pub url: String,
}

/// Matches spans that must never be rewritten: whole existing anchors,
/// then any other tag markup.
fn protected_span_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<a\b[^>]*>.*?</a>|<[^>]+>").expect("static regex"))
}

/// Replace keyword occurrences in `content` with anchor links.
///
/// Matching is case-sensitive and processed left to right; when two
/// keywords match at the same position the longer one wins. Each keyword
/// gets at most its density budget of links (see [`AnchorConfig`]).
pub fn replace_anchors(content: &str, keywords: &[AnchorKeyword], config: &AnchorConfig) -> String {
    if keywords.is_empty() || content.is_empty() {
        return content.to_string();
    }

    let budget = config.budget(content.chars().count());
    let mut remaining: Vec<usize> = keywords
        .iter()
        .map(|k| if k.keyword.is_empty() { 0 } else { budget })
        .collect();

    let mut out = String::with_capacity(content.len() + 64);
    let mut last = 0;

    for span in protected_span_re().find_iter(content) {
        replace_in_text(&content[last..span.start()], keywords, &mut remaining, &mut out);
        out.push_str(span.as_str());
        last = span.end();
    }
    replace_in_text(&content[last..], keywords, &mut remaining, &mut out);

    out
}

/// Rewrite one plain-text run, consuming keyword budgets.
fn replace_in_text(
    text: &str,
    keywords: &[AnchorKeyword],
    remaining: &mut [usize],
    out: &mut String,
) {
    let mut rest = text;

    loop {
        // Earliest match wins; on ties, the longest keyword.
        let mut best: Option<(usize, usize)> = None;
        for (i, k) in keywords.iter().enumerate() {
            if remaining[i] == 0 {
                continue;
            }
            if let Some(pos) = rest.find(&k.keyword) {
                let better = match best {
                    None => true,
                    Some((bpos, bi)) => {
                        pos < bpos
                            || (pos == bpos && k.keyword.len() > keywords[bi].keyword.len())
                    }
                };
                if better {
                    best = Some((pos, i));
                }
            }
        }

        let Some((pos, i)) = best else {
            out.push_str(rest);
            return;
        };

        let keyword = &keywords[i];
        out.push_str(&rest[..pos]);
        out.push_str(&format!(
            "<a href=\"{}\">{}</a>",
            keyword.url, keyword.keyword
        ));
        remaining[i] -= 1;
        rest = &rest[pos + keyword.keyword.len()..];
    }
}
