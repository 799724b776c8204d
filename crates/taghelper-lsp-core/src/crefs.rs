//! Documentation summaries and cross-reference rewriting
//!
//! Descriptor documentation arrives as a raw XML doc-comment block. Only the
//! `<summary>` region is shown in a tooltip, and the `<see cref="..."/>`
//! markers inside it are replaced with the reduced name of the signature they
//! point at, rendered as inline code.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::signatures::{reduce, reduce_member};

const SUMMARY_START: &str = "<summary>";
const SUMMARY_END: &str = "</summary>";

/// Length of the `K:` kind prefix on a cref value
const CREF_PREFIX_LEN: usize = 2;

/// `<see cref="..."/>` and `<seealso cref="..."/>`; group 2 is the cref value
static CREF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<(see|seealso)\s+cref="([^">]+)"[^>]*>"#).expect("valid regex")
});

/// Extract the text between `<summary>` and `</summary>`.
///
/// Delimiters match case-insensitively. Returns `None` for an absent or empty
/// block, or when either delimiter is missing; a summary is never partially
/// extracted.
pub fn extract_summary(documentation: Option<&str>) -> Option<&str> {
    let documentation = documentation.filter(|doc| !doc.is_empty())?;

    // ASCII lowercasing keeps byte offsets aligned with the original text.
    let folded = documentation.to_ascii_lowercase();
    let start = folded.find(SUMMARY_START)? + SUMMARY_START.len();
    let end = folded.find(SUMMARY_END)?;

    if end < start {
        tracing::debug!("summary end tag precedes start tag");
        return None;
    }

    Some(&documentation[start..end])
}

/// Replace every cross-reference marker in `summary` with its reduced name.
///
/// Markers are replaced in place, last to first, so that the offsets of the
/// earlier matches stay valid. Afterwards each line is trimmed and the lines
/// are rejoined with `\n`.
pub fn rewrite_cross_references(summary: &str) -> String {
    let markers: Vec<_> = CREF_PATTERN
        .captures_iter(summary)
        .filter_map(|caps| Some((caps.get(0)?.range(), caps.get(2)?.as_str())))
        .collect();

    let mut rewritten = summary.to_string();
    for (span, value) in markers.into_iter().rev() {
        rewritten.replace_range(span, &render_cref(value));
    }

    rewritten
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one cref value such as `T:Ns.Type` or `M:Ns.Type.Method(System.String)`.
fn render_cref(value: &str) -> String {
    let signature = match value.get(CREF_PREFIX_LEN..) {
        Some(signature) if !signature.is_empty() => signature,
        _ => {
            tracing::debug!(value, "malformed cref value");
            return String::new();
        }
    };

    let reduced = match value.as_bytes()[0] {
        b'T' => reduce(signature).to_string(),
        b'P' | b'M' => reduce_member(signature),
        _ => return signature.to_string(),
    };

    format!("`{}`", reduced.replace('{', "<").replace('}', ">"))
}
