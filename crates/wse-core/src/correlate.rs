//! Pair sticker ids with their download URLs by array position.
//!
//! The favorites archive stores each sticker as consecutive string entries
//! in a flat array: the id, then the URL. Nothing else ties the two together,
//! so every URL is paired with the entry immediately before it.

use std::path::Path;

use crate::sticker::{is_url, is_valid_id, Sticker};

/// Outcome of trying to pair one URL node with its predecessor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Correlation {
    /// `id` directly precedes `url`.
    Matched { id: String, url: String },
    /// The URL is the first node; there is no id to pair it with.
    OrphanedUrl { url: String },
    /// The node before the URL is not a lowercase hex id.
    InvalidId { candidate: String, url: String },
}

/// Walks `nodes` and returns one [`Correlation`] per URL node, in order.
///
/// Non-URL nodes produce nothing on their own. Each URL is judged only
/// against its own predecessor, so back-to-back URLs make the second one an
/// `InvalidId`.
pub fn correlate<S: AsRef<str>>(nodes: &[S]) -> Vec<Correlation> {
    let mut out = Vec::new();
    let mut prev: Option<&str> = None;
    for node in nodes {
        let text = node.as_ref();
        if is_url(text) {
            let url = text.to_string();
            out.push(match prev {
                None => Correlation::OrphanedUrl { url },
                Some(id) if is_valid_id(id) => Correlation::Matched {
                    id: id.to_string(),
                    url,
                },
                Some(id) => Correlation::InvalidId {
                    candidate: id.to_string(),
                    url,
                },
            });
        }
        prev = Some(text);
    }
    out
}

/// Turns correlations into sticker candidates whose reference artifact lives
/// under `reference_dir`. Anomalies are logged and dropped.
pub fn candidates(correlations: Vec<Correlation>, reference_dir: &Path) -> Vec<Sticker> {
    correlations
        .into_iter()
        .filter_map(|c| match c {
            Correlation::Matched { id, url } => {
                let reference_path = reference_dir.join(&id);
                Some(Sticker::candidate(id, url, reference_path))
            }
            Correlation::OrphanedUrl { url } => {
                tracing::warn!("found url {:?} at the beginning without an id before it, skipped", url);
                None
            }
            Correlation::InvalidId { candidate, url } => {
                tracing::warn!(
                    "the string {:?} before {:?} isn't a valid sticker id, skipped",
                    candidate,
                    url
                );
                None
            }
        })
        .collect()
}
