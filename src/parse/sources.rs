//! Grounding-citation cleanup.
//!
//! Search grounding returns one citation per chunk, so the same page shows
//! up several times per response. Citations missing a uri or title are
//! dropped, then the list is collapsed to unique uris.

use crate::models::WebSource;
use std::collections::HashSet;

/// A citation as returned by the generation API; both fields may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCitation {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// Collapse raw citations to unique sources, keyed by uri.
///
/// The first occurrence of a uri wins, for both its position and its title;
/// later duplicates never reorder or overwrite it. Citations with a missing
/// or empty uri or title are dropped first.
pub fn dedupe_sources(citations: &[RawCitation]) -> Vec<WebSource> {
    let mut seen = HashSet::new();
    let mut sources = Vec::new();

    for citation in citations {
        let (uri, title) = match (&citation.uri, &citation.title) {
            (Some(uri), Some(title)) if !uri.is_empty() && !title.is_empty() => (uri, title),
            _ => continue,
        };

        if seen.insert(uri.clone()) {
            sources.push(WebSource {
                uri: uri.clone(),
                title: title.clone(),
            });
        }
    }

    sources
}
