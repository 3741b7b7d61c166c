//! Response parsing: section extraction, analysis formatting, and
//! source deduplication.

mod formatter;
mod sections;
mod sources;

pub use formatter::format_analysis;
pub use sections::extract_sections;
pub use sources::{dedupe_sources, RawCitation};
