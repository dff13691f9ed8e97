pub mod formatter;

pub use formatter::Formatter;

use crate::api::types::ScorePage;
use crate::cli::OutputFormat;
use crate::error::Result;

/// Format a page of scores based on the specified format
pub fn format_score_page(page: &ScorePage, offset: u32, format: OutputFormat) -> Result<String> {
    let formatter = Formatter::new(format);
    formatter.format_page(page, offset)
}
