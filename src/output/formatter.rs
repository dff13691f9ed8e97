use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use crate::api::types::{field, ScorePage, WineScore};
use crate::cli::OutputFormat;
use crate::error::{GwsError, Result};

/// Shown in place of a field the server did not return
pub const PLACEHOLDER: &str = "-";

const HEADERS: [&str; 9] = [
    "#",
    "Wine",
    "Vintage",
    "Color",
    "Score",
    "Confidence",
    "Appellation",
    "Primeurs",
    "LWIN",
];

pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Format one page of scores. `offset` is the position of the first result.
    pub fn format_page(&self, page: &ScorePage, offset: u32) -> Result<String> {
        match self.format {
            OutputFormat::Table => self.format_page_table(page, offset),
            OutputFormat::Json => self.format_page_json(page),
            OutputFormat::Csv => self.format_page_csv(page, offset),
            OutputFormat::Markdown => self.format_page_markdown(page, offset),
        }
    }

    fn format_page_table(&self, page: &ScorePage, offset: u32) -> Result<String> {
        let mut table = Table::new();

        table.set_header(
            HEADERS
                .iter()
                .map(|h| Cell::new(h).fg(Color::Cyan))
                .collect::<Vec<_>>(),
        );

        for (idx, wine) in page.results.iter().enumerate() {
            let row = row_values(wine, offset, idx);
            let mut cells: Vec<Cell> = row.iter().map(Cell::new).collect();
            if let Some(color) = wine.score().and_then(score_color) {
                cells[4] = Cell::new(&row[4]).fg(color);
            }
            table.add_row(cells);
        }

        table.set_content_arrangement(ContentArrangement::Dynamic);

        let mut result = String::new();
        result.push_str(&format!("\n{}\n\n", summary_line(page, offset)));
        result.push_str(&table.to_string());

        if page.next.is_some() {
            let next_offset = offset as usize + page.results.len();
            result.push_str(&format!(
                "\n\n{} More results available: rerun with --offset {}",
                "➡".cyan(),
                next_offset.to_string().yellow()
            ));
        }

        Ok(result)
    }

    fn format_page_json(&self, page: &ScorePage) -> Result<String> {
        serde_json::to_string_pretty(page).map_err(GwsError::Serialization)
    }

    fn format_page_csv(&self, page: &ScorePage, offset: u32) -> Result<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);

        wtr.write_record(HEADERS)?;
        for (idx, wine) in page.results.iter().enumerate() {
            wtr.write_record(row_values(wine, offset, idx))?;
        }

        let data = wtr
            .into_inner()
            .map_err(|e| GwsError::Io(e.into_error()))?;

        String::from_utf8(data).map_err(|e| GwsError::InvalidInput(e.to_string()))
    }

    fn format_page_markdown(&self, page: &ScorePage, offset: u32) -> Result<String> {
        let mut result = String::new();

        result.push_str("# Wine scores\n\n");
        result.push_str(&format!("- **Total**: {}\n", page.count));
        result.push_str(&format!("- **Showing**: {}\n\n", shown_range(page, offset)));

        result.push_str(&format!("| {} |\n", HEADERS.join(" | ")));
        result.push_str(&format!("|{}\n", "---|".repeat(HEADERS.len())));

        for (idx, wine) in page.results.iter().enumerate() {
            let row: Vec<String> = row_values(wine, offset, idx)
                .iter()
                .map(|v| escape_markdown(v))
                .collect();
            result.push_str(&format!("| {} |\n", row.join(" | ")));
        }

        Ok(result)
    }
}

/// Display values for one result, placeholders substituted
fn row_values(wine: &WineScore, offset: u32, idx: usize) -> Vec<String> {
    vec![
        (offset as usize + idx + 1).to_string(),
        truncate_string(&or_placeholder(wine, field::WINE_NAME), 40),
        or_placeholder(wine, field::VINTAGE),
        or_placeholder(wine, field::COLOR),
        or_placeholder(wine, field::SCORE),
        or_placeholder(wine, field::CONFIDENCE_INDEX),
        truncate_string(&or_placeholder(wine, field::APPELLATION), 30),
        match wine.is_primeurs() {
            Some(true) => "yes".to_string(),
            Some(false) => "no".to_string(),
            None => or_placeholder(wine, field::IS_PRIMEURS),
        },
        or_placeholder(wine, field::LWIN),
    ]
}

fn summary_line(page: &ScorePage, offset: u32) -> String {
    format!(
        "{} Total: {} | Showing: {} | Results: {}",
        "🍷".cyan(),
        page.count.to_string().yellow(),
        shown_range(page, offset).yellow(),
        page.results.len().to_string().yellow()
    )
}

fn shown_range(page: &ScorePage, offset: u32) -> String {
    if page.results.is_empty() {
        return "0".to_string();
    }
    let first = offset as usize + 1;
    let last = offset as usize + page.results.len();
    format!("{}-{}", first, last)
}

fn score_color(score: f64) -> Option<Color> {
    if score >= 95.0 {
        Some(Color::Green)
    } else if score >= 90.0 {
        Some(Color::DarkGreen)
    } else if score >= 85.0 {
        Some(Color::Yellow)
    } else {
        None
    }
}

fn or_placeholder(wine: &WineScore, name: &str) -> String {
    wine.display(name)
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| PLACEHOLDER.to_string())
}

fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

fn escape_markdown(s: &str) -> String {
    s.replace('|', "\\|")
        .replace('*', "\\*")
        .replace('_', "\\_")
}
