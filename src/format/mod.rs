//! Output formatting for entries and generated links (table, JSON, markdown, CSV).

use crate::catalog::Entry;
use crate::config::OutputFormat;
use crate::selection::{GeneratedLink, Outcome};

const NONE: &str = "-";

/// Formats catalog entries and links for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats the entry list.
    pub fn format_entries(&self, entries: &[Entry]) -> String {
        if entries.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::entries_csv_header(),
                _ => "No products found.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(entries).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => self.table_entries(entries),
            OutputFormat::Markdown => self.markdown_entries(entries),
            OutputFormat::Csv => self.csv_entries(entries),
        }
    }

    /// Formats a single Generate outcome.
    pub fn format_outcome(&self, outcome: &Outcome) -> String {
        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
            }
            OutputFormat::Markdown => match outcome {
                Outcome::Link(link) => format!("[Buy now]({})", link),
                Outcome::Error(_) => format!("**{}**", outcome),
            },
            OutputFormat::Table | OutputFormat::Csv => outcome.to_string(),
        }
    }

    /// Formats a batch of generated links.
    pub fn format_links(&self, links: &[GeneratedLink]) -> String {
        if links.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => Self::links_csv_header(),
                _ => "No links generated.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(links).unwrap_or_else(|_| "[]".to_string())
            }
            OutputFormat::Table => self.table_links(links),
            OutputFormat::Markdown => self.markdown_links(links),
            OutputFormat::Csv => self.csv_links(links),
        }
    }

    // Table formatting

    fn table_entries(&self, entries: &[Entry]) -> String {
        let index_width = 4;
        let sku_width = 10;
        let name_width = 50;

        let mut lines = Vec::new();

        lines.push(format!(
            "{:<index_width$}  {:<sku_width$}  {:<sku_width$}  {}",
            "#", "Single", "Set", "Name"
        ));
        lines.push(format!(
            "{:-<index_width$}  {:-<sku_width$}  {:-<sku_width$}  {:-<name_width$}",
            "", "", "", ""
        ));

        for (i, entry) in entries.iter().enumerate() {
            lines.push(format!(
                "{:<index_width$}  {:<sku_width$}  {:<sku_width$}  {}",
                i,
                entry.sku_single.as_deref().unwrap_or(NONE),
                entry.sku_set.as_deref().unwrap_or(NONE),
                truncate(&entry.name, name_width)
            ));
            lines.push(format!("{:<index_width$}  URL: {}", "", entry.url));
        }

        lines.push(String::new());
        lines.push(format!("Total: {} products", entries.len()));

        lines.join("\n")
    }

    fn table_links(&self, links: &[GeneratedLink]) -> String {
        let mut lines = Vec::new();

        lines.push(format!("{:<4}  {:<7}  {:>3}  {}", "#", "Variant", "Qty", "Link"));
        lines.push(format!("{:-<4}  {:-<7}  {:->3}  {:-<60}", "", "", "", ""));

        for link in links {
            lines.push(format!(
                "{:<4}  {:<7}  {:>3}  {}",
                link.index,
                link.variant.to_string(),
                link.quantity,
                link.outcome
            ));
        }

        let failed = links.iter().filter(|l| l.outcome.is_error()).count();
        lines.push(String::new());
        lines.push(format!("Total: {} links ({} failed)", links.len(), failed));

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_entries(&self, entries: &[Entry]) -> String {
        let mut lines = Vec::new();

        lines.push("| # | Name | Single | Set |".to_string());
        lines.push("|---|------|--------|-----|".to_string());

        for (i, entry) in entries.iter().enumerate() {
            lines.push(format!(
                "| {} | [{}]({}) | {} | {} |",
                i,
                truncate(&entry.name, 40),
                entry.url,
                entry.sku_single.as_deref().unwrap_or(NONE),
                entry.sku_set.as_deref().unwrap_or(NONE)
            ));
        }

        lines.push(String::new());
        lines.push(format!("*{} products*", entries.len()));

        lines.join("\n")
    }

    fn markdown_links(&self, links: &[GeneratedLink]) -> String {
        let mut lines = Vec::new();

        lines.push("| # | Name | Variant | Qty | Link |".to_string());
        lines.push("|---|------|---------|-----|------|".to_string());

        for link in links {
            let cell = match &link.outcome {
                Outcome::Link(url) => format!("[Buy now]({})", url),
                Outcome::Error(_) => link.outcome.to_string(),
            };
            lines.push(format!(
                "| {} | {} | {} | {} | {} |",
                link.index,
                truncate(&link.name, 40),
                link.variant,
                link.quantity,
                cell
            ));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn entries_csv_header() -> String {
        "Name,URL,skuid_single,skuid_set".to_string()
    }

    fn csv_entries(&self, entries: &[Entry]) -> String {
        let mut lines = Vec::new();
        lines.push(Self::entries_csv_header());

        for entry in entries {
            lines.push(format!(
                "{},{},{},{}",
                Self::csv_escape(&entry.name),
                entry.url,
                entry.sku_single.as_deref().unwrap_or("null"),
                entry.sku_set.as_deref().unwrap_or("null")
            ));
        }

        lines.join("\n")
    }

    fn links_csv_header() -> String {
        "index,name,variant,quantity,link,error".to_string()
    }

    fn csv_links(&self, links: &[GeneratedLink]) -> String {
        let mut lines = Vec::new();
        lines.push(Self::links_csv_header());

        for link in links {
            let (url, error) = match &link.outcome {
                Outcome::Link(url) => (url.as_str(), String::new()),
                Outcome::Error(message) => ("", Self::csv_escape(message)),
            };
            lines.push(format!(
                "{},{},{},{},{},{}",
                link.index,
                Self::csv_escape(&link.name),
                link.variant,
                link.quantity,
                url,
                error
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }
}

/// Shortens `s` to at most `width` characters, marking the cut with "...".
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        s.to_string()
    }
}
