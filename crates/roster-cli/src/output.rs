//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)
//!
//! Rows are numbered from 1; the number is the record's position in the
//! roster, also when printing search results.

use roster_core::StudentRecord;
use serde::Serialize;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// A record paired with its 1-based row number
#[derive(Debug, Serialize)]
pub struct Row<'a> {
    pub number: usize,
    #[serde(flatten)]
    pub record: &'a StudentRecord,
}

impl<'a> Row<'a> {
    /// Build a row from a zero-based roster position
    pub fn at(index: usize, record: &'a StudentRecord) -> Self {
        Self {
            number: index + 1,
            record,
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Print a single record
    pub fn print_record(&self, row: &Row<'_>) {
        match self.format {
            OutputFormat::Human => {
                println!("No.:   {}", row.number);
                println!("ID:    {}", row.record.id);
                println!("Name:  {}", row.record.name);
                println!("Email: {}", row.record.email);
            }
            OutputFormat::Json => {
                println!("{}", to_json(row));
            }
            OutputFormat::Quiet => {
                println!("{}", row.record.id);
            }
        }
    }

    /// Print a list of records
    pub fn print_records(&self, rows: &[Row<'_>]) {
        match self.format {
            OutputFormat::Human => {
                if rows.is_empty() {
                    println!("No records found.");
                    return;
                }
                for line in render_table(rows) {
                    println!("{}", line);
                }
                println!("\n{} record(s)", rows.len());
            }
            OutputFormat::Json => {
                println!("{}", to_json(rows));
            }
            OutputFormat::Quiet => {
                for row in rows {
                    println!("{}", row.record.id);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Check if we should prompt for confirmation
    pub fn should_prompt(&self) -> bool {
        self.format == OutputFormat::Human
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|e| format!("{{\"error\": \"{}\"}}", e))
}

/// Format rows as aligned table lines, avatar initial first
fn render_table(rows: &[Row<'_>]) -> Vec<String> {
    rows.iter()
        .map(|row| {
            let initial = row
                .record
                .initial()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_else(|| "?".to_string());
            format!(
                "{:>3}. [{}] {:<15} | {} | {}",
                row.number,
                initial,
                row.record.id,
                truncate(&row.record.name, 30),
                truncate(&row.record.email, 40)
            )
        })
        .collect()
}

/// Truncate a string to max chars, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
