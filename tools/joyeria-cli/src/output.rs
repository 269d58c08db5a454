//! Terminal output: status lines, key/value blocks, tables and spinners.
//!
//! In `--json` mode every human-oriented method is silent and commands emit
//! one JSON document through [`Output::json`]. Errors are the exception and
//! are written to stderr as `{"error": "..."}`.

use std::time::Duration;

use console::{measure_text_width, pad_str, style, Alignment, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};
use joyeria_commerce::checkout::OrderStatus;

const SPINNER_TICK: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Human { verbose: bool },
    Json,
}

/// Output handler shared by every command.
#[derive(Clone)]
pub struct Output {
    mode: Mode,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        let mode = if json {
            Mode::Json
        } else {
            Mode::Human { verbose }
        };
        Self { mode }
    }

    pub fn is_json(&self) -> bool {
        self.mode == Mode::Json
    }

    fn human(&self) -> bool {
        !self.is_json()
    }

    pub fn info(&self, msg: &str) {
        if self.human() {
            println!("{} {msg}", style("ℹ").blue());
        }
    }

    pub fn success(&self, msg: &str) {
        if self.human() {
            println!("{} {msg}", style("✓").green());
        }
    }

    pub fn warn(&self, msg: &str) {
        if self.human() {
            eprintln!("{} {msg}", style("⚠").yellow());
        }
    }

    /// Report a failure. Printed in JSON mode too.
    pub fn error(&self, msg: &str) {
        match self.mode {
            Mode::Json => eprintln!("{}", serde_json::json!({ "error": msg })),
            Mode::Human { .. } => eprintln!("{} {}", style("✗").red(), style(msg).red()),
        }
    }

    /// Diagnostic line shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if let Mode::Human { verbose: true } = self.mode {
            eprintln!("{}", style(format!("→ {msg}")).dim());
        }
    }

    /// Section title.
    pub fn header(&self, title: &str) {
        if self.human() {
            println!("\n{}", style(title).bold().underlined());
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if self.human() {
            println!("  {}: {value}", style(key).dim());
        }
    }

    pub fn list_item(&self, item: &str) {
        if self.human() {
            println!("  {} {item}", style("•").dim());
        }
    }

    /// Pretty-print a value as the command's JSON result.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(text) => println!("{text}"),
            Err(e) => self.error(&format!("cannot encode output: {e}")),
        }
    }

    /// Start a table with `(title, width)` columns and print its header.
    pub fn table(&self, columns: &[(&str, usize)]) -> Table {
        let table = Table {
            widths: columns.iter().map(|(_, w)| *w).collect(),
            visible: self.human(),
        };
        if table.visible {
            let titles: Vec<&str> = columns.iter().map(|(t, _)| *t).collect();
            table.row(&titles);
            let span = table.widths.iter().sum::<usize>() + 2 * table.widths.len().saturating_sub(1);
            println!("  {}", style("-".repeat(span)).dim());
        }
        table
    }

    /// Spinner shown while a request is in flight. Hidden in JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.is_json() {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            bar.set_style(template);
        }
        bar.set_message(msg.to_string());
        bar.enable_steady_tick(SPINNER_TICK);
        bar
    }
}

/// Fixed-width table opened by [`Output::table`].
pub struct Table {
    widths: Vec<usize>,
    visible: bool,
}

impl Table {
    /// Print one row. Cells may carry color codes.
    pub fn row<S: AsRef<str>>(&self, cells: &[S]) {
        if !self.visible {
            return;
        }
        let line: Vec<String> = cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, width)| pad_str(cell.as_ref(), *width, Alignment::Left, None).into_owned())
            .collect();
        println!("  {}", line.join("  ").trim_end());
    }
}

/// Colored label for an order status.
pub fn status_badge(status: OrderStatus) -> String {
    let label = style(status.display_name());
    let styled: StyledObject<&str> = match status {
        OrderStatus::Completed => label.green(),
        OrderStatus::Pending => label.yellow(),
        OrderStatus::PaymentFailed => label.red(),
        OrderStatus::Unknown => label.dim(),
    };
    styled.to_string()
}

/// Cut `text` to at most `max` display columns, ending in an ellipsis when cut.
pub fn truncate(text: &str, max: usize) -> String {
    if measure_text_width(text) <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}
