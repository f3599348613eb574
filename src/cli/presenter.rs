//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::report::{Block, Inline, Report};

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏");
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Handle that callbacks can use to update the running spinner
    pub fn spinner_handle(&self) -> Option<ProgressBar> {
        self.spinner.clone()
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout (the analysis itself)
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print the analysis as a styled report
    pub fn report(&self, report: &Report) {
        print!("{}", format_report(report));
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a report node tree for the terminal
pub fn format_report(report: &Report) -> String {
    let mut out = String::new();
    let mut previous: Option<&Block> = None;

    for block in report.blocks() {
        // Blank line between blocks, except between consecutive list items
        let in_list = matches!(
            (previous, block),
            (
                Some(Block::Bullet { .. } | Block::Numbered { .. }),
                Block::Bullet { .. } | Block::Numbered { .. }
            )
        );
        if previous.is_some() && !in_list {
            out.push('\n');
        }

        match block {
            Block::Heading { inlines, .. } => {
                out.push_str(&format_inlines(inlines).bold().cyan().to_string());
            }
            Block::Bullet { depth, inlines } => {
                out.push_str(&"  ".repeat(*depth));
                out.push_str("• ");
                out.push_str(&format_inlines(inlines));
            }
            Block::Numbered {
                number,
                depth,
                inlines,
            } => {
                out.push_str(&"  ".repeat(*depth));
                out.push_str(&format!("{}. ", number));
                out.push_str(&format_inlines(inlines));
            }
            Block::Paragraph(inlines) => out.push_str(&format_inlines(inlines)),
            Block::Code { lines, .. } => {
                let body: Vec<String> = lines
                    .iter()
                    .map(|line| format!("    {}", line.yellow()))
                    .collect();
                out.push_str(&body.join("\n"));
            }
            Block::Rule => out.push_str(&"─".repeat(40).dimmed().to_string()),
        }
        out.push('\n');
        previous = Some(block);
    }

    out
}

fn format_inlines(inlines: &[Inline]) -> String {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(text) => text.clone(),
            Inline::Strong(text) => text.bold().to_string(),
            Inline::Emphasis(text) => text.italic().to_string(),
            Inline::Code(text) => text.yellow().to_string(),
        })
        .collect()
}
