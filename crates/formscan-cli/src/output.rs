use console::style;
use serde::Serialize;
use serde_json::Value;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

/// Output format mode
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

#[derive(Debug, Clone, Copy)]
enum Status {
    Success,
    Info,
    Warning,
}

impl Status {
    fn label(self) -> &'static str {
        match self {
            Status::Success => "success",
            Status::Info => "info",
            Status::Warning => "warning",
        }
    }

    fn marker(self) -> console::StyledObject<&'static str> {
        match self {
            Status::Success => style("✓").green().bold(),
            Status::Info => style("ℹ").blue().bold(),
            Status::Warning => style("⚠").yellow().bold(),
        }
    }
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self { format: if json { OutputFormat::Json } else { OutputFormat::Human } }
    }

    pub fn success(&self, message: impl Display) {
        self.status(Status::Success, message);
    }

    pub fn info(&self, message: impl Display) {
        self.status(Status::Info, message);
    }

    /// Warnings go to stderr in both modes so stdout stays parseable
    pub fn warning(&self, message: impl Display) {
        self.status(Status::Warning, message);
    }

    fn status(&self, status: Status, message: impl Display) {
        let line = match self.format {
            OutputFormat::Human => format!("{} {}", status.marker(), message),
            OutputFormat::Json => status_json(status.label(), message),
        };
        match status {
            Status::Warning => eprintln!("{}", line),
            Status::Success | Status::Info => println!("{}", line),
        }
    }

    pub fn table<T: Tabled>(&self, data: Vec<T>) {
        if data.is_empty() {
            println!("{}", style("(no data)").dim());
        } else {
            let mut table = Table::new(data);
            table.with(Style::rounded());
            println!("{}", table);
        }
    }

    /// Print raw text, e.g. an export, untouched
    pub fn raw(&self, text: &str) {
        if text.ends_with('\n') {
            print!("{}", text);
        } else {
            println!("{}", text);
        }
    }

    pub fn result<T: Serialize>(&self, data: T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Human => {
                println!("{}", serde_json::to_string_pretty(&data)?);
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "status": "success",
                    "data": data,
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
        }
        Ok(())
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("{}: {}", style(key).bold(), value);
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    key.to_string(): value.to_string(),
                });
                println!("{}", output);
            }
        }
    }

    pub fn section(&self, title: impl Display) {
        match self.format {
            OutputFormat::Human => {
                println!("\n{}", style(title).bold().underlined());
            }
            OutputFormat::Json => {}
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }
}

fn status_json(status: &str, message: impl Display) -> String {
    let output = serde_json::json!({
        "status": status,
        "message": message.to_string(),
    });
    // A `Value` built from strings always serializes
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| Value::Null.to_string())
}
