//! Output formatting for scan results.

use crate::scan::FileReport;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

/// Available output formats
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    /// Human-readable `file:line: language (class)` lines
    #[default]
    Text,
    /// A single JSON array covering every scanned file
    Json,
    /// One JSON object per code block
    JsonLines,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "json-lines" | "jsonlines" | "jsonl" => Ok(Self::JsonLines),
            _ => Err(format!("Unknown output format: {s} (expected text, json or json-lines)")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::JsonLines => "json-lines",
        };
        f.write_str(name)
    }
}

impl OutputFormat {
    pub fn create_formatter(&self, use_colors: bool) -> Box<dyn OutputFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter { use_colors }),
            Self::Json => Box::new(JsonFormatter),
            Self::JsonLines => Box::new(JsonLinesFormatter),
        }
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format the blocks of one file. May be empty for collecting formatters.
    fn format_file(&self, report: &FileReport) -> String;

    /// Format output that needs every file at once
    fn format_summary(&self, _reports: &[FileReport]) -> Option<String> {
        None
    }
}

fn block_json(report: &FileReport, index: usize) -> Value {
    let block = &report.blocks[index];
    json!({
        "file": report.path,
        "line": block.start_line,
        "end_line": block.end_line,
        "fenced": block.fenced,
        "info": block.info_string,
        "class_name": block.class_name,
        "language": block.language,
    })
}

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }
}

impl OutputFormatter for TextFormatter {
    fn format_file(&self, report: &FileReport) -> String {
        let mut output = String::new();
        for block in &report.blocks {
            let origin = block.class_name.as_deref().unwrap_or("default");
            if self.use_colors {
                output.push_str(&format!(
                    "{}:{}: {} ({})\n",
                    report.path.bold(),
                    block.start_line.to_string().cyan(),
                    block.language.green(),
                    origin.dimmed()
                ));
            } else {
                output.push_str(&format!("{}:{}: {} ({})\n", report.path, block.start_line, block.language, origin));
            }
        }
        output
    }
}

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_file(&self, _report: &FileReport) -> String {
        String::new()
    }

    fn format_summary(&self, reports: &[FileReport]) -> Option<String> {
        let blocks: Vec<Value> = reports
            .iter()
            .flat_map(|report| (0..report.blocks.len()).map(move |i| block_json(report, i)))
            .collect();
        Some(serde_json::to_string_pretty(&blocks).unwrap_or_else(|_| "[]".to_string()))
    }
}

pub struct JsonLinesFormatter;

impl OutputFormatter for JsonLinesFormatter {
    fn format_file(&self, report: &FileReport) -> String {
        (0..report.blocks.len())
            .map(|i| format!("{}\n", block_json(report, i)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::extract_code_blocks;

    fn report() -> FileReport {
        FileReport {
            path: "docs/intro.md".to_string(),
            blocks: extract_code_blocks("```rust\nfn main() {}\n```\n\n```\nplain\n```\n"),
        }
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert_eq!("jsonl".parse::<OutputFormat>(), Ok(OutputFormat::JsonLines));
        assert!("sarif".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_output_format_display_round_trips() {
        for format in [OutputFormat::Text, OutputFormat::Json, OutputFormat::JsonLines] {
            assert_eq!(format.to_string().parse::<OutputFormat>(), Ok(format));
        }
    }

    #[test]
    fn test_text_formatter() {
        let output = TextFormatter::new(false).format_file(&report());
        assert_eq!(
            output,
            "docs/intro.md:1: rust (language-rust)\ndocs/intro.md:5: javascript (default)\n"
        );
    }

    #[test]
    fn test_json_formatter_collects() {
        let formatter = JsonFormatter;
        let reports = vec![report()];

        assert_eq!(formatter.format_file(&reports[0]), "");
        let summary = formatter.format_summary(&reports).unwrap();
        let parsed: Value = serde_json::from_str(&summary).unwrap();
        assert_eq!(parsed[0]["language"], "rust");
        assert_eq!(parsed[1]["class_name"], Value::Null);
        assert_eq!(parsed[1]["line"], 5);
    }

    #[test]
    fn test_json_lines_formatter() {
        let output = JsonLinesFormatter.format_file(&report());
        let lines: Vec<Value> = output.lines().map(|l| serde_json::from_str(l).unwrap()).collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["file"], "docs/intro.md");
        assert_eq!(lines[1]["language"], "javascript");
        assert!(JsonLinesFormatter.format_summary(&[report()]).is_none());
    }
}
