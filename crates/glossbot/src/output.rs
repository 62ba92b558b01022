use colored::*;
use serde::Serialize;

/// Output mode for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Human,
    Json,
    Quiet,
}

/// Accumulated JSON result entry.
#[derive(Debug, Serialize, Clone)]
pub struct JsonResultEntry {
    #[serde(rename = "type")]
    pub result_type: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Accumulated JSON output.
#[derive(Debug, Serialize)]
pub struct JsonOutput {
    pub results: Vec<JsonResultEntry>,
}

/// Reporter handles all output formatting.
pub struct Reporter {
    mode: OutputMode,
    json_results: Vec<JsonResultEntry>,
}

impl Reporter {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            json_results: Vec::new(),
        }
    }

    /// Returns the current output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    fn push(&mut self, result_type: &str, message: &str, details: Option<&str>) {
        self.json_results.push(JsonResultEntry {
            result_type: result_type.to_string(),
            message: message.to_string(),
            details: details.map(str::to_string),
            data: None,
        });
    }

    #[cfg(test)]
    pub fn results(&self) -> &[JsonResultEntry] {
        &self.json_results
    }

    /// Errors are printed in every mode except JSON, where they are collected.
    pub fn error(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human | OutputMode::Quiet => {
                eprintln!("{} {}", "⚠ ERROR:".red(), message);
            }
            OutputMode::Json => self.push("error", message, None),
        }
    }

    pub fn warning(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                eprintln!("{} {}", "WARNING:".yellow(), message);
            }
            OutputMode::Json => self.push("warning", message, None),
            OutputMode::Quiet => {}
        }
    }

    pub fn success(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", "✓".green(), message);
            }
            OutputMode::Json => self.push("success", message, None),
            OutputMode::Quiet => {}
        }
    }

    pub fn success_with_details(&mut self, message: &str, details: &str) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", "✓".green(), message);
            }
            OutputMode::Json => self.push("success", message, Some(details)),
            OutputMode::Quiet => {}
        }
    }

    /// Success carrying a machine-readable payload for `--json`.
    pub fn success_with_data(&mut self, message: &str, data: serde_json::Value) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", "✓".green(), message);
            }
            OutputMode::Json => self.json_results.push(JsonResultEntry {
                result_type: "success".to_string(),
                message: message.to_string(),
                details: None,
                data: Some(data),
            }),
            OutputMode::Quiet => {}
        }
    }

    pub fn info(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                println!("{} {}", "INFO:".blue(), message);
            }
            OutputMode::Json => self.push("info", message, None),
            OutputMode::Quiet => {}
        }
    }

    /// Hints always reach stderr unless JSON output was requested.
    pub fn hint(&mut self, message: &str) {
        match self.mode {
            OutputMode::Human | OutputMode::Quiet => {
                eprintln!("{} {}", "HINT:".cyan(), message);
            }
            OutputMode::Json => self.push("hint", message, None),
        }
    }

    pub fn finish(&self) {
        if self.mode == OutputMode::Json {
            let output = JsonOutput {
                results: self.json_results.clone(),
            };
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                println!("{json}");
            }
        }
    }
}
