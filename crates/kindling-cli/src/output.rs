//! Output management and formatting.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use kindling_core::prelude::GenerationReport;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// Manages CLI output based on configuration.
pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    ///
    /// `--output-format` wins over `output.format` from the config file; an
    /// unrecognised config value counts as `auto`.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => {
                OutputFormat::from_str(&config.output.format, true).unwrap_or_default()
            }
            explicit => explicit,
        };

        // Resolve Auto → Human (TTY) or Plain (piped/redirected).
        let resolved_format = if requested == OutputFormat::Auto {
            if io::stdout().is_terminal() {
                OutputFormat::Human
            } else {
                OutputFormat::Plain
            }
        } else {
            requested
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`. Never suppressed.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.suppressed() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Pretty-printed JSON on stdout. Written even in quiet mode since the
    /// caller asked for machine-readable output.
    pub fn json<T: Serialize>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    /// Print a generation report in the resolved format.
    pub fn report(&self, action: &str, report: &GenerationReport) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            return self.json(&ReportView::from(report));
        }

        for path in &report.written {
            self.print(&format!("  created  {}", path.display()))?;
        }
        for path in &report.conflicts {
            self.warning(&format!("skipped  {} (already exists)", path.display()))?;
        }
        for failure in &report.failures {
            self.error(&format!("failed   {}: {}", failure.target, failure.error))?;
        }

        if report.is_success() {
            self.success(&format!(
                "{action}: {} file(s) written, {} skipped",
                report.written.len(),
                report.conflicts.len()
            ))?;
            if report.has_conflicts() {
                self.info("Re-run with --force to overwrite existing files")?;
            }
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    /// Human-oriented lines are dropped in quiet mode and when stdout
    /// carries JSON.
    fn suppressed(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }

    /// `true` if ANSI colours are enabled.
    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    /// The resolved (non-Auto) output format.
    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

/// JSON shape of a [`GenerationReport`].
#[derive(Debug, Serialize)]
pub struct ReportView {
    pub written: Vec<String>,
    pub conflicts: Vec<String>,
    pub failures: Vec<FailureView>,
}

#[derive(Debug, Serialize)]
pub struct FailureView {
    pub target: String,
    pub error: String,
}

impl From<&GenerationReport> for ReportView {
    fn from(report: &GenerationReport) -> Self {
        Self {
            written: report
                .written
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            conflicts: report
                .conflicts
                .iter()
                .map(|p| p.display().to_string())
                .collect(),
            failures: report
                .failures
                .iter()
                .map(|f| FailureView {
                    target: f.target.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
        }
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use crate::config::AppConfig;

    fn make_manager(quiet: bool, format: OutputFormat, config: &AppConfig) -> OutputManager {
        let args = GlobalArgs {
            verbose: 0,
            quiet,
            no_color: false,
            config: None,
            output_format: format,
        };
        OutputManager::new(&args, config)
    }

    #[test]
    fn quiet_print_is_ok() {
        let out = make_manager(true, OutputFormat::Plain, &AppConfig::default());
        assert!(out.print("hello").is_ok());
    }

    #[test]
    fn plain_format_disables_color() {
        let out = make_manager(false, OutputFormat::Plain, &AppConfig::default());
        assert!(!out.supports_color());
        assert_eq!(out.format(), OutputFormat::Plain);
    }

    #[test]
    fn human_format_respects_config_no_color() {
        let mut config = AppConfig::default();
        assert!(make_manager(false, OutputFormat::Human, &config).supports_color());
        config.output.no_color = true;
        assert!(!make_manager(false, OutputFormat::Human, &config).supports_color());
    }

    #[test]
    fn config_format_applies_when_flag_is_auto() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = make_manager(false, OutputFormat::Auto, &config);
        assert_eq!(out.format(), OutputFormat::Json);
    }

    #[test]
    fn flag_beats_config_format() {
        let mut config = AppConfig::default();
        config.output.format = "json".into();
        let out = make_manager(false, OutputFormat::Plain, &config);
        assert_eq!(out.format(), OutputFormat::Plain);
    }

    #[test]
    fn report_view_stringifies_paths() {
        let report = GenerationReport {
            written: vec![PathBuf::from("go.mod")],
            conflicts: vec![PathBuf::from("LICENSE")],
            failures: Vec::new(),
        };
        let view = ReportView::from(&report);
        assert_eq!(view.written, ["go.mod"]);
        assert_eq!(view.conflicts, ["LICENSE"]);
        assert!(view.failures.is_empty());
    }
}
