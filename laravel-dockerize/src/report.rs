//! Per-file action reporting

use console::{style, Emoji};
use std::io::{self, Stderr, Stdout, Write};

use crate::copier::{CopyAction, CopyOutcome};

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "");
static SKIP: Emoji<'_, '_> = Emoji("• ", "");
static WARN: Emoji<'_, '_> = Emoji("⚠ ", "");

/// Sink for progress output
pub trait Reporter {
    /// A section heading, e.g. the resolved preset and database
    fn heading(&mut self, message: &str);

    /// One line per copied or skipped file
    fn action(&mut self, action: &CopyAction);

    /// A recoverable problem that changed what gets installed
    fn warning(&mut self, message: &str);
}

/// Writes headings and actions to stdout, warnings to stderr
#[derive(Debug)]
pub struct ConsoleReporter<O = Stdout, E = Stderr> {
    dry_run: bool,
    out: O,
    err: E,
}

impl ConsoleReporter {
    /// Create a reporter; dry runs prefix every action line
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self::with_writers(dry_run, io::stdout(), io::stderr())
    }
}

impl<O: Write, E: Write> ConsoleReporter<O, E> {
    /// Create a reporter writing to `out` and `err` instead of the standard streams
    pub const fn with_writers(dry_run: bool, out: O, err: E) -> Self {
        Self { dry_run, out, err }
    }
}

// Output is best effort; a closed stdout must not abort the copy.
impl<O: Write, E: Write> Reporter for ConsoleReporter<O, E> {
    fn heading(&mut self, message: &str) {
        let _ = writeln!(self.out, "{}", style(message).green().bold());
    }

    fn action(&mut self, action: &CopyAction) {
        let prefix = if self.dry_run {
            style("[dry-run] ").dim().to_string()
        } else {
            String::new()
        };
        let path = action.spec.to.display();

        let line = match action.outcome {
            CopyOutcome::Created => format!("{CHECK}{} {path}", style("Created:").green()),
            CopyOutcome::Updated => format!("{CHECK}{} {path}", style("Updated:").cyan()),
            CopyOutcome::Skipped => format!(
                "{SKIP}{} {path} {}",
                style("Exists:").yellow(),
                style("(use --force to overwrite)").dim()
            ),
        };
        let _ = writeln!(self.out, "{prefix}{line}");
    }

    fn warning(&mut self, message: &str) {
        let _ = writeln!(
            self.err,
            "{WARN}{} {message}",
            style("warning:").for_stderr().yellow().bold()
        );
    }
}

/// Keeps everything in memory
#[derive(Debug, Default)]
pub struct RecordingReporter {
    /// Headings in emission order
    pub headings: Vec<String>,
    /// Actions in emission order
    pub actions: Vec<CopyAction>,
    /// Warnings in emission order
    pub warnings: Vec<String>,
}

impl RecordingReporter {
    /// Create an empty recorder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Outcomes of every recorded action
    #[must_use]
    pub fn outcomes(&self) -> Vec<CopyOutcome> {
        self.actions.iter().map(|action| action.outcome).collect()
    }
}

impl Reporter for RecordingReporter {
    fn heading(&mut self, message: &str) {
        self.headings.push(message.to_string());
    }

    fn action(&mut self, action: &CopyAction) {
        self.actions.push(action.clone());
    }

    fn warning(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::copier::CopySpec;

    fn action(to: &str, outcome: CopyOutcome) -> CopyAction {
        CopyAction {
            spec: CopySpec::new("/tpl/file", to, false),
            outcome,
        }
    }

    fn lines(bytes: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(bytes)
            .lines()
            .map(|line| console::strip_ansi_codes(line).into_owned())
            .collect()
    }

    #[test]
    fn test_actions_go_to_stdout_and_warnings_to_stderr() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        {
            let mut reporter = ConsoleReporter::with_writers(false, &mut out, &mut err);
            reporter.heading("Installing Docker templates (preset: all, db: pgsql)...");
            reporter.action(&action("/app/docker-compose.yml", CopyOutcome::Created));
            reporter.action(&action("/app/.dockerignore", CopyOutcome::Updated));
            reporter.action(&action("/app/.env.docker.example", CopyOutcome::Skipped));
            reporter.warning("Unknown preset 'staging'. Using all.");
        }

        let out = lines(&out);
        assert_eq!(out.len(), 4);
        assert!(out[0].starts_with("Installing Docker templates"));
        assert!(out[1].contains("Created: /app/docker-compose.yml"));
        assert!(out[2].contains("Updated: /app/.dockerignore"));
        assert!(out[3].contains("Exists: /app/.env.docker.example (use --force to overwrite)"));

        let err = lines(&err);
        assert_eq!(err.len(), 1);
        assert!(err[0].contains("warning: Unknown preset 'staging'. Using all."));
    }

    #[test]
    fn test_dry_run_prefixes_actions() {
        let mut out = Vec::new();
        {
            let mut reporter = ConsoleReporter::with_writers(true, &mut out, io::sink());
            reporter.action(&action("/app/docker-compose.yml", CopyOutcome::Created));
        }

        let out = lines(&out);
        assert!(out[0].starts_with("[dry-run] "));
        assert!(out[0].contains("Created: /app/docker-compose.yml"));
    }
}
