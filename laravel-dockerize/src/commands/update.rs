//! Re-sync Docker scaffolding from the templates

use anyhow::Result;
use console::style;

use super::ScaffoldArgs;
use crate::scaffold::Mode;

/// Update Docker scaffolding files in a project (safe re-sync)
///
/// Without `--db` the database flavor is detected from the compose files
/// already in the project.
pub struct UpdateCommand {
    args: ScaffoldArgs,
}

impl UpdateCommand {
    /// Create a new command instance
    #[must_use]
    pub const fn new(args: ScaffoldArgs) -> Self {
        Self { args }
    }

    /// Execute the command
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded, no template tree is
    /// found, or a file cannot be copied.
    pub fn execute(self) -> Result<()> {
        let summary = super::execute(Mode::Update, self.args)?;

        println!();
        println!("{}", style("✓ Update complete.").green().bold());
        if summary.written() > 0 {
            println!(
                "  Review changes with {}.",
                style("git diff").cyan()
            );
        }
        println!();
        Ok(())
    }
}
