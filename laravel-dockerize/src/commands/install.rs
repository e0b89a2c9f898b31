//! Docker scaffolding install command

use anyhow::Result;
use console::style;

use super::ScaffoldArgs;
use crate::scaffold::Mode;

/// Install Docker scaffolding into a Laravel project
pub struct InstallCommand {
    args: ScaffoldArgs,
}

impl InstallCommand {
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
        super::execute(Mode::Install, self.args)?;
        Self::print_next_steps();
        Ok(())
    }

    /// Print next steps after a successful install
    fn print_next_steps() {
        println!();
        println!("{}", style("✓ Done. Next steps:").green().bold());
        println!();
        println!(
            "  {} Copy or merge {} into your {} for Docker values.",
            style("1.").cyan(),
            style(".env.docker.example").cyan(),
            style(".env").cyan()
        );
        println!("  {} Start a stack:", style("2.").cyan());
        println!(
            "     {} {}  {}",
            style("$").dim(),
            style("docker compose -f docker-compose.local.yml up -d").cyan(),
            style("(local dev with hot reload)").dim()
        );
        println!(
            "     {} {}    {}",
            style("$").dim(),
            style("docker compose -f docker-compose.dev.yml up -d").cyan(),
            style("(dev stack)").dim()
        );
        println!(
            "     {} {}                              {}",
            style("$").dim(),
            style("docker compose up -d").cyan(),
            style("(production-like)").dim()
        );
        println!();
    }
}
