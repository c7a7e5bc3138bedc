use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};
use modgen_codegen::dry_run_from_env;
use modgen_manifest::ModgenToml;

use super::UnwrapOrExit;
use crate::{
    ops::{self, GenerateOptions},
    reports::{Detail, Report, TerminalOutput},
};

#[derive(Args)]
pub struct GenerateCommand {
    /// Path to modgen.toml (defaults to ./modgen.toml)
    #[arg(short, long, default_value = "modgen.toml")]
    pub config: PathBuf,

    /// Project root to write into (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Plan without writing to disk (also enabled by DRY_RUN=1)
    #[arg(long)]
    pub dry_run: bool,

    /// Print the contents of files that are created or updated
    #[arg(long)]
    pub diff: bool,

    /// Only print the summary line
    #[arg(short, long, conflicts_with = "json")]
    pub quiet: bool,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let modgen_toml = ModgenToml::open(&self.config).unwrap_or_exit();

        let report = ops::generate(
            modgen_toml.manifest(),
            GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run || dry_run_from_env(),
                detail: self.detail(),
            },
        )
        .unwrap_or_exit();

        if self.json {
            let json = report.to_json().wrap_err("Failed to serialize the plan")?;
            println!("{json}");
        } else {
            report.render(&mut TerminalOutput::new());
        }

        Ok(())
    }

    fn detail(&self) -> Detail {
        if self.quiet {
            Detail::Summary
        } else if self.diff {
            Detail::Diff
        } else {
            Detail::Plan
        }
    }
}
