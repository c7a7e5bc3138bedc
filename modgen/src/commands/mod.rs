mod generate;

use clap::Parser;
use eyre::Result;
use generate::GenerateCommand;

/// Extension trait for exiting on manifest and generation errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for modgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(*e));
                std::process::exit(1);
            }
        }
    }
}

impl<T> UnwrapOrExit<T> for modgen_codegen::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => {
                eprintln!("{:?}", miette::Report::new(e));
                std::process::exit(1);
            }
        }
    }
}

#[derive(Parser)]
#[command(name = "modgen")]
#[command(version)]
#[command(about = "Scaffold Medusa modules, API routes and admin pages from modgen.toml")]
pub(crate) struct Cli {
    #[command(flatten)]
    generate: GenerateCommand,
}

impl Cli {
    pub fn run(&self) -> Result<()> {
        self.generate.run()
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["modgen"]).unwrap();
        assert_eq!(cli.generate.config, Path::new("modgen.toml"));
        assert_eq!(cli.generate.output, Path::new("."));
        assert!(!cli.generate.dry_run);
        assert!(!cli.generate.json);
    }

    #[test]
    fn test_options() {
        let cli = Cli::try_parse_from([
            "modgen",
            "-c",
            "shop/modgen.toml",
            "-o",
            "shop",
            "--dry-run",
            "--diff",
        ])
        .unwrap();
        assert_eq!(cli.generate.config, Path::new("shop/modgen.toml"));
        assert_eq!(cli.generate.output, Path::new("shop"));
        assert!(cli.generate.dry_run);
        assert!(cli.generate.diff);
    }

    #[test]
    fn test_positional_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["modgen", "wipers"]).is_err());
    }

    #[test]
    fn test_quiet_conflicts_with_json() {
        assert!(Cli::try_parse_from(["modgen", "--quiet", "--json"]).is_err());
    }
}
