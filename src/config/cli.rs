use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "shell-util")]
#[command(about = "Inspect and validate hacksports problems, bundles and config")]
pub struct CliConfig {
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate the problem.json inside a problem directory
    Problem { dir: PathBuf },

    /// Validate the bundle.json inside a bundle directory
    Bundle { dir: PathBuf },

    /// Validate a deploy config file
    Config { path: PathBuf },

    /// Print the filesystem-safe form of a name
    Sanitize { name: String },

    /// Print where a problem would be installed
    ProblemRoot {
        name: String,
        #[arg(long)]
        absolute: bool,
    },

    /// Print where a bundle would be installed
    BundleRoot {
        name: String,
        #[arg(long)]
        absolute: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_problem_root() {
        let config =
            CliConfig::try_parse_from(["shell-util", "-v", "problem-root", "My Problem", "--absolute"])
                .unwrap();

        assert!(config.verbose);
        match config.command {
            Command::ProblemRoot { name, absolute } => {
                assert_eq!(name, "My Problem");
                assert!(absolute);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(CliConfig::try_parse_from(["shell-util"]).is_err());
    }
}
