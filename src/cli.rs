use crate::model::ReportKind;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "market-tweet-bot", version, about = "Market summary image posts for X")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the HTTP trigger endpoints.
    Serve {
        #[arg(long, help = "Listen address, overrides BOT_BIND_ADDR")]
        bind: Option<String>,
    },
    /// Run one update now and print its status.
    Run {
        #[arg(value_enum)]
        job: Job,
        #[arg(long, default_value_t = false, help = "Write the artifact to disk instead of posting")]
        dry_run: bool,
        #[arg(long, help = "Artifact directory for --dry-run, overrides BOT_OUTPUT_DIR")]
        out_dir: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    Global,
    Mtf,
}

impl From<Job> for ReportKind {
    fn from(job: Job) -> Self {
        match job {
            Job::Global => ReportKind::GlobalMarket,
            Job::Mtf => ReportKind::MtfInsights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_serve_with_bind() {
        let cli = Cli::try_parse_from(["market-tweet-bot", "serve", "--bind", "127.0.0.1:9000"]).unwrap();
        match cli.command {
            Commands::Serve { bind } => assert_eq!(bind.as_deref(), Some("127.0.0.1:9000")),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_dry_run() {
        let cli = Cli::try_parse_from(["market-tweet-bot", "run", "mtf", "--dry-run", "--out-dir", "/tmp/out"])
            .unwrap();
        match cli.command {
            Commands::Run { job, dry_run, out_dir } => {
                assert_eq!(ReportKind::from(job), ReportKind::MtfInsights);
                assert!(dry_run);
                assert_eq!(out_dir, Some(PathBuf::from("/tmp/out")));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn run_defaults_to_posting() {
        let cli = Cli::try_parse_from(["market-tweet-bot", "run", "global"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Run { job: Job::Global, dry_run: false, out_dir: None }
        ));
    }

    #[test]
    fn rejects_unknown_job() {
        assert!(Cli::try_parse_from(["market-tweet-bot", "run", "crypto"]).is_err());
    }
}
