use crate::console::{run_catalog_listing, run_diagnosis, CatalogArgs, DiagnoseArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use diagnosa::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Diagnosa",
    about = "Diagnose computer hardware failures from observed symptoms",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Rank probable failures for a set of symptom codes
    Diagnose(DiagnoseArgs),
    /// List the symptoms and damages in the active catalog
    Catalog(CatalogArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// JSON catalog export to serve instead of the configured one
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Diagnose(args) => run_diagnosis(args),
        Command::Catalog(args) => run_catalog_listing(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnose_accepts_repeated_symptom_flags() {
        let cli = Cli::try_parse_from([
            "diagnosa",
            "diagnose",
            "--symptom",
            "G1",
            "--symptom",
            "G2",
            "--top",
            "3",
        ])
        .expect("arguments parse");

        match cli.command {
            Some(Command::Diagnose(args)) => {
                assert_eq!(args.symptoms, vec!["G1", "G2"]);
                assert_eq!(args.top, Some(3));
                assert!(!args.json);
            }
            other => panic!("expected diagnose command, got {other:?}"),
        }
    }

    #[test]
    fn no_subcommand_defaults_to_serve() {
        let cli = Cli::try_parse_from(["diagnosa"]).expect("arguments parse");
        assert!(cli.command.is_none());
    }
}
