//! Student performance predictor - Main Entry Point

use clap::Parser;
use student_performance::cli::{cmd_ingest, cmd_predict, cmd_serve, cmd_train, Cli, Commands};
use student_performance::logging::init_logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.resolve_logs_dir())?;

    match cli.command {
        Commands::Train { data, artifacts } => {
            cmd_train(&data, &artifacts)?;
        }
        Commands::Ingest { data, artifacts } => {
            cmd_ingest(&data, &artifacts)?;
        }
        Commands::Predict {
            gender,
            ethnicity,
            parental_education,
            lunch,
            test_prep,
            reading,
            writing,
            artifacts,
        } => {
            cmd_predict(
                &gender,
                &ethnicity,
                &parental_education,
                &lunch,
                &test_prep,
                reading,
                writing,
                &artifacts,
            )?;
        }
        Commands::Serve { host, port, artifacts } => {
            cmd_serve(host, port, artifacts).await?;
        }
    }

    Ok(())
}
