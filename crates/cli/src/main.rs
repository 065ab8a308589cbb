//! Main entry point for the secretsub CLI.

use clap::Parser;
use secretsub_aws::{AwsSecretsManager, SecretsClient};
use std::path::PathBuf;
use std::process::ExitCode;

mod logging;

#[derive(Parser)]
#[command(name = "secretsub")]
#[command(about = "Substitute environment and secret placeholders in a configuration template", long_about = None)]
#[command(version)]
struct Cli {
    /// AWS profile to use
    #[arg(long, default_value = "default")]
    profile: String,

    /// AWS region to use; when omitted the profile's default
    /// region/credential chain applies
    #[arg(long, default_value = "")]
    region: String,

    /// Template file to read
    input: PathBuf,

    /// Resolved file to write
    output: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = logging::init() {
        eprintln!("failed to initialise logging: {err}");
        return ExitCode::FAILURE;
    }

    let client = SecretsClient::new(AwsSecretsManager, cli.profile, cli.region);

    match secretsub_template::process_template_file(&cli.input, &cli.output, &client).await {
        Ok(()) => {
            println!(
                "output file generated successfully: {}",
                cli.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
