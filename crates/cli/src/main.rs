//! Command line driver for spinetools selections and systematics

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use log::error;

use spinetools_analysis::{Analysis, AnalysisConfig};
use spinetools_systematics::{Config, Propagator};

#[derive(Parser)]
#[command(
    name = "spinetools",
    about = "Neutrino interaction selection and systematics toolkit",
    version,
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity, repeatable
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Silence all logging
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Run a file-driven selection over event samples
    Select {
        /// Analysis configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Directory for the selected-event tables
        #[arg(short, long)]
        output: PathBuf,

        /// Name recorded in the run manifest
        #[arg(short, long, default_value = "analysis")]
        name: String,

        /// Do not render progress bars
        #[arg(long)]
        no_progress: bool,
    },

    /// Propagate systematic uncertainties through selected-event tables
    Propagate {
        /// Propagation configuration (plain text)
        #[arg(short, long)]
        config: PathBuf,

        /// Directory for the result document
        #[arg(short, long)]
        output: PathBuf,

        /// Also export the covariance matrices as CSV
        #[arg(long)]
        csv: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    stderrlog::new()
        .verbosity(usize::from(cli.verbose) + 1)
        .quiet(cli.quiet)
        .init()
        .expect("Failed to initialise logging");

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Select {
            config,
            output,
            name,
            no_progress,
        } => {
            let config = AnalysisConfig::from_file(config)?;
            let mut analysis = Analysis::from_config(&name, config, output)?;
            if no_progress {
                analysis.disable_progress();
            }
            let summary = analysis.run()?;
            println!("{summary}");
        }
        Command::Propagate {
            config,
            output,
            csv,
        } => {
            let config = Config::from_file(config)?;
            let result = Propagator::new(config).run()?;
            result.write_json(output.join("systematics.json"))?;
            if csv {
                result.write_covariance_csv(output.join("covariance"))?;
            }
            println!("{result}");
        }
    }
    Ok(())
}
