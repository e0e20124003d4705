mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "typedflow")]
#[command(about = "Generate typed launchers for a typedflow workflow registry", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate workflow_results_gen.rs from a registry file
    Generate {
        /// Registry file (default: $TYPEDFLOW_FILE)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Output file (default: $TYPEDFLOW_OUTPUT, else workflow_results_gen.rs next to the input)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Log every pipeline step to stderr
        #[arg(long)]
        debug: bool,

        /// Exit non-zero if the output is missing or stale instead of writing it
        #[arg(long, conflicts_with = "watch")]
        check: bool,

        /// Regenerate whenever the input changes
        #[arg(long, short = 'w')]
        watch: bool,

        /// Generate for every file under this directory with a #[workflow_registry]
        #[arg(long, conflicts_with_all = ["file", "output", "watch"])]
        dir: Option<PathBuf>,
    },
    /// Print the workflows a registry resolves to, without writing anything
    Inspect {
        /// Registry file (default: $TYPEDFLOW_FILE)
        #[arg(long, short = 'f')]
        file: Option<PathBuf>,

        /// Log every pipeline step to stderr
        #[arg(long)]
        debug: bool,
    },
}

fn main() {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            file,
            output,
            debug,
            check,
            watch,
            dir,
        } => {
            commands::generate::run(commands::generate::Options {
                file,
                output,
                debug,
                check,
                watch,
                dir,
            });
        }
        Commands::Inspect { file, debug } => {
            commands::inspect::run(file, debug);
        }
    }
}
