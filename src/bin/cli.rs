use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use boot_harness::{ArchRegistry, BootHarness};

#[derive(Parser)]
#[command(name = "boot-harness")]
#[command(about = "Run emulator boot tests across target architectures", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run boot tests for the selected targets
    Run {
        /// Target architecture to test (can be specified multiple times;
        /// default: all registered targets)
        #[arg(short, long = "target", value_name = "NAME")]
        targets: Vec<String>,

        /// Path to the project root directory
        #[arg(long, default_value = ".", value_name = "DIR")]
        root: PathBuf,

        /// Suppress the per-line console echo (the summary still prints)
        #[arg(short, long)]
        quiet: bool,

        /// Directory for per-target transcripts and the aggregate summary
        #[arg(long, value_name = "DIR")]
        log_dir: Option<PathBuf>,
    },

    /// List the registered target architectures
    List,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "boot_harness=debug"
    } else {
        "boot_harness=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(success) => {
            if success {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<bool> {
    match cli.command {
        Commands::Run {
            targets,
            root,
            quiet,
            log_dir,
        } => {
            let harness = BootHarness::new(&root)?.quiet(quiet).log_dir(log_dir);
            let outcomes = harness.run(&targets).await;
            let summary = harness.report(&outcomes);
            Ok(summary.success())
        }
        Commands::List => {
            let registry = ArchRegistry::builtin();
            println!("Registered targets:\n");
            for descriptor in registry.descriptors() {
                println!(
                    "  {:10} script={} args={} timeout={}s",
                    descriptor.name,
                    descriptor.script,
                    descriptor.extra_args.unwrap_or("-"),
                    descriptor.timeout.as_secs()
                );
            }
            Ok(true)
        }
    }
}
