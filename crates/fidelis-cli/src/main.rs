//! Fidelis Command-Line Interface
//!
//! The main entry point for the Fidelis CLI tool.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use console::style;
use fidelis_kernel::KernelConfig;
use tracing_subscriber::EnvFilter;

mod commands;

use commands::common::Overrides;
use commands::{accuracy, generate, kernel, params, predict, version};

/// Fidelis - quantum-kernel fidelity classification on a statevector simulator
#[derive(Parser)]
#[command(name = "fidelis")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// YAML configuration file
    #[arg(short, long, global = true, env = "FIDELIS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single query against a stored model
    Predict {
        /// Model file (JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Query vector, comma separated (e.g. "0.3,-0.1")
        #[arg(short, long, allow_hyphen_values = true)]
        query: String,

        /// Overlap estimator (exact, fast, circuit)
        #[arg(short, long)]
        estimator: Option<String>,

        /// Reference draws per class (full class if omitted)
        #[arg(short, long)]
        samples: Option<usize>,

        /// RNG seed for reference sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Sampling weights for class A, comma separated
        #[arg(long)]
        probs_a: Option<String>,

        /// Sampling weights for class B, comma separated
        #[arg(long)]
        probs_b: Option<String>,

        /// Print the signed overlap margin instead of a label
        #[arg(long)]
        margin: bool,
    },

    /// Evaluate classification accuracy on a labeled test set
    Accuracy {
        /// Model file (JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Test set file (JSON with "X" and "Y")
        #[arg(short, long)]
        test: PathBuf,

        /// Overlap estimator (exact, fast, circuit)
        #[arg(short, long)]
        estimator: Option<String>,

        /// Reference draws per class (full class if omitted)
        #[arg(short, long)]
        samples: Option<usize>,

        /// RNG seed for reference sampling
        #[arg(long)]
        seed: Option<u64>,

        /// Evaluate test queries one at a time
        #[arg(long)]
        sequential: bool,
    },

    /// Show the parameter count and initial parameters of an embedding
    Params {
        /// Embedding identifier (qaoa, hva_xxz, shallow_circuit, vqc, hva_tfim_2d, hva_tfim_1d, layered_rotation)
        #[arg(short, long)]
        embedding: String,

        /// Number of wires
        #[arg(short, long)]
        wires: usize,

        /// Number of layers
        #[arg(short, long, default_value = "1")]
        layers: usize,

        /// Circuit id within the family
        #[arg(long)]
        variant: Option<u32>,

        /// Number of data features (vqc only)
        #[arg(long)]
        data_dim: Option<usize>,
    },

    /// Generate a synthetic two-class dataset
    Generate {
        /// Dataset shape (quadrants, blobs)
        #[arg(short, long, default_value = "quadrants")]
        dataset: String,

        /// Number of samples
        #[arg(short = 'n', long, default_value = "40")]
        size: usize,

        /// Minimum distance from the axes (quadrants only)
        #[arg(long, default_value = "0.1")]
        margin: f64,

        /// RNG seed
        #[arg(long)]
        seed: Option<u64>,

        /// Write a model record with initial parameters for this embedding
        #[arg(long)]
        embedding: Option<String>,

        /// Number of layers of the embedding
        #[arg(short, long, default_value = "1")]
        layers: usize,

        /// Output file (JSON)
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Print the kernel (Gram) matrix of a model's reference samples
    Kernel {
        /// Model file (JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Overlap estimator (exact, fast, circuit)
        #[arg(short, long)]
        estimator: Option<String>,

        /// Output file for the JSON matrix (stdout table if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show version information
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match KernelConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            std::process::exit(1);
        }
    };

    // Setup logging
    let filter = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .with_writer(std::io::stderr);
    if config.logging.format == "compact" {
        subscriber.compact().init();
    } else {
        subscriber.init();
    }

    // Execute command
    let result = match cli.command {
        Commands::Predict {
            model,
            query,
            estimator,
            samples,
            seed,
            probs_a,
            probs_b,
            margin,
        } => predict::execute(
            &model,
            &query,
            &Overrides {
                estimator,
                samples,
                seed,
                sequential: false,
            },
            probs_a.as_deref(),
            probs_b.as_deref(),
            margin,
            &config,
        ),

        Commands::Accuracy {
            model,
            test,
            estimator,
            samples,
            seed,
            sequential,
        } => accuracy::execute(
            &model,
            &test,
            &Overrides {
                estimator,
                samples,
                seed,
                sequential,
            },
            &config,
        ),

        Commands::Params {
            embedding,
            wires,
            layers,
            variant,
            data_dim,
        } => params::execute(&embedding, wires, layers, variant, data_dim),

        Commands::Generate {
            dataset,
            size,
            margin,
            seed,
            embedding,
            layers,
            output,
        } => generate::execute(
            &dataset,
            size,
            margin,
            seed,
            embedding.as_deref(),
            layers,
            &output,
        ),

        Commands::Kernel {
            model,
            estimator,
            output,
        } => kernel::execute(&model, estimator.as_deref(), output.as_deref(), &config),

        Commands::Version => {
            version::execute();
            Ok(())
        }
    };

    // Handle errors
    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}
