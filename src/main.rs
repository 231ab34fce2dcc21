//! NEUROGEN - CLI Entry Point
//!
//! Generate, evaluate and recombine networks stored as JSON files.

use clap::{Parser, Subcommand};
use neurogen::instrument::{timed, LogInstrument, Operation};
use neurogen::{benchmark, Config, Genetic, Network, NetworkBuilder, RandomGenerator};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "neurogen")]
#[command(version)]
#[command(about = "Feedforward networks evolved through mutation and crossover")]
struct Cli {
    /// Configuration file (YAML); defaults are used when it does not exist
    #[arg(short, long, global = true, default_value = "config.yaml")]
    config: PathBuf,

    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a random network from the configured topology
    Generate {
        /// Output file (JSON)
        #[arg(short, long, default_value = "network.json")]
        output: PathBuf,
    },

    /// Fire a network on a comma-separated input vector
    Fire {
        /// Network file (JSON)
        network: PathBuf,

        /// Input values
        #[arg(short, long, value_delimiter = ',', allow_negative_numbers = true)]
        inputs: Vec<f64>,

        /// Evaluate the neurons of each layer in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Write a mutated copy of a network
    Mutate {
        /// Network file (JSON)
        network: PathBuf,

        /// Per-gene mutation probability (defaults to the configured rate)
        #[arg(short, long)]
        rate: Option<f64>,

        /// Output file (JSON)
        #[arg(short, long, default_value = "mutated.json")]
        output: PathBuf,
    },

    /// Write the uniform crossover of two networks
    Crossover {
        /// First parent (JSON)
        network: PathBuf,

        /// Second parent (JSON)
        mate: PathBuf,

        /// Output file (JSON)
        #[arg(short, long, default_value = "child.json")]
        output: PathBuf,
    },

    /// Time repeated firing of a generated network
    Benchmark {
        /// Number of fires
        #[arg(short, long, default_value = "34944")]
        iterations: u64,
    },

    /// Generate default configuration file
    Init {
        /// Output path
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    // Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.log_level.as_str()),
    )
    .init();

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::debug!("Using seed: {}", seed);

    match cli.command {
        Commands::Generate { output } => generate_network(&config, seed, output),
        Commands::Fire {
            network,
            inputs,
            parallel,
        } => fire_network(network, inputs, parallel),
        Commands::Mutate {
            network,
            rate,
            output,
        } => mutate_network(&config, seed, network, rate, output),
        Commands::Crossover {
            network,
            mate,
            output,
        } => crossover_networks(&config, seed, network, mate, output),
        Commands::Benchmark { iterations } => run_benchmark(&config, seed, iterations),
        Commands::Init { output } => generate_config(output),
    }
}

fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    if path.exists() {
        Config::from_file(path)
    } else {
        Ok(Config::default())
    }
}

fn read_network(path: &Path) -> Result<Network, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(path)?;
    Ok(Network::from_json(&json)?)
}

fn write_network(network: &Network, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::write(path, network.to_json_pretty()?)?;
    log::info!(
        "Network written to {:?} (topology {:?}, {} parameters)",
        path,
        network.topology(),
        network.parameter_count()
    );
    Ok(())
}

fn generate_network(
    config: &Config,
    seed: u64,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut rng = RandomGenerator::seeded(seed, config.genes)?;
    let builder = NetworkBuilder::from_config(&config.network);
    let network = timed(Some(&LogInstrument), Operation::Generate, || {
        builder.generate(&mut rng)
    });
    write_network(&network, &output)
}

fn fire_network(
    path: PathBuf,
    inputs: Vec<f64>,
    parallel: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let network = read_network(&path)?;
    log::info!("Inputs: {:?}", inputs);

    let outputs = timed(Some(&LogInstrument), Operation::Fire, || {
        if parallel {
            network.fire_parallel(&inputs)
        } else {
            network.fire(&inputs)
        }
    })?;

    log::info!("Outputs: {:?}", outputs);
    let line: Vec<String> = outputs.iter().map(|x| x.to_string()).collect();
    println!("{}", line.join(","));
    Ok(())
}

fn mutate_network(
    config: &Config,
    seed: u64,
    path: PathBuf,
    rate: Option<f64>,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let rate = rate.unwrap_or(config.evolution.mutation_rate);
    if !(0.0..=1.0).contains(&rate) {
        return Err(format!("mutation rate must be between 0.0 and 1.0, got {}", rate).into());
    }

    let network = read_network(&path)?;
    let mut rng = RandomGenerator::seeded(seed, config.genes)?;
    let mutated = timed(Some(&LogInstrument), Operation::Mutate, || {
        network.mutate(rate, &mut rng)
    });
    write_network(&mutated, &output)
}

fn crossover_networks(
    config: &Config,
    seed: u64,
    path: PathBuf,
    mate_path: PathBuf,
    output: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let network = read_network(&path)?;
    let mate = read_network(&mate_path)?;
    let mut rng = RandomGenerator::seeded(seed, config.genes)?;

    let child = timed(Some(&LogInstrument), Operation::Crossover, || {
        network.crossover(&mate, &mut rng)
    })?;
    write_network(&child, &output)
}

fn run_benchmark(config: &Config, seed: u64, iterations: u64) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "Benchmarking {} inputs through {:?}",
        config.network.input_size,
        config.network.layers.iter().map(|l| l.units).collect::<Vec<_>>()
    );
    let result = benchmark(config, iterations, seed)?;
    println!("{}", result);
    Ok(())
}

fn generate_config(output: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::default();
    config.save(&output)?;
    println!("Configuration written to {:?}", output);
    Ok(())
}
