mod app_config;
mod interactive;

use std::error::Error;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{info, Level};
use ttt_nn::nn::weights;
use ttt_nn::training::{self, load_examples, save_examples};
use ttt_nn::{
    EvaluationHistory, MoveSelector, NetworkConfig, SeededRng, SelfPlayConfig, SelfPlayHarness,
    TrainConfig,
};

use crate::app_config::AppConfig;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Optional JSON settings file; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for weight initialisation and random opponents
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Repeat for more log output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a freshly initialised network
    Init {
        /// Output path; `.json` writes a weight file, anything else a snapshot
        #[arg(short, long, default_value = "weights.json")]
        out: PathBuf,

        /// Hidden layer sizes, comma separated
        #[arg(long, value_delimiter = ',')]
        hidden: Option<Vec<usize>>,

        #[arg(long)]
        alpha: Option<f64>,

        /// Skip the all-ones pass-through input layer
        #[arg(long)]
        no_initial_layer: bool,

        /// Initialise hidden weights in [-1, 1] instead of [-0.1, 0.1]
        #[arg(long)]
        wide: bool,
    },
    /// Play against the network on stdin
    Play {
        #[arg(short, long, default_value = "weights.json")]
        network: PathBuf,

        /// Let the network open the game
        #[arg(long)]
        network_first: bool,
    },
    /// Answer random positions to build a training set
    Generate {
        #[arg(short, long, default_value_t = 10)]
        count: usize,

        /// Examples are appended when the file already exists
        #[arg(short, long, default_value = "examples.bin")]
        out: PathBuf,
    },
    /// Backpropagate over a saved example set
    Train {
        #[arg(short, long, default_value = "weights.json")]
        network: PathBuf,

        #[arg(short, long, default_value = "examples.bin")]
        examples: PathBuf,

        #[arg(long)]
        epochs: Option<usize>,

        #[arg(long)]
        learning_rate: Option<f64>,

        /// Defaults to overwriting `--network`
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Play the network against a random opponent
    Evaluate {
        #[arg(short, long, default_value = "weights.json")]
        network: PathBuf,

        #[arg(short, long)]
        games: Option<usize>,

        /// Let the random opponent open every game
        #[arg(long)]
        network_second: bool,

        /// Append the run's percentages to this history file
        #[arg(long)]
        history: Option<PathBuf>,
    },
    /// Print mean percentages from a history file
    Stats {
        #[arg(long, default_value = "history.bin")]
        history: PathBuf,
    },
}

fn install_logger(verbose: u8) -> Result<(), Box<dyn Error>> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = tracing_subscriber::fmt()
        .compact()
        .with_max_level(level)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig, Box<dyn Error>> {
    let file = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let flags = AppConfig {
        seed: cli.seed,
        ..Default::default()
    };
    Ok(file.merge(flags))
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    install_logger(cli.verbose)?;

    let config = load_config(&cli)?;
    let seed = config.seed.unwrap_or_default();
    let selector = MoveSelector::new(config.encoder());

    match cli.command {
        Commands::Init {
            out,
            hidden,
            alpha,
            no_initial_layer,
            wide,
        } => {
            let config = config.merge(AppConfig {
                hidden_layers: hidden,
                alpha,
                ..Default::default()
            });
            let mut topology = NetworkConfig::new()
                .with_initial_layer(!no_initial_layer)
                .with_wide_init(wide);
            if let Some(layers) = config.hidden_layers {
                topology = topology.with_hidden_layers(layers);
            }
            if let Some(alpha) = config.alpha {
                topology = topology.with_alpha(alpha);
            }
            let mut rng = SeededRng::new(seed).for_context("weights");
            let network = topology.build(&mut rng);
            weights::save(&network, &out)?;
            println!(
                "Wrote {} layers ({} -> {}) to {}",
                network.layer_count(),
                network.input_size(),
                network.output_size(),
                out.display()
            );
        }
        Commands::Play {
            network,
            network_first,
        } => {
            let network = weights::load(&network)?;
            interactive::play_game(&network, &selector, !network_first)?;
        }
        Commands::Generate { count, out } => {
            let generator = SelfPlayConfig::new().board_generator();
            let mut rng = SeededRng::new(seed).for_context("positions");
            let mut examples = existing_examples(&out)?;
            let created = interactive::create_examples(count, &generator, &selector, &mut rng)?;
            examples.extend(created);
            save_examples(&examples, &out)?;
            println!("{} examples in {}", examples.len(), out.display());
        }
        Commands::Train {
            network,
            examples,
            epochs,
            learning_rate,
            out,
        } => {
            let config = config.merge(AppConfig {
                epochs,
                learning_rate,
                ..Default::default()
            });
            let mut train_config = TrainConfig::new();
            if let Some(epochs) = config.epochs {
                train_config = train_config.with_epochs(epochs);
            }
            if let Some(rate) = config.learning_rate {
                train_config = train_config.with_learning_rate(rate);
            }

            let mut net = weights::load(&network)?;
            let examples = load_examples(&examples)?;
            let error = training::train(&mut net, &examples, &train_config)?;
            let out = out.unwrap_or(network);
            weights::save(&net, &out)?;
            println!("Mean squared error {:.6}, saved to {}", error, out.display());
        }
        Commands::Evaluate {
            network,
            games,
            network_second,
            history,
        } => {
            let config = config.merge(AppConfig {
                games,
                ..Default::default()
            });
            let mut play_config = SelfPlayConfig::new()
                .with_seed(seed)
                .with_network_first(!network_second);
            if let Some(games) = config.games {
                play_config = play_config.with_games(games);
            }

            let network = weights::load(&network)?;
            let report = SelfPlayHarness::new(selector, play_config).run(&network)?;
            println!("{}", report);

            if let Some(path) = history {
                let mut runs = EvaluationHistory::load_or_default(&path)?;
                runs.push(&report);
                runs.save(&path)?;
                info!(runs = runs.len(), "history updated");
            }
        }
        Commands::Stats { history } => {
            let runs = EvaluationHistory::load(&history)?;
            match runs.means() {
                Some(means) => {
                    println!("Runs: {}", runs.len());
                    println!("Mean wins: {:.2}%", means.win);
                    println!("Mean losses: {:.2}%", means.loss);
                    println!("Mean draws: {:.2}%", means.draw);
                }
                None => println!("No runs recorded in {}", history.display()),
            }
        }
    }

    Ok(())
}

fn existing_examples(path: &Path) -> ttt_nn::Result<Vec<ttt_nn::Example>> {
    if path.exists() {
        load_examples(path)
    } else {
        Ok(Vec::new())
    }
}
