use std::path::PathBuf;

use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{LevelFilter, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use wordchain_core::{ChainModel, Mode, Request};

/// Generates text from a word-level Markov chain built on FILE.
///
/// Without MODE, prints the K most frequent words following SEED.
/// With MODE, walks the chain for K words starting at SEED:
/// `one` always takes the most frequent next word, `all` picks it at random,
/// weighted by frequency.
#[derive(Parser, Debug)]
#[command(author, version, long_about = None)]
struct Cli {
	/// Text file the chain is built from
	file: PathBuf,

	/// Word the generation starts from
	seed: String,

	/// Number of words to generate (non-positive prints nothing)
	#[arg(allow_negative_numbers = true)]
	k: i64,

	/// Walk mode: `one` (most frequent) or `all` (weighted random)
	mode: Option<String>,

	/// Seed of the random generator, for reproducible `all` walks
	#[arg(long, value_name = "N")]
	rng_seed: Option<u64>,

	/// Increase verbosity (-v, -vv)
	#[arg(short = 'v', long, action = ArgAction::Count)]
	verbose: u8,
}

fn init_logging(verbose: u8) {
	let level = match verbose {
		0 => LevelFilter::Warn,
		1 => LevelFilter::Info,
		2 => LevelFilter::Debug,
		_ => LevelFilter::Trace,
	};

	let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or("warn"));
	builder.filter_level(level);
	let _ = builder.try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	let model = ChainModel::from_file(&cli.file)?;
	info!("loaded {} ({} source words)", cli.file.display(), model.len());

	let mode = cli.mode.as_deref().map(Mode::from_label);
	if mode == Some(Mode::Unrecognized) {
		warn!("unrecognized mode {:?}, expected 'one' or 'all'", cli.mode.as_deref().unwrap_or_default());
	}

	let request = Request::from_signed_k(&cli.seed, cli.k, mode);
	match request.mode {
		Some(mode) => info!("walking {} words from '{}' in mode {mode}", request.k, request.seed),
		None => info!("top {} successors of '{}'", request.k, request.seed),
	}
	let words = match cli.rng_seed {
		Some(seed) => request.run(&model, &mut StdRng::seed_from_u64(seed)),
		None => request.run(&model, &mut rand::rng()),
	};

	println!("{}", words.join(" "));
	Ok(())
}
