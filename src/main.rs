#![allow(missing_docs)]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cmd;

#[derive(Parser)]
#[command(name = "msgtemplate", about = "Message template parsing, capture, and rendering tools")]
struct Cli {
	/// Print debug diagnostics on stderr.
	#[arg(long, global = true)]
	verbose: bool,
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	#[command(allow_negative_numbers = true)]
	Format {
		template: String,
		values: Vec<String>,
		#[arg(long)]
		culture: Option<String>,
		#[arg(long, default_value_t = 10)]
		max_depth: u32,
	},
	Tokens {
		template: String,
		#[arg(long)]
		json: bool,
	},
	#[command(allow_negative_numbers = true)]
	Capture {
		template: String,
		values: Vec<String>,
		#[arg(long, default_value_t = 10)]
		max_depth: u32,
	},
}

fn main() {
	let cli = Cli::parse();
	init_logging(cli.verbose);

	if let Err(err) = run(cli.command) {
		eprintln!("error: {err}");
		std::process::exit(1);
	}
}

fn init_logging(verbose: bool) {
	let filter = if verbose {
		EnvFilter::new("debug")
	} else {
		EnvFilter::try_from_env("MSGTEMPLATE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
	};

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}

fn run(command: Commands) -> msgtemplate::template::Result<()> {
	match command {
		Commands::Format {
			template,
			values,
			culture,
			max_depth,
		} => cmd::format::run(template, values, culture, max_depth),
		Commands::Tokens { template, json } => cmd::tokens::run(template, json),
		Commands::Capture { template, values, max_depth } => cmd::capture::run(template, values, max_depth),
	}
}
