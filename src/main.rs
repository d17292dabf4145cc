use std::io::Write;
use std::process;

use clap::Parser;
use env_logger::{Builder, Env};

use rbheight::harness::{self, Config};

/// Compares the measured heights of an unbalanced binary search tree and a red-black tree against
/// their theoretical values
#[derive(Debug, Parser)]
#[clap(name = "rbheight", version)]
struct Args {
    /// Number of keys inserted into every tree
    #[clap(long)]
    nodes: Option<usize>,
    /// Number of shuffled trees averaged over for the average case
    #[clap(long)]
    samples: Option<usize>,
    /// Seed for the shuffles, for reproducible runs
    #[clap(long)]
    seed: Option<u64>,
}

impl Args {
    fn into_config(self) -> Config {
        let defaults = Config::default();
        Config {
            nodes: self.nodes.unwrap_or(defaults.nodes),
            samples: self.samples.unwrap_or(defaults.samples),
            seed: self.seed,
        }
    }
}

/// Initialize the logger. The level is read from `RUST_LOG` and defaults to "warn".
fn initialize_logger() {
    let env = Env::default().default_filter_or("warn");
    let mut builder = Builder::from_env(env);

    // Add the module path and line number
    builder.format(|buf, record| {
        writeln!(
            buf,
            "[{} {}:{}] {}",
            record.level(),
            record.module_path().unwrap_or(""),
            record.line().map_or_else(String::new, |line| line.to_string()),
            record.args(),
        )
    });

    builder.init();
}

fn main() {
    initialize_logger();

    let config = Args::parse().into_config();
    match harness::run(&config) {
        Ok(report) => print!("{}", report),
        Err(err) => {
            eprintln!("error: {}", err);
            process::exit(1);
        },
    }
}
