//! Splitter Engine CLI
//!
//! Applies a CSV batch of splitter operations and outputs final account
//! states.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- 0x00000000000000000000000000000000000000a1 operations.csv > accounts.csv
//! ```
//!
//! The first argument is the deployer address (the initial pauser).
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity

use splitter_engine::{Address, Result, SplitterError, SplitterRunner};
use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        return Err(SplitterError::MissingArgument);
    }

    let deployer: Address = args[1].parse()?;
    let file = File::open(&args[2])?;
    let reader = BufReader::new(file);

    let mut runner = SplitterRunner::new(deployer);
    runner.process_csv(reader)?;

    let stdout = io::stdout();
    let handle = stdout.lock();
    runner.write_output(handle)?;

    Ok(())
}
