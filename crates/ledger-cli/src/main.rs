mod constants;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use constants::{DEMO_DIFFICULTY, MAX_DIFFICULTY};
use ledger_core::{Block, Chain};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "ledger-cli")]
#[command(about = "Build and inspect a proof-of-work ledger in memory")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Mine one block per payload onto a fresh chain and print it
    Mine {
        /// Required leading zero hex digits per block
        #[arg(long, default_value_t = DEMO_DIFFICULTY, value_parser = clap::value_parser!(u64).range(..=MAX_DIFFICULTY))]
        difficulty: u64,
        /// Block payload; repeat for several blocks
        #[arg(long = "payload")]
        payloads: Vec<String>,
        /// Print the chain as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the digest of a block built from the given fields
    Digest {
        #[arg(long)]
        index: u64,
        #[arg(long)]
        previous_hash: String,
        #[arg(long)]
        payload: String,
        /// Seconds since the Unix epoch
        #[arg(long)]
        timestamp: f64,
        #[arg(long, default_value_t = 0)]
        nonce: u64,
    },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Mine {
            difficulty,
            payloads,
            json,
        } => {
            let mut chain = Chain::new(difficulty as usize);
            for payload in payloads {
                let candidate =
                    Block::candidate(chain.next_index(), chain.latest_block().hash(), payload);
                chain.append(candidate);
            }

            if json {
                println!("{}", serde_json::to_string_pretty(&chain)?);
            } else {
                println!("{chain}");
            }

            if let Err(err) = chain.validate() {
                bail!("chain is invalid: {err}");
            }
            info!(height = chain.len(), difficulty, "chain is valid");
        }
        Command::Digest {
            index,
            previous_hash,
            payload,
            timestamp,
            nonce,
        } => {
            let block = Block::new(index, previous_hash, payload, Some(timestamp), nonce);
            println!("{}", block.hash());
        }
    }
    Ok(())
}
