//! Offline wallet demo CLI
//!
//! Thin stand-in for the mobile UI: every subcommand maps onto one call of
//! the core surface (`wallets`, `history`, `send`, `topup`, `sync`,
//! `login`, `backup`, `restore`).
//!
//! # Usage
//!
//! ```bash
//! cargo run -- wallets
//! cargo run -- send --from 9023456766 --to 9098765432 --amount 20
//! cargo run -- sync
//! cargo run -- backup --pin 1234 --out wallet.bak
//! ```
//!
//! # Exit codes
//!
//! - 0: Success
//! - 1: Error (unknown wallet, insufficient funds, corrupt backup, etc.)

use chain_wallet::cli::{self, CliArgs, Command};
use chain_wallet::core::now_millis;
use chain_wallet::{backup, JsonFileStore, WalletEngine, WalletError};
use std::fs;
use std::process;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = cli::parse_args();
    if let Err(e) = run(args).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn run(args: CliArgs) -> Result<(), WalletError> {
    let store = JsonFileStore::new(&args.data_dir)?;
    let engine = WalletEngine::new(store);

    match args.command {
        Command::Wallets => {
            for wallet in engine.wallets()? {
                println!(
                    "{:<12} {:<12} {:<12} balance {}",
                    wallet.name, wallet.phone_number, wallet.address, wallet.balance
                );
            }
        }
        Command::History => {
            let mut transactions = engine.transactions()?;
            transactions.sort_by_key(|tx| std::cmp::Reverse(tx.timestamp));
            for tx in transactions {
                println!(
                    "{:?} {:?} {} -> {} amount {} {}",
                    tx.kind,
                    tx.status,
                    tx.sender_phone,
                    tx.receiver_phone,
                    tx.amount,
                    tx.hash.as_deref().unwrap_or("-")
                );
            }
        }
        Command::Send { from, to, amount } => {
            // Recipient may be given as a phone number or an address
            let receiver = engine.find_wallet(&to)?;
            engine.create_transfer(&from, &receiver.phone_number, amount, now_millis())?;
            println!(
                "Queued {} to {} (pending until sync)",
                amount, receiver.phone_number
            );
        }
        Command::Topup {
            phone,
            amount,
            source,
        } => {
            engine.top_up(&phone, amount, &source)?;
            println!("Topped up {} with {}", phone, amount);
        }
        Command::Sync => {
            println!("Syncing with chain...");
            let confirmed = engine.settle().await?;
            println!("Confirmed {} transaction(s)", confirmed);
        }
        Command::Login { phone, pin } => {
            let wallet = engine.verify_pin(&phone, &pin)?;
            println!("Welcome, {}", wallet.name);
        }
        Command::Backup { pin, out } => {
            let blob = backup::create_backup(engine.store(), &pin)?;
            match out {
                Some(path) => {
                    fs::write(&path, blob)?;
                    println!("Backup written to {}", path.display());
                }
                None => println!("{}", blob),
            }
        }
        Command::Restore { pin, file } => {
            let blob = fs::read_to_string(&file)?;
            backup::restore_backup(engine.store(), &blob, &pin)?;
            println!("Backup restored");
        }
    }

    Ok(())
}
