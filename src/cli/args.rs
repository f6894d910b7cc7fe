use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

/// Offline wallet demo with deferred blockchain settlement
#[derive(Parser, Debug)]
#[command(name = "chain-wallet")]
#[command(about = "Offline wallet demo with deferred blockchain settlement", long_about = None)]
pub struct CliArgs {
    /// Directory holding the ledger snapshots
    #[arg(
        long = "data-dir",
        value_name = "DIR",
        default_value = ".chain-wallet",
        help = "Directory the wallet and transaction snapshots are stored in"
    )]
    pub data_dir: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

/// Wallet actions, mirroring what the mobile UI exposes
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List wallets with balances
    Wallets,

    /// Show transaction history, newest first
    History,

    /// Send money offline (debits the sender now, credits the receiver at sync)
    Send {
        /// Sender phone number
        #[arg(long, value_name = "PHONE")]
        from: String,
        /// Receiver phone number or address
        #[arg(long, value_name = "PHONE_OR_ADDRESS")]
        to: String,
        #[arg(long, value_name = "AMOUNT")]
        amount: Decimal,
    },

    /// Credit a wallet from an external payment rail
    Topup {
        #[arg(long, value_name = "PHONE")]
        phone: String,
        #[arg(long, value_name = "AMOUNT")]
        amount: Decimal,
        /// Funding source label shown in history
        #[arg(long, value_name = "LABEL", default_value = "Card ****0000")]
        source: String,
    },

    /// Settle all pending transactions against the simulated chain
    Sync,

    /// Verify a wallet PIN
    Login {
        #[arg(long, value_name = "PHONE")]
        phone: String,
        #[arg(long, value_name = "PIN")]
        pin: String,
    },

    /// Export an encrypted backup blob
    Backup {
        /// PIN the backup key is derived from
        #[arg(long, value_name = "PIN")]
        pin: String,
        /// Write the blob to a file instead of stdout
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Restore wallets and transactions from an encrypted backup
    Restore {
        #[arg(long, value_name = "PIN")]
        pin: String,
        /// File containing the backup blob
        #[arg(long, value_name = "FILE")]
        file: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_send_parses_amount_as_decimal() {
        let args = CliArgs::try_parse_from([
            "chain-wallet",
            "send",
            "--from",
            "9023456766",
            "--to",
            "9098765432",
            "--amount",
            "20.50",
        ])
        .unwrap();

        match args.command {
            Command::Send { amount, .. } => assert_eq!(amount, Decimal::new(2050, 2)),
            other => panic!("expected send, got {other:?}"),
        }
    }

    #[test]
    fn test_data_dir_defaults() {
        let args = CliArgs::try_parse_from(["chain-wallet", "wallets"]).unwrap();
        assert_eq!(args.data_dir, PathBuf::from(".chain-wallet"));
    }

    #[test]
    fn test_topup_source_defaults() {
        let args = CliArgs::try_parse_from([
            "chain-wallet",
            "topup",
            "--phone",
            "9023456766",
            "--amount",
            "100",
        ])
        .unwrap();

        match args.command {
            Command::Topup { source, .. } => assert_eq!(source, "Card ****0000"),
            other => panic!("expected topup, got {other:?}"),
        }
    }

    #[rstest]
    #[case::no_subcommand(&["chain-wallet"])]
    #[case::send_missing_amount(&["chain-wallet", "send", "--from", "1", "--to", "2"])]
    #[case::bad_amount(&["chain-wallet", "send", "--from", "1", "--to", "2", "--amount", "x"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
