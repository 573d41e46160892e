use buenzli_types::constants::{env, DEFAULT_WALLET_DIR_NAME};
use clap::{Parser, Subcommand};
use log::debug;
use std::path::PathBuf;

mod commands;

/// buenzli wallet command-line interface.
#[derive(Parser, Debug)]
#[command(name = "bwallet")]
#[command(about = "Command-line wallet for a buenzli ledger node")]
#[command(version)]
struct Cli {
    /// Wallet directory (defaults to $BUENZLI_DIR, then ~/.buenzli).
    #[arg(long)]
    dir: Option<PathBuf>,

    /// Node address as host:port or URL (defaults to $BUENZLI_NODE).
    #[arg(long)]
    node: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List wallets and their addresses.
    List {
        /// Abbreviate addresses.
        #[arg(long)]
        short: bool,
    },

    /// Create a new wallet.
    Create {
        /// Wallet name (letters and digits).
        #[arg(long)]
        name: String,
    },

    /// Ask the node to mine a block paying a wallet.
    Mine {
        /// Wallet name.
        #[arg(long)]
        to: String,
    },

    /// Show a wallet's balance.
    Balance {
        /// Wallet name.
        #[arg(long)]
        of: String,
    },

    /// Send coins from a wallet to an address.
    Transfer {
        /// Name of the source wallet.
        #[arg(long)]
        from: String,

        /// Address of the target wallet.
        #[arg(long)]
        to: String,

        /// Number of coins to send.
        #[arg(long, allow_negative_numbers = true)]
        amount: i64,
    },
}

/// Application context shared across commands.
struct AppContext {
    wallet_dir: PathBuf,
    node: Option<String>,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> Self {
        let wallet_dir = cli
            .dir
            .clone()
            .or_else(|| std::env::var_os(env::WALLET_DIR).map(PathBuf::from))
            .unwrap_or_else(default_wallet_dir);

        let node = cli
            .node
            .clone()
            .or_else(|| std::env::var(env::NODE).ok())
            .filter(|n| !n.trim().is_empty());

        Self { wallet_dir, node }
    }
}

fn default_wallet_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_WALLET_DIR_NAME)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let ctx = AppContext::from_cli(&cli);
    debug!("wallet directory: {}", ctx.wallet_dir.display());

    let result = match cli.command {
        Commands::List { short } => commands::list_wallets(&ctx, short),
        Commands::Create { name } => commands::create_wallet(&ctx, &name),
        Commands::Mine { to } => commands::mine(&ctx, &to),
        Commands::Balance { of } => commands::show_balance(&ctx, &of),
        Commands::Transfer { from, to, amount } => commands::transfer(&ctx, &from, &to, amount),
    };

    if let Err(e) = result {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
