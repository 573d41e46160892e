//! CLI command implementations.

use crate::AppContext;
use buenzli_rpc::NodeClient;
use buenzli_types::address::abbreviate;
use buenzli_wallet::{ClientConfig, Keystore, WalletClient, WalletError};

type Result = std::result::Result<(), Box<dyn std::error::Error>>;

/// Characters kept at each end of an abbreviated address.
const SHORT_ADDRESS_KEEP: usize = 15;

// ─── Helpers ────────────────────────────────────────────────────────────────

fn client_config(ctx: &AppContext) -> std::result::Result<ClientConfig, WalletError> {
    let config = ClientConfig::new(&ctx.wallet_dir);
    config.ensure_wallet_dir()?;
    match &ctx.node {
        Some(node) => config.with_node(node),
        None => Ok(config),
    }
}

fn open_client(ctx: &AppContext) -> std::result::Result<WalletClient<NodeClient>, WalletError> {
    let config = client_config(ctx)?;
    let node_config = config
        .node_config("set BUENZLI_NODE or pass --node")?
        .clone();
    let node = NodeClient::with_config(node_config)?;
    Ok(WalletClient::new(&config, node))
}

// ─── Commands ───────────────────────────────────────────────────────────────

pub fn list_wallets(ctx: &AppContext, short: bool) -> Result {
    let keystore = Keystore::new(&client_config(ctx)?);
    for wallet in keystore.list()? {
        let address = if short {
            abbreviate(&wallet.address, SHORT_ADDRESS_KEEP)
        } else {
            wallet.address
        };
        println!("{}: {}", wallet.name, address);
    }
    Ok(())
}

pub fn create_wallet(ctx: &AppContext, name: &str) -> Result {
    let keystore = Keystore::new(&client_config(ctx)?);
    let wallet = keystore.create_wallet(name)?;
    println!("{}: {}", wallet.name, wallet.address);
    Ok(())
}

pub fn mine(ctx: &AppContext, to: &str) -> Result {
    open_client(ctx)?.mine_into(to)?;
    Ok(())
}

pub fn show_balance(ctx: &AppContext, of: &str) -> Result {
    let balance = open_client(ctx)?.balance(of)?;
    println!("{}", balance);
    Ok(())
}

pub fn transfer(ctx: &AppContext, from: &str, to: &str, amount: i64) -> Result {
    let amount = u64::try_from(amount)
        .ok()
        .filter(|&a| a > 0)
        .ok_or(WalletError::InvalidAmount)?;

    let tx = open_client(ctx)?.transfer(from, to, amount)?;
    println!("{}", tx.hash);
    Ok(())
}
