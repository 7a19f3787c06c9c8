use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use menu_gateway::api::{ApiServer, ApiState};
use menu_gateway::channels::TelegramChannel;
use menu_gateway::session::SessionStore;
use menu_gateway::store::{ConfigStore, SupabaseStore};
use menu_gateway::tenant::{TenantCache, TenantResolver};
use menu_gateway::{Config, OrderBot};

/// Menu Gateway - multi-tenant restaurant ordering bot
#[derive(Parser)]
#[command(name = "menu-gateway", version, about)]
struct Cli {
    /// Port to listen on (falls back to `PORT`, then 8080)
    #[arg(long, env = "MENU_GATEWAY_PORT")]
    port: Option<u16>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Register the Telegram webhook URL
    SetWebhook {
        /// Public URL of `/telegram-webhook`
        url: String,
    },
    /// Remove the Telegram webhook
    DeleteWebhook,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    let filter = match cli.verbose {
        0 => "info,menu_gateway=info",
        1 => "info,menu_gateway=debug",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("fatal: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = Config::from_env()?;
    let telegram = TelegramChannel::new(config.telegram.bot_token.clone());

    if let Some(cmd) = cli.command {
        return match cmd {
            Command::SetWebhook { url } => {
                if config.telegram.webhook_secret.is_none() {
                    tracing::warn!("TELEGRAM_WEBHOOK_SECRET not set, webhook will accept any caller");
                }
                Ok(telegram
                    .set_webhook(&url, config.telegram.webhook_secret.as_deref())
                    .await?)
            }
            Command::DeleteWebhook => Ok(telegram.delete_webhook().await?),
        };
    }

    let port = cli.port.unwrap_or(config.port);
    tracing::info!(
        port,
        tenants_table = %config.store.tenants_table,
        bindings_table = %config.store.bindings_table,
        "starting menu gateway"
    );

    let store: Arc<dyn ConfigStore> = Arc::new(SupabaseStore::new(&config.store)?);
    let resolver = TenantResolver::new(Arc::clone(&store), TenantCache::new(store));
    let bot = OrderBot::new(resolver, SessionStore::new(), Arc::new(telegram));

    ApiServer::new(ApiState::new(bot, &config), port).run().await?;
    Ok(())
}
