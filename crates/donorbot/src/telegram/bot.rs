//! Bot initialization and the command list

use reqwest::ClientBuilder;
use secrecy::{ExposeSecret, SecretString};
use teloxide::prelude::*;
use teloxide::types::BotCommand;
use teloxide::utils::command::BotCommands;

use super::Bot;
use donorcore::core::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "welcome message and overview")]
    Start,
    #[command(description = "how to use the bot")]
    Help,
    #[command(description = "search for blood donors")]
    Find,
    #[command(description = "register as a blood donor")]
    Register,
    #[command(description = "stop the current search or registration")]
    Cancel,
}

/// Creates a Bot instance with custom or default API URL
///
/// # Arguments
/// * `token` - Bot token from BotFather
/// * `api_url` - Alternative Bot API server, `None` for api.telegram.org
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Invalid API URL or HTTP client setup failure
pub fn create_bot(token: &SecretString, api_url: Option<&str>) -> anyhow::Result<Bot> {
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token.expose_secret(), client);

    let bot = match api_url {
        Some(raw) => {
            log::info!("Using custom Bot API URL: {}", raw);
            let url = url::Url::parse(raw).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            bot.set_api_url(url)
        }
        None => bot,
    };

    Ok(bot)
}

/// Publishes the command list so Telegram shows it in the menu
///
/// # Returns
/// * `Ok(())` - Commands set successfully
/// * `Err(RequestError)` - Failed to set commands
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(menu_commands()).await?;
    Ok(())
}

/// Command menu entries, names without the leading slash
pub fn menu_commands() -> Vec<BotCommand> {
    Command::bot_commands()
        .into_iter()
        .map(|c| BotCommand::new(c.command.trim_start_matches('/'), c.description))
        .collect()
}
