use reaction_menus::config::ConfigSettings;
use reaction_menus::menus::MenuNotification;
use reaction_menus::{hey, nay, say, yay};
use serenity::all::GatewayIntents;
use serenity::Client;
use std::env;
use tokio::sync::broadcast;

use crate::discord_handler::Handler;

mod commands;
mod discord_handler;
mod helpers;

/// Logs every colour picked through a menu, anywhere.
fn spawn_colour_log(mut picks: broadcast::Receiver<MenuNotification>) {
    tokio::spawn(async move {
        loop {
            match picks.recv().await {
                Ok(MenuNotification::ColourPicked(entry)) => {
                    say!("Colour picked: {} #{:06x} ({})", entry.emoji, entry.value, entry.name)
                }
                Err(broadcast::error::RecvError::Lagged(missed)) => {
                    hey!("Colour log fell behind by {} picks", missed)
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    });
}

#[tokio::main]
async fn main() {
    yay!("Menu Bot is starting up!");

    if let Err(e) = dotenv::dotenv() {
        hey!("No .env file loaded: {}", e);
    }

    let Ok(token) = env::var("DISCORD_TOKEN") else {
        nay!("DISCORD_TOKEN not found in environment");
        return;
    };

    let intents = GatewayIntents::GUILDS
        | GatewayIntents::GUILD_MESSAGES
        | GatewayIntents::GUILD_MESSAGE_REACTIONS
        | GatewayIntents::DIRECT_MESSAGES
        | GatewayIntents::DIRECT_MESSAGE_REACTIONS;

    say!("Loading config...");
    let config = ConfigSettings::get();
    say!("Config loaded!");

    let (notifications, picks) = broadcast::channel(32);
    spawn_colour_log(picks);

    let Ok(mut client) = Client::builder(token, intents)
        .event_handler(Handler {
            config,
            notifications,
        })
        .await
    else {
        nay!("Error creating client");
        return;
    };

    if let Err(err) = client.start().await {
        nay!("Client error: {}", err);
    }
}
