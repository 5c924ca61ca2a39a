use std::sync::Arc;

use reaction_menus::discord_helpers::SerenityHost;
use reaction_menus::menus::{MenuContext, MenuNotification};
use reaction_menus::nay;
use serenity::all::{
    Command, CommandInteraction, CreateCommand, CreateInteractionResponseFollowup,
};
use serenity::builder::{CreateInteractionResponse, CreateInteractionResponseMessage};
use serenity::client::Context;
use tokio::sync::broadcast;

pub async fn command_response<S: Into<String>>(
    ctx: &Context,
    command: &CommandInteraction,
    msg: S,
) {
    let data = CreateInteractionResponseMessage::new().content(msg.into());
    let builder = CreateInteractionResponse::Message(data);
    if let Err(err) = command.create_response(&ctx.http, builder).await {
        nay!("Failed to respond to command: {}", err)
    }
}

pub async fn quiet_response<S: Into<String>>(
    ctx: &Context,
    command: &CommandInteraction,
    msg: S,
) {
    let data = CreateInteractionResponseMessage::new()
        .content(msg.into())
        .ephemeral(true);
    let builder = CreateInteractionResponse::Message(data);
    if let Err(err) = command.create_response(&ctx.http, builder).await {
        nay!("Failed to respond to command: {}", err)
    }
}

/// The interaction must already have been answered.
pub async fn command_followup<S: Into<String>>(
    ctx: &Context,
    command: &CommandInteraction,
    msg: S,
) {
    let builder = CreateInteractionResponseFollowup::new().content(msg.into());
    if let Err(err) = command.create_followup(&ctx.http, builder).await {
        nay!("Failed to follow up on command: {}", err)
    }
}

pub async fn register_command(ctx: &Context, cmd: CreateCommand) {
    if let Err(e) = Command::create_global_command(&ctx.http, cmd).await {
        nay!("Failed to register a command: {}", e);
    }
}

pub fn menu_context(
    ctx: &Context,
    command: &CommandInteraction,
    notifications: &broadcast::Sender<MenuNotification>,
) -> MenuContext {
    MenuContext::from_command(
        Arc::new(SerenityHost::new(ctx)),
        command,
        notifications.clone(),
    )
}
