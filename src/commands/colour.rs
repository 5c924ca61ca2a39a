use reaction_menus::menus::{ColourSelector, PickedColour};
use reaction_menus::nay;
use serenity::all::{CommandInteraction, Context, CreateCommand};

use crate::commands::MenuEnv;
use crate::helpers::{command_followup, menu_context, quiet_response};

pub async fn run(ctx: &Context, command: &CommandInteraction, env: &MenuEnv<'_>) {
    let mut selector = ColourSelector::new().with_options(env.config.menu_options());
    if let Some(palette) = env.config.palette() {
        selector = selector.with_palette(palette);
    }

    quiet_response(ctx, command, "Pick a colour from the menu below.").await;

    let menu_ctx = menu_context(ctx, command, env.notifications);
    match selector.result(&menu_ctx).await {
        Ok(Some(PickedColour::Colour(colour))) => {
            command_followup(ctx, command, format!("You picked #{}.", colour.hex())).await
        }
        Ok(Some(PickedColour::Raw(value))) => {
            command_followup(ctx, command, format!("You picked {value:#x}.")).await
        }
        Ok(None) => command_followup(ctx, command, "No colour picked.").await,
        Err(e) => {
            nay!("Colour menu failed: {}", e);
            command_followup(ctx, command, "Something went wrong with the colour menu.").await;
        }
    }
}

pub fn register() -> CreateCommand {
    CreateCommand::new("colour")
        .description("Pick a colour")
        .dm_permission(true)
}
