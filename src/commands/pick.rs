use std::sync::OnceLock;

use regex::Regex;
use reaction_menus::menus::OptionSelector;
use reaction_menus::{nay, MenuError};
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    ResolvedOption,
};

use crate::commands::{string_option, MenuEnv};
use crate::helpers::{command_followup, command_response, menu_context, quiet_response};

/// Splits "red, green | blue; yellow" into its items.
pub fn split_choices(raw: &str) -> Vec<String> {
    static SEPARATOR: OnceLock<Regex> = OnceLock::new();
    let separator =
        SEPARATOR.get_or_init(|| Regex::new(r"\s*[,;|]\s*").expect("separator pattern is valid"));

    separator
        .split(raw)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub async fn run(
    options: &[ResolvedOption<'_>],
    ctx: &Context,
    command: &CommandInteraction,
    env: &MenuEnv<'_>,
) {
    let Some(raw) = string_option(options, "choices") else {
        command_response(ctx, command, "You must give some choices!").await;
        return;
    };

    let selector = match OptionSelector::new(split_choices(raw)) {
        Ok(selector) => selector.with_options(env.config.menu_options()),
        Err(MenuError::Configuration(reason)) => {
            command_response(ctx, command, format!("Can't offer those: {reason}")).await;
            return;
        }
        Err(e) => {
            nay!("Failed to build selector: {}", e);
            return;
        }
    };

    quiet_response(ctx, command, "Pick one from the menu below.").await;

    let menu_ctx = menu_context(ctx, command, env.notifications);
    match selector.result(&menu_ctx).await {
        Ok(Some(choice)) => command_followup(ctx, command, format!("You picked **{choice}**.")).await,
        Ok(None) => command_followup(ctx, command, "Nothing picked.").await,
        Err(e) => {
            nay!("Selector menu failed: {}", e);
            command_followup(ctx, command, "Something went wrong with the menu.").await;
        }
    }
}

pub fn register() -> CreateCommand {
    CreateCommand::new("pick")
        .description("Pick one of up to eleven choices")
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::String,
                "choices",
                "Choices separated by commas, semicolons or pipes",
            )
            .required(true),
        )
        .dm_permission(true)
}
