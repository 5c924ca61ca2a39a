use reaction_menus::menus::Confirm;
use reaction_menus::nay;
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    ResolvedOption,
};

use crate::commands::{string_option, MenuEnv};
use crate::helpers::{command_followup, menu_context, quiet_response};

pub async fn run(
    options: &[ResolvedOption<'_>],
    ctx: &Context,
    command: &CommandInteraction,
    env: &MenuEnv<'_>,
) {
    let confirm = match string_option(options, "question") {
        Some(question) => Confirm::new(question),
        None => Confirm::default(),
    }
    .with_options(env.config.menu_options());

    quiet_response(ctx, command, "Waiting for your answer...").await;

    let menu_ctx = menu_context(ctx, command, env.notifications);
    match confirm.result(&menu_ctx).await {
        Ok(Some(true)) => command_followup(ctx, command, "You said yes.").await,
        Ok(Some(false)) => command_followup(ctx, command, "You said no.").await,
        Ok(None) => command_followup(ctx, command, "No answer, never mind.").await,
        Err(e) => {
            nay!("Confirm menu failed: {}", e);
            command_followup(ctx, command, "Something went wrong asking you.").await;
        }
    }
}

pub fn register() -> CreateCommand {
    CreateCommand::new("confirm")
        .description("Ask a yes or no question")
        .add_option(CreateCommandOption::new(
            CommandOptionType::String,
            "question",
            "What to ask",
        ))
        .dm_permission(true)
}
