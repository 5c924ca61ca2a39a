use reaction_menus::discord_helpers::EmbedPaginator;
use reaction_menus::menus::ScrollablePager;
use reaction_menus::{nay, yay};
use serenity::all::{
    CommandInteraction, CommandOptionType, Context, CreateCommand, CreateCommandOption,
    ResolvedOption,
};

use crate::commands::{bool_option, integer_option, string_option, MenuEnv};
use crate::helpers::{command_followup, command_response, menu_context, quiet_response};

const DEFAULT_PAGE_SIZE: i64 = 200;

pub async fn run(
    options: &[ResolvedOption<'_>],
    ctx: &Context,
    command: &CommandInteraction,
    env: &MenuEnv<'_>,
) {
    let Some(text) = string_option(options, "text") else {
        command_response(ctx, command, "You must give some text to page through!").await;
        return;
    };
    let scroll = bool_option(options, "scroll").unwrap_or(true);
    let page_size = integer_option(options, "page_size")
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .max(1);
    let page_size = usize::try_from(page_size).unwrap_or(usize::MAX);

    let pages = match EmbedPaginator::from_text("\u{1f4d6} Pages", text, page_size) {
        Ok(paginator) => paginator.finish(),
        Err(e) => {
            command_response(ctx, command, format!("Can't page that: {e}")).await;
            return;
        }
    };

    quiet_response(ctx, command, format!("{} page(s) coming up.", pages.pages.len())).await;
    let menu_ctx = menu_context(ctx, command, env.notifications);

    if !scroll {
        match pages
            .send(&menu_ctx, command.channel_id, &env.config.menu_options(), env.config.pacing())
            .await
        {
            Ok(sent) => yay!("Posted {} pages", sent.len()),
            Err(e) => {
                nay!("Failed to post pages: {}", e);
                command_followup(ctx, command, "Could not post every page.").await;
            }
        }
        return;
    }

    let pager = match ScrollablePager::new(pages) {
        Ok(pager) => pager.with_options(env.config.menu_options()),
        Err(e) => {
            command_followup(ctx, command, format!("Nothing to show: {e}")).await;
            return;
        }
    };
    if let Err(e) = pager.result(&menu_ctx).await {
        nay!("Pager failed: {}", e);
        command_followup(ctx, command, "Something went wrong with the pager.").await;
    }
}

pub fn register() -> CreateCommand {
    CreateCommand::new("pages")
        .description("Split text into pages")
        .add_option(
            CreateCommandOption::new(CommandOptionType::String, "text", "The text to split")
                .required(true),
        )
        .add_option(CreateCommandOption::new(
            CommandOptionType::Boolean,
            "scroll",
            "Scroll through one message (default) instead of posting every page",
        ))
        .add_option(
            CreateCommandOption::new(
                CommandOptionType::Integer,
                "page_size",
                "Characters per page",
            )
            .min_int_value(1)
            .max_int_value(2048),
        )
        .dm_permission(true)
}
