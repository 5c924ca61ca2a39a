use reaction_menus::config::ConfigSettings;
use reaction_menus::menus::MenuNotification;
use reaction_menus::{hey, yay};
use serenity::{
    all::{ActivityData, Context, EventHandler, Interaction, OnlineStatus, Ready, ResumedEvent},
    async_trait,
};
use tokio::sync::broadcast;

use crate::{
    commands::{self, MenuEnv},
    helpers::{command_response, register_command},
};

pub(crate) struct Handler {
    pub config: ConfigSettings,
    pub notifications: broadcast::Sender<MenuNotification>,
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        register_command(&ctx, commands::confirm::register()).await;
        register_command(&ctx, commands::colour::register()).await;
        register_command(&ctx, commands::pick::register()).await;
        register_command(&ctx, commands::pages::register()).await;

        yay!("{} is connected!", ready.user.name);

        ctx.set_presence(
            Some(ActivityData::custom("Waiting for reactions")),
            OnlineStatus::Online,
        );
    }

    async fn resume(&self, _: Context, _: ResumedEvent) {
        hey!("Resumed");
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::Command(command) = interaction else {
            return;
        };
        let command_options = &command.data.options();
        let env = MenuEnv {
            config: &self.config,
            notifications: &self.notifications,
        };

        match command.data.name.as_str() {
            "confirm" => commands::confirm::run(command_options, &ctx, &command, &env).await,
            "colour" => commands::colour::run(&ctx, &command, &env).await,
            "pick" => commands::pick::run(command_options, &ctx, &command, &env).await,
            "pages" => commands::pages::run(command_options, &ctx, &command, &env).await,
            _ => {
                command_response(&ctx, &command, "Unknown command!").await;
            }
        }
    }
}
