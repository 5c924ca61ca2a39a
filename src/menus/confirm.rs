use serenity::all::{ChannelId, Colour, CreateEmbed, Timestamp};
use serenity::async_trait;

use crate::error::MenuResult;
use crate::host::ReactionEvent;
use crate::menus::context::MenuContext;
use crate::menus::engine::{MenuBehaviour, MenuFlow, MenuOptions, MenuSession, ReactionMenu};
use crate::menus::trigger::Trigger;
use crate::menus::{truncate_chars, EMBED_DESCRIPTION_LIMIT};

pub const ACCEPT: &str = "\u{2705}";
pub const REJECT: &str = "\u{274c}";

pub const DEFAULT_CONFIRMATION: &str = "Are you sure?\n\n\u{2705} Yes!\n\u{274c} No.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmAction {
    Accept,
    Reject,
}

/// The answer is `Some(true)` for ✅, `Some(false)` for ❌ and `None` when the prompt timed out.
#[derive(Debug, Clone)]
pub struct Confirm {
    description: String,
    options: MenuOptions,
    answer: Option<bool>,
}

impl Default for Confirm {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIRMATION)
    }
}

impl Confirm {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: truncate_chars(description.into(), EMBED_DESCRIPTION_LIMIT),
            options: MenuOptions::default(),
            answer: None,
        }
    }

    pub fn with_options(mut self, options: MenuOptions) -> Self {
        self.options = options;
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn answer(&self) -> Option<bool> {
        self.answer
    }

    pub fn into_menu(mut self) -> MenuResult<ReactionMenu<Self>> {
        let options = std::mem::take(&mut self.options);
        ReactionMenu::new(self, options)
    }

    pub async fn result(self, ctx: &MenuContext) -> MenuResult<Option<bool>> {
        self.result_in(ctx, ctx.channel_id).await
    }

    pub async fn result_in(
        self,
        ctx: &MenuContext,
        channel_id: ChannelId,
    ) -> MenuResult<Option<bool>> {
        self.into_menu()?.run(ctx, channel_id).await
    }
}

#[async_trait]
impl MenuBehaviour for Confirm {
    type Action = ConfirmAction;
    type Output = bool;

    fn triggers(&self) -> Vec<Trigger<ConfirmAction>> {
        vec![
            Trigger::new(ACCEPT, ConfirmAction::Accept).at(0),
            Trigger::new(REJECT, ConfirmAction::Reject).at(1),
        ]
    }

    fn render(&self, _ctx: &MenuContext, options: &MenuOptions) -> CreateEmbed {
        CreateEmbed::new()
            .title(options.title_or("Are you sure?"))
            .description(self.description.clone())
            .colour(options.colour_or(Colour::RED))
            .timestamp(options.timestamp.unwrap_or_else(Timestamp::now))
    }

    async fn on_trigger(
        &mut self,
        action: ConfirmAction,
        _event: &ReactionEvent,
        _session: &mut MenuSession<'_>,
    ) -> MenuResult<MenuFlow> {
        self.answer = Some(action == ConfirmAction::Accept);
        Ok(MenuFlow::Stop)
    }

    fn take_result(&mut self) -> Option<bool> {
        self.answer.take()
    }
}
