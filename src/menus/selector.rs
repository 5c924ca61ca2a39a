use std::fmt;

use serenity::all::{ChannelId, Colour, CreateEmbed};
use serenity::async_trait;

use crate::error::{MenuError, MenuResult};
use crate::host::ReactionEvent;
use crate::menus::context::MenuContext;
use crate::menus::engine::{MenuBehaviour, MenuFlow, MenuOptions, MenuSession, ReactionMenu};
use crate::menus::trigger::Trigger;
use crate::menus::{truncate_chars, EMBED_DESCRIPTION_LIMIT};

/// Ten keycaps (0 through 9) plus 🔟.
pub const MAX_OPTIONS: usize = 11;

pub const KEYCAP_TEN: &str = "\u{1f51f}";

/// The reaction used for the option at `index`: 0️⃣ … 9️⃣, then 🔟.
pub fn number_glyph(index: usize) -> Option<String> {
    match index {
        0..=9 => Some(format!("{index}\u{fe0f}\u{20e3}")),
        10 => Some(KEYCAP_TEN.to_string()),
        _ => None,
    }
}

/// The result is the item itself, not its position or its label.
#[derive(Debug, Clone)]
pub struct OptionSelector<T> {
    items: Vec<T>,
    options: MenuOptions,
    chosen: Option<usize>,
}

pub type NumericSelector<T> = OptionSelector<T>;

impl<T: fmt::Display + Send> OptionSelector<T> {
    pub fn new(items: Vec<T>) -> MenuResult<Self> {
        if items.is_empty() {
            return Err(MenuError::config("a selector needs at least one item"));
        }
        if items.len() > MAX_OPTIONS {
            return Err(MenuError::config(format!(
                "a selector takes at most {MAX_OPTIONS} items, got {}",
                items.len()
            )));
        }
        Ok(Self {
            items,
            options: MenuOptions::default(),
            chosen: None,
        })
    }

    pub fn with_options(mut self, options: MenuOptions) -> Self {
        self.options = options;
        self
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn selected(&self) -> Option<&T> {
        self.items.get(self.chosen?)
    }

    pub fn into_menu(mut self) -> MenuResult<ReactionMenu<Self>> {
        let options = std::mem::take(&mut self.options);
        ReactionMenu::new(self, options)
    }

    pub async fn result(self, ctx: &MenuContext) -> MenuResult<Option<T>> {
        self.result_in(ctx, ctx.channel_id).await
    }

    pub async fn result_in(self, ctx: &MenuContext, channel_id: ChannelId) -> MenuResult<Option<T>> {
        self.into_menu()?.run(ctx, channel_id).await
    }
}

#[async_trait]
impl<T: fmt::Display + Send> MenuBehaviour for OptionSelector<T> {
    type Action = usize;
    type Output = T;

    fn triggers(&self) -> Vec<Trigger<usize>> {
        (0..self.items.len())
            .filter_map(|i| number_glyph(i).map(|glyph| Trigger::new(glyph, i).at(i)))
            .collect()
    }

    fn render(&self, _ctx: &MenuContext, options: &MenuOptions) -> CreateEmbed {
        let lines = self
            .items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| number_glyph(i).map(|glyph| format!("{glyph}: {item}")))
            .collect::<Vec<_>>()
            .join("\n");

        let mut embed = CreateEmbed::new()
            .title(options.title_or("Select one of the following:"))
            .description(truncate_chars(lines, EMBED_DESCRIPTION_LIMIT))
            .colour(options.colour_or(Colour::BLURPLE));
        if let Some(timestamp) = options.timestamp {
            embed = embed.timestamp(timestamp);
        }
        embed
    }

    async fn on_trigger(
        &mut self,
        index: usize,
        _event: &ReactionEvent,
        _session: &mut MenuSession<'_>,
    ) -> MenuResult<MenuFlow> {
        if index >= self.items.len() {
            return Ok(MenuFlow::Continue);
        }
        self.chosen = Some(index);
        Ok(MenuFlow::Stop)
    }

    fn take_result(&mut self) -> Option<T> {
        let index = self.chosen.take()?;
        Some(self.items.swap_remove(index))
    }
}
