use std::borrow::Cow;
use std::collections::HashSet;
use std::sync::OnceLock;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serenity::all::{ChannelId, Colour, CreateEmbed, CreateEmbedAuthor};
use serenity::async_trait;

use crate::error::{MenuError, MenuResult};
use crate::host::ReactionEvent;
use crate::menus::context::{MenuContext, MenuNotification};
use crate::menus::engine::{MenuBehaviour, MenuFlow, MenuOptions, MenuSession, ReactionMenu};
use crate::menus::trigger::Trigger;

/// Discord caps a message at 20 distinct reactions.
pub const MAX_PALETTE_SIZE: usize = 20;

const DEFAULT_COLOURS: [(&str, &str, u64); 9] = [
    ("\u{1f534}", "red", 0xdd2e44),
    ("\u{1f7e0}", "orange", 0xffac33),
    ("\u{1f7e1}", "yellow", 0xfdcb58),
    ("\u{1f7e2}", "green", 0x78b159),
    ("\u{1f535}", "blue", 0x55acee),
    ("\u{1f7e3}", "purple", 0xaa8ed6),
    ("\u{1f7e4}", "brown", 0xc1694f),
    ("\u{26aa}", "off white", 0xe6e7e8),
    ("\u{26ab}", "pretty much black", 0x31373d),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourEntry {
    pub emoji: String,
    pub name: String,
    pub value: u64,
}

impl ColourEntry {
    pub fn new(emoji: impl Into<String>, name: impl Into<String>, value: u64) -> Self {
        Self {
            emoji: emoji.into(),
            name: name.into(),
            value,
        }
    }
}

/// The ordered glyph → colour table a [`ColourSelector`] offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<ColourEntry>,
}

impl Palette {
    pub fn new(entries: Vec<ColourEntry>) -> MenuResult<Self> {
        if entries.is_empty() {
            return Err(MenuError::config("a palette needs at least one colour"));
        }
        if entries.len() > MAX_PALETTE_SIZE {
            return Err(MenuError::config(format!(
                "a palette holds at most {MAX_PALETTE_SIZE} colours, got {}",
                entries.len()
            )));
        }
        let mut seen = HashSet::new();
        if let Some(dup) = entries.iter().find(|e| !seen.insert(e.emoji.as_str())) {
            return Err(MenuError::config(format!(
                "palette uses {} more than once",
                dup.emoji
            )));
        }
        Ok(Self { entries })
    }

    pub fn builtin() -> &'static Palette {
        static BUILTIN: OnceLock<Palette> = OnceLock::new();
        BUILTIN.get_or_init(|| Palette {
            entries: DEFAULT_COLOURS
                .iter()
                .map(|(emoji, name, value)| ColourEntry::new(*emoji, *name, *value))
                .collect(),
        })
    }

    pub fn entries(&self) -> &[ColourEntry] {
        &self.entries
    }

    pub fn get(&self, emoji: &str) -> Option<&ColourEntry> {
        self.entries.iter().find(|e| e.emoji == emoji)
    }
}

/// A picked colour as a [`Colour`] when it is a valid 24-bit RGB value, raw otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickedColour {
    Colour(Colour),
    Raw(u64),
}

impl PickedColour {
    pub fn from_value(value: u64) -> Self {
        match u32::try_from(value) {
            Ok(rgb) if rgb <= 0xFF_FFFF => PickedColour::Colour(Colour::new(rgb)),
            _ => PickedColour::Raw(value),
        }
    }

    pub fn value(self) -> u64 {
        match self {
            PickedColour::Colour(colour) => u64::from(colour.0),
            PickedColour::Raw(value) => value,
        }
    }
}

/// Every pick is also broadcast as [`MenuNotification::ColourPicked`].
#[derive(Debug, Clone)]
pub struct ColourSelector {
    palette: Cow<'static, Palette>,
    options: MenuOptions,
    picked: Option<ColourEntry>,
}

pub type ColorSelector = ColourSelector;

impl Default for ColourSelector {
    fn default() -> Self {
        Self {
            palette: Cow::Borrowed(Palette::builtin()),
            options: MenuOptions::default(),
            picked: None,
        }
    }
}

impl ColourSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Cow::Owned(palette);
        self
    }

    pub fn with_options(mut self, options: MenuOptions) -> Self {
        self.options = options;
        self
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn picked(&self) -> Option<&ColourEntry> {
        self.picked.as_ref()
    }

    pub fn into_menu(mut self) -> MenuResult<ReactionMenu<Self>> {
        let options = std::mem::take(&mut self.options);
        ReactionMenu::new(self, options)
    }

    pub async fn result(self, ctx: &MenuContext) -> MenuResult<Option<PickedColour>> {
        self.result_in(ctx, ctx.channel_id).await
    }

    pub async fn result_in(
        self,
        ctx: &MenuContext,
        channel_id: ChannelId,
    ) -> MenuResult<Option<PickedColour>> {
        let entry = self.into_menu()?.run(ctx, channel_id).await?;
        Ok(entry.map(|e| PickedColour::from_value(e.value)))
    }

    fn embed_colour(&self) -> Colour {
        let usable: Vec<Colour> = self
            .palette
            .entries()
            .iter()
            .filter_map(|e| match PickedColour::from_value(e.value) {
                PickedColour::Colour(c) => Some(c),
                PickedColour::Raw(_) => None,
            })
            .collect();
        usable
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or_default()
    }
}

#[async_trait]
impl MenuBehaviour for ColourSelector {
    type Action = usize;
    type Output = ColourEntry;

    fn triggers(&self) -> Vec<Trigger<usize>> {
        self.palette
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| Trigger::new(entry.emoji.clone(), i).at(i))
            .collect()
    }

    fn render(&self, ctx: &MenuContext, options: &MenuOptions) -> CreateEmbed {
        let description = self
            .palette
            .entries()
            .iter()
            .map(|e| format!("{}: #{:06x} ({})", e.emoji, e.value, e.name))
            .collect::<Vec<_>>()
            .join("\n");

        let mut author = CreateEmbedAuthor::new(ctx.invoker.name.clone());
        if let Some(avatar) = &ctx.invoker.avatar_url {
            author = author.icon_url(avatar.clone());
        }

        CreateEmbed::new()
            .title(options.title_or("Pick a colour:"))
            .description(description)
            .colour(options.colour.unwrap_or_else(|| self.embed_colour()))
            .timestamp(options.timestamp.unwrap_or(ctx.invoked_at))
            .author(author)
    }

    async fn on_trigger(
        &mut self,
        index: usize,
        _event: &ReactionEvent,
        session: &mut MenuSession<'_>,
    ) -> MenuResult<MenuFlow> {
        let Some(entry) = self.palette.entries().get(index).cloned() else {
            return Ok(MenuFlow::Continue);
        };
        session
            .context()
            .notify(MenuNotification::ColourPicked(entry.clone()));
        self.picked = Some(entry);
        Ok(MenuFlow::Stop)
    }

    fn take_result(&mut self) -> Option<ColourEntry> {
        self.picked.take()
    }
}
