use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::time::Duration;

use serenity::all::{ChannelId, Colour, CreateEmbed, MessageId, Timestamp};
use serenity::async_trait;
use serenity::futures::StreamExt;
use tokio::task::JoinHandle;

use crate::error::{MenuError, MenuResult};
use crate::host::{MenuHost, MessageHandle, ReactionEvent, ReactionFilter, ReactionStream};
use crate::menus::context::MenuContext;
use crate::menus::trigger::{Trigger, TriggerTable};
use crate::{hey, nay};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// Discord refuses bulk deletes of more than this many messages.
pub const BULK_DELETE_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct MenuOptions {
    pub title: Option<String>,
    pub colour: Option<Colour>,
    pub timestamp: Option<Timestamp>,
    pub delete_message_after: bool,
    /// Inactivity limit, restarted after every click. `None` waits forever.
    pub timeout: Option<Duration>,
    pub public: bool,
}

impl Default for MenuOptions {
    fn default() -> Self {
        Self {
            title: None,
            colour: None,
            timestamp: None,
            delete_message_after: true,
            timeout: Some(DEFAULT_TIMEOUT),
            public: false,
        }
    }
}

impl MenuOptions {
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn colour(mut self, colour: impl Into<Colour>) -> Self {
        self.colour = Some(colour.into());
        self
    }

    pub fn color(self, color: impl Into<Colour>) -> Self {
        self.colour(color)
    }

    pub fn timestamp(mut self, timestamp: impl Into<Timestamp>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    pub fn delete_message_after(mut self, delete: bool) -> Self {
        self.delete_message_after = delete;
        self
    }

    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    pub(crate) fn title_or(&self, fallback: &str) -> String {
        self.title.clone().unwrap_or_else(|| fallback.to_string())
    }

    pub(crate) fn colour_or(&self, fallback: Colour) -> Colour {
        self.colour.unwrap_or(fallback)
    }
}

/// `Started` means the message is out but nobody has clicked yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    Created,
    Started,
    Running,
    Stopped,
}

impl MenuState {
    pub fn is_live(self) -> bool {
        matches!(self, MenuState::Started | MenuState::Running)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuFlow {
    Continue,
    Stop,
    /// Send the message again with fresh reactions.
    Reopen,
}

#[async_trait]
pub trait MenuBehaviour: Send {
    type Action: Clone + Send + Sync;
    type Output: Send;

    fn triggers(&self) -> Vec<Trigger<Self::Action>>;

    fn render(&self, ctx: &MenuContext, options: &MenuOptions) -> CreateEmbed;

    async fn on_trigger(
        &mut self,
        action: Self::Action,
        event: &ReactionEvent,
        session: &mut MenuSession<'_>,
    ) -> MenuResult<MenuFlow>;

    fn take_result(&mut self) -> Option<Self::Output>;
}

pub struct MenuSession<'a> {
    ctx: &'a MenuContext,
    options: &'a MenuOptions,
    channel_id: ChannelId,
    sent: &'a mut Vec<MessageHandle>,
}

impl MenuSession<'_> {
    pub fn context(&self) -> &MenuContext {
        self.ctx
    }

    pub fn options(&self) -> &MenuOptions {
        self.options
    }

    pub fn channel_id(&self) -> ChannelId {
        self.channel_id
    }

    pub fn message(&self) -> Option<MessageHandle> {
        self.sent.last().copied()
    }

    pub async fn edit(&mut self, embed: CreateEmbed) -> MenuResult<()> {
        let Some(message) = self.message() else {
            return Ok(());
        };
        self.ctx.host.edit(message, embed).await
    }

    /// Forgets the live message before deleting it, so it is never deleted twice.
    pub async fn delete_message(&mut self) -> MenuResult<()> {
        let Some(message) = self.sent.pop() else {
            return Ok(());
        };
        self.ctx
            .host
            .delete_messages(message.channel_id, &[message.message_id])
            .await
    }

    /// Best effort: the bot may lack Manage Messages or be in a DM.
    pub async fn clear_reaction(&self, event: &ReactionEvent) {
        let Some(message) = self.message() else {
            return;
        };
        if let Err(e) = self
            .ctx
            .host
            .remove_reaction(message, &event.emoji, event.user_id)
            .await
        {
            hey!("Could not remove reaction {}: {}", event.emoji, e);
        }
    }
}

pub struct ReactionMenu<M: MenuBehaviour> {
    behaviour: M,
    options: MenuOptions,
    triggers: TriggerTable<M::Action>,
    state: MenuState,
    ctx: Option<MenuContext>,
    channel_id: Option<ChannelId>,
    sent: Vec<MessageHandle>,
    events: Option<ReactionStream>,
}

impl<M: MenuBehaviour> ReactionMenu<M> {
    pub fn new(behaviour: M, options: MenuOptions) -> MenuResult<Self> {
        let triggers = TriggerTable::new(behaviour.triggers())?;
        Ok(Self {
            behaviour,
            options,
            triggers,
            state: MenuState::Created,
            ctx: None,
            channel_id: None,
            sent: Vec::new(),
            events: None,
        })
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    pub fn behaviour(&self) -> &M {
        &self.behaviour
    }

    pub fn message(&self) -> Option<MessageHandle> {
        self.sent.last().copied()
    }

    pub fn take_result(&mut self) -> Option<M::Output> {
        self.behaviour.take_result()
    }

    /// Returns once the menu is live. Follow with [`wait`](Self::wait).
    pub async fn start(&mut self, ctx: &MenuContext, channel_id: ChannelId) -> MenuResult<()> {
        if self.state != MenuState::Created {
            return Err(MenuError::config("a menu can only be started once"));
        }
        self.ctx = Some(ctx.clone());
        self.channel_id = Some(channel_id);

        if let Err(e) = self.open().await {
            self.abort().await;
            return Err(e);
        }
        self.state = MenuState::Started;
        Ok(())
    }

    pub async fn wait(&mut self) -> MenuResult<()> {
        while self.state.is_live() {
            let Some(events) = self.events.as_mut() else {
                break;
            };

            let next = match self.options.timeout {
                Some(limit) => tokio::time::timeout(limit, events.next())
                    .await
                    .unwrap_or(None),
                None => events.next().await,
            };

            // timed out, or the event source closed; either way nothing was picked
            let Some(event) = next else {
                return self.stop().await;
            };

            if let Err(e) = self.dispatch(event).await {
                self.abort().await;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Stopping a stopped menu does nothing.
    pub async fn stop(&mut self) -> MenuResult<()> {
        if self.state == MenuState::Stopped {
            return Ok(());
        }
        self.state = MenuState::Stopped;
        self.events = None;

        if !self.options.delete_message_after || self.sent.is_empty() {
            return Ok(());
        }
        let Some(ctx) = self.ctx.as_ref() else {
            return Ok(());
        };
        let sent = std::mem::take(&mut self.sent);
        delete_leftovers(ctx.host.as_ref(), &sent).await
    }

    pub async fn run(
        mut self,
        ctx: &MenuContext,
        channel_id: ChannelId,
    ) -> MenuResult<Option<M::Output>> {
        self.start(ctx, channel_id).await?;
        self.wait().await?;
        Ok(self.behaviour.take_result())
    }

    /// Runs the menu in the background. The handle yields the finished menu.
    pub fn spawn(self, ctx: MenuContext, channel_id: ChannelId) -> JoinHandle<MenuResult<Self>>
    where
        M: 'static,
        M::Action: 'static,
    {
        tokio::spawn(async move {
            let mut menu = self;
            menu.start(&ctx, channel_id).await?;
            menu.wait().await?;
            Ok(menu)
        })
    }

    async fn open(&mut self) -> MenuResult<()> {
        let (Some(ctx), Some(channel_id)) = (self.ctx.as_ref(), self.channel_id) else {
            return Err(MenuError::config("menu has not been started"));
        };
        let host = Arc::clone(&ctx.host);

        let embed = self.behaviour.render(ctx, &self.options);
        let message = host.send(channel_id, embed).await?;
        self.sent.push(message);

        self.events = Some(host.subscribe(ReactionFilter {
            message_id: message.message_id,
            symbols: self.triggers.symbols().map(str::to_string).collect(),
            bot_id: host.bot_id(),
            author_id: (!self.options.public).then_some(ctx.invoker.id),
        }));

        for symbol in self.triggers.symbols() {
            host.add_reaction(message, symbol).await?;
        }
        Ok(())
    }

    async fn dispatch(&mut self, event: ReactionEvent) -> MenuResult<()> {
        let Some(action) = self.triggers.find(&event.emoji).map(|t| t.action.clone()) else {
            return Ok(());
        };
        let (Some(ctx), Some(channel_id)) = (self.ctx.as_ref(), self.channel_id) else {
            return Ok(());
        };
        self.state = MenuState::Running;

        let mut session = MenuSession {
            ctx,
            options: &self.options,
            channel_id,
            sent: &mut self.sent,
        };
        let flow = self.behaviour.on_trigger(action, &event, &mut session).await?;
        match flow {
            MenuFlow::Continue => Ok(()),
            MenuFlow::Stop => self.stop().await,
            MenuFlow::Reopen => {
                self.events = None;
                self.open().await
            }
        }
    }

    async fn abort(&mut self) {
        if let Err(e) = self.stop().await {
            nay!("Failed to clean up a menu after an error: {}", e);
        }
    }
}

/// Bulk deletes up to 100 messages per channel, purges history past that.
pub async fn delete_leftovers(
    host: &dyn MenuHost,
    handles: &[MessageHandle],
) -> MenuResult<()> {
    let mut by_channel: BTreeMap<ChannelId, Vec<MessageId>> = BTreeMap::new();
    for handle in handles {
        by_channel
            .entry(handle.channel_id)
            .or_default()
            .push(handle.message_id);
    }

    for (channel_id, ids) in by_channel {
        if ids.len() <= BULK_DELETE_LIMIT {
            host.delete_messages(channel_id, &ids).await?;
            continue;
        }

        let Some(oldest) = ids.iter().min().copied() else {
            continue;
        };
        let after = MessageId::new(oldest.get().saturating_sub(1).max(1));
        let wanted: HashSet<MessageId> = ids.into_iter().collect();
        host.delete_messages_matching(channel_id, after, &|id: MessageId| wanted.contains(&id))
            .await?;
    }
    Ok(())
}
