use std::collections::HashSet;

use serenity::all::{ChannelId, CreateEmbed, MessageId, Reaction, UserId};
use serenity::async_trait;
use serenity::futures::stream::BoxStream;

use crate::error::MenuResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReactionEvent {
    pub channel_id: ChannelId,
    pub message_id: MessageId,
    pub user_id: UserId,
    pub user_is_bot: bool,
    pub emoji: String,
}

impl ReactionEvent {
    /// Reactions without a user cannot be attributed and yield `None`.
    pub fn from_reaction(reaction: &Reaction) -> Option<Self> {
        let user_id = reaction.user_id?;
        Some(Self {
            channel_id: reaction.channel_id,
            message_id: reaction.message_id,
            user_id,
            user_is_bot: reaction.member.as_ref().map_or(false, |m| m.user.bot),
            emoji: reaction.emoji.to_string(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct ReactionFilter {
    pub message_id: MessageId,
    pub symbols: HashSet<String>,
    pub bot_id: UserId,
    /// `None` lets anyone interact.
    pub author_id: Option<UserId>,
}

impl ReactionFilter {
    pub fn matches(&self, event: &ReactionEvent) -> bool {
        if event.message_id != self.message_id || !self.symbols.contains(&event.emoji) {
            return false;
        }
        if event.user_is_bot || event.user_id == self.bot_id {
            return false;
        }
        self.author_id.map_or(true, |author| author == event.user_id)
    }
}

/// Dropping the stream unsubscribes.
pub type ReactionStream = BoxStream<'static, ReactionEvent>;

pub type MessagePredicate<'a> = &'a (dyn Fn(MessageId) -> bool + Send + Sync);

#[async_trait]
pub trait MenuHost: Send + Sync {
    fn bot_id(&self) -> UserId;

    async fn send(&self, channel_id: ChannelId, embed: CreateEmbed) -> MenuResult<MessageHandle>;

    async fn edit(&self, message: MessageHandle, embed: CreateEmbed) -> MenuResult<()>;

    async fn add_reaction(&self, message: MessageHandle, symbol: &str) -> MenuResult<()>;

    async fn remove_reaction(
        &self,
        message: MessageHandle,
        symbol: &str,
        user_id: UserId,
    ) -> MenuResult<()>;

    /// Deletes up to 100 messages from one channel in a single request.
    async fn delete_messages(&self, channel_id: ChannelId, messages: &[MessageId])
        -> MenuResult<()>;

    /// Returns how many messages went.
    async fn delete_messages_matching(
        &self,
        channel_id: ChannelId,
        after: MessageId,
        predicate: MessagePredicate<'_>,
    ) -> MenuResult<usize>;

    fn subscribe(&self, filter: ReactionFilter) -> ReactionStream;
}
