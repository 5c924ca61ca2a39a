use std::sync::Arc;

use serenity::all::{
    ChannelId, Context, CreateEmbed, CreateMessage, EditMessage, GetMessages, Http, MessageId,
    ReactionCollector, ReactionType, ShardMessenger, UserId,
};
use serenity::async_trait;
use serenity::futures::StreamExt;

use crate::error::{MenuError, MenuResult};
use crate::host::{
    MenuHost, MessageHandle, MessagePredicate, ReactionEvent, ReactionFilter, ReactionStream,
};
use crate::menus::engine::BULK_DELETE_LIMIT;

/// [`MenuHost`] backed by a live serenity client.
#[derive(Clone)]
pub struct SerenityHost {
    http: Arc<Http>,
    shard: ShardMessenger,
    bot_id: UserId,
}

impl SerenityHost {
    pub fn new(ctx: &Context) -> Self {
        Self {
            http: Arc::clone(&ctx.http),
            shard: ctx.shard.clone(),
            bot_id: ctx.cache.current_user().id,
        }
    }
}

fn reaction_type(symbol: &str) -> MenuResult<ReactionType> {
    ReactionType::try_from(symbol)
        .map_err(|_| MenuError::config(format!("{symbol:?} is not a usable reaction")))
}

#[async_trait]
impl MenuHost for SerenityHost {
    fn bot_id(&self) -> UserId {
        self.bot_id
    }

    async fn send(&self, channel_id: ChannelId, embed: CreateEmbed) -> MenuResult<MessageHandle> {
        let msg = channel_id
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await?;
        Ok(MessageHandle {
            channel_id,
            message_id: msg.id,
        })
    }

    async fn edit(&self, message: MessageHandle, embed: CreateEmbed) -> MenuResult<()> {
        message
            .channel_id
            .edit_message(&self.http, message.message_id, EditMessage::new().embed(embed))
            .await?;
        Ok(())
    }

    async fn add_reaction(&self, message: MessageHandle, symbol: &str) -> MenuResult<()> {
        let reaction = reaction_type(symbol)?;
        message
            .channel_id
            .create_reaction(&self.http, message.message_id, reaction)
            .await?;
        Ok(())
    }

    async fn remove_reaction(
        &self,
        message: MessageHandle,
        symbol: &str,
        user_id: UserId,
    ) -> MenuResult<()> {
        let reaction = reaction_type(symbol)?;
        message
            .channel_id
            .delete_reaction(&self.http, message.message_id, Some(user_id), reaction)
            .await?;
        Ok(())
    }

    async fn delete_messages(
        &self,
        channel_id: ChannelId,
        messages: &[MessageId],
    ) -> MenuResult<()> {
        if messages.is_empty() {
            return Ok(());
        }
        channel_id
            .delete_messages(&self.http, messages.iter().copied())
            .await?;
        Ok(())
    }

    async fn delete_messages_matching(
        &self,
        channel_id: ChannelId,
        after: MessageId,
        predicate: MessagePredicate<'_>,
    ) -> MenuResult<usize> {
        let mut cursor = after;
        let mut deleted = 0;
        loop {
            let batch = channel_id
                .messages(&self.http, GetMessages::new().after(cursor).limit(100))
                .await?;
            let Some(newest) = batch.iter().map(|m| m.id).max() else {
                break;
            };
            cursor = newest;

            let doomed: Vec<MessageId> = batch
                .iter()
                .map(|m| m.id)
                .filter(|id| predicate(*id))
                .collect();
            for chunk in doomed.chunks(BULK_DELETE_LIMIT) {
                channel_id
                    .delete_messages(&self.http, chunk.iter().copied())
                    .await?;
                deleted += chunk.len();
            }

            if batch.len() < 100 {
                break;
            }
        }
        Ok(deleted)
    }

    fn subscribe(&self, filter: ReactionFilter) -> ReactionStream {
        let message_id = filter.message_id;
        ReactionCollector::new(&self.shard)
            .message_id(message_id)
            .stream()
            .filter_map(move |reaction| {
                let event = ReactionEvent::from_reaction(&reaction).filter(|e| filter.matches(e));
                async move { event }
            })
            .boxed()
    }
}
