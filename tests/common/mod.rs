//! A scripted, in-memory chat service for driving whole menus.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use reaction_menus::host::{
    MenuHost, MessageHandle, MessagePredicate, ReactionEvent, ReactionFilter, ReactionStream,
};
use reaction_menus::menus::{Invoker, MenuContext, MenuNotification};
use reaction_menus::{MenuError, MenuResult};
use serenity::all::{ChannelId, CreateEmbed, MessageId, UserId};
use serenity::async_trait;
use serenity::futures::StreamExt;
use serde_json::Value;
use tokio::sync::broadcast;

pub const BOT: UserId = UserId::new(1);
pub const INVOKER: UserId = UserId::new(42);
pub const STRANGER: UserId = UserId::new(99);
pub const CHANNEL: ChannelId = ChannelId::new(500);

/// Something the menu did to the chat service.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Send { message: MessageHandle, embed: Value },
    Edit { message: MessageHandle, embed: Value },
    React { message: MessageHandle, symbol: String },
    Unreact { message: MessageHandle, symbol: String, user: UserId },
    Delete { channel: ChannelId, messages: Vec<MessageId> },
    Purge { channel: ChannelId, deleted: usize },
}

/// One scripted step, consumed by whichever menu is listening at the time.
#[derive(Debug, Clone)]
pub enum Step {
    Click { user: UserId, emoji: String, bot: bool },
    /// Let (virtual) time pass before the next step.
    Pause(Duration),
}

pub fn click(emoji: &str) -> Step {
    Step::Click {
        user: INVOKER,
        emoji: emoji.to_string(),
        bot: false,
    }
}

pub fn click_by(user: UserId, emoji: &str) -> Step {
    Step::Click {
        user,
        emoji: emoji.to_string(),
        bot: false,
    }
}

pub fn bot_click(emoji: &str) -> Step {
    Step::Click {
        user: UserId::new(77),
        emoji: emoji.to_string(),
        bot: true,
    }
}

#[derive(Default)]
pub struct MockHost {
    next_id: AtomicU64,
    calls: Mutex<Vec<Call>>,
    script: Arc<Mutex<VecDeque<Step>>>,
    /// Channel history available to purges, oldest first.
    history: Mutex<Vec<MessageId>>,
    pub fail_reactions: AtomicBool,
}

impl MockHost {
    pub fn scripted(steps: impl IntoIterator<Item = Step>) -> Arc<Self> {
        let host = Self::default();
        host.next_id.store(1000, Ordering::SeqCst);
        host.script.lock().unwrap().extend(steps);
        Arc::new(host)
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<(MessageHandle, Value)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Send { message, embed } => Some((message, embed)),
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<Value> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Edit { embed, .. } => Some(embed),
                _ => None,
            })
            .collect()
    }

    /// Every message id that was deleted, in order, however it was deleted.
    pub fn deleted(&self) -> Vec<MessageId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Delete { messages, .. } => Some(messages),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub fn reactions_on(&self, message: MessageHandle) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::React { message: m, symbol } if m == message => Some(symbol),
                _ => None,
            })
            .collect()
    }

    pub fn remaining_steps(&self) -> usize {
        self.script.lock().unwrap().len()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

pub fn description(embed: &Value) -> &str {
    embed["description"].as_str().unwrap_or_default()
}

pub fn title(embed: &Value) -> &str {
    embed["title"].as_str().unwrap_or_default()
}

#[async_trait]
impl MenuHost for MockHost {
    fn bot_id(&self) -> UserId {
        BOT
    }

    async fn send(&self, channel_id: ChannelId, embed: CreateEmbed) -> MenuResult<MessageHandle> {
        let message_id = MessageId::new(self.next_id.fetch_add(1, Ordering::SeqCst));
        let message = MessageHandle {
            channel_id,
            message_id,
        };
        self.history.lock().unwrap().push(message_id);
        self.record(Call::Send {
            message,
            embed: serde_json::to_value(&embed).unwrap(),
        });
        Ok(message)
    }

    async fn edit(&self, message: MessageHandle, embed: CreateEmbed) -> MenuResult<()> {
        self.record(Call::Edit {
            message,
            embed: serde_json::to_value(&embed).unwrap(),
        });
        Ok(())
    }

    async fn add_reaction(&self, message: MessageHandle, symbol: &str) -> MenuResult<()> {
        if self.fail_reactions.load(Ordering::SeqCst) {
            return Err(MenuError::Network(serenity::Error::Other(
                "missing Add Reactions permission",
            )));
        }
        self.record(Call::React {
            message,
            symbol: symbol.to_string(),
        });
        Ok(())
    }

    async fn remove_reaction(
        &self,
        message: MessageHandle,
        symbol: &str,
        user_id: UserId,
    ) -> MenuResult<()> {
        self.record(Call::Unreact {
            message,
            symbol: symbol.to_string(),
            user: user_id,
        });
        Ok(())
    }

    async fn delete_messages(
        &self,
        channel_id: ChannelId,
        messages: &[MessageId],
    ) -> MenuResult<()> {
        self.history
            .lock()
            .unwrap()
            .retain(|id| !messages.contains(id));
        self.record(Call::Delete {
            channel: channel_id,
            messages: messages.to_vec(),
        });
        Ok(())
    }

    async fn delete_messages_matching(
        &self,
        channel_id: ChannelId,
        after: MessageId,
        predicate: MessagePredicate<'_>,
    ) -> MenuResult<usize> {
        let doomed: Vec<MessageId> = self
            .history
            .lock()
            .unwrap()
            .iter()
            .copied()
            .filter(|id| *id > after && predicate(*id))
            .collect();
        self.history
            .lock()
            .unwrap()
            .retain(|id| !doomed.contains(id));
        self.record(Call::Purge {
            channel: channel_id,
            deleted: doomed.len(),
        });
        Ok(doomed.len())
    }

    fn subscribe(&self, filter: ReactionFilter) -> ReactionStream {
        let script = Arc::clone(&self.script);
        serenity::futures::stream::unfold((script, filter), |(script, filter)| async move {
            loop {
                let step = script.lock().unwrap().pop_front();
                match step {
                    Some(Step::Pause(duration)) => tokio::time::sleep(duration).await,
                    Some(Step::Click { user, emoji, bot }) => {
                        let event = ReactionEvent {
                            channel_id: CHANNEL,
                            message_id: filter.message_id,
                            user_id: user,
                            user_is_bot: bot,
                            emoji,
                        };
                        if filter.matches(&event) {
                            return Some((event, (script, filter)));
                        }
                    }
                    None => std::future::pending::<()>().await,
                }
            }
        })
        .boxed()
    }
}

pub struct Harness {
    pub host: Arc<MockHost>,
    pub ctx: MenuContext,
    pub notifications: broadcast::Receiver<MenuNotification>,
}

pub fn harness(steps: impl IntoIterator<Item = Step>) -> Harness {
    let host = MockHost::scripted(steps);
    let (tx, notifications) = broadcast::channel(8);
    let invoker = Invoker {
        id: INVOKER,
        name: "tester".to_string(),
        avatar_url: None,
    };
    let ctx = MenuContext::new(host.clone(), invoker, CHANNEL, tx);
    Harness {
        host,
        ctx,
        notifications,
    }
}
