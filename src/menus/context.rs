use std::sync::Arc;

use serenity::all::{ChannelId, CommandInteraction, Timestamp, User, UserId};
use tokio::sync::broadcast;

use crate::host::MenuHost;
use crate::menus::colour::ColourEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuNotification {
    ColourPicked(ColourEntry),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invoker {
    pub id: UserId,
    pub name: String,
    pub avatar_url: Option<String>,
}

impl From<&User> for Invoker {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar_url: user.avatar_url(),
        }
    }
}

/// Everything a menu needs to know about the command that opened it.
#[derive(Clone)]
pub struct MenuContext {
    pub host: Arc<dyn MenuHost>,
    pub invoker: Invoker,
    pub channel_id: ChannelId,
    pub invoked_at: Timestamp,
    notifications: broadcast::Sender<MenuNotification>,
}

impl MenuContext {
    pub fn new(
        host: Arc<dyn MenuHost>,
        invoker: Invoker,
        channel_id: ChannelId,
        notifications: broadcast::Sender<MenuNotification>,
    ) -> Self {
        Self {
            host,
            invoker,
            channel_id,
            invoked_at: Timestamp::now(),
            notifications,
        }
    }

    pub fn from_command(
        host: Arc<dyn MenuHost>,
        command: &CommandInteraction,
        notifications: broadcast::Sender<MenuNotification>,
    ) -> Self {
        let mut ctx = Self::new(
            host,
            Invoker::from(&command.user),
            command.channel_id,
            notifications,
        );
        ctx.invoked_at = command.id.created_at();
        ctx
    }

    pub fn subscribe_notifications(&self) -> broadcast::Receiver<MenuNotification> {
        self.notifications.subscribe()
    }

    pub(crate) fn notify(&self, notification: MenuNotification) {
        let _ = self.notifications.send(notification);
    }
}
