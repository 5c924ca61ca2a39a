pub mod logging;

pub mod config;
pub mod discord_helpers;
pub mod error;
pub mod host;
pub mod menus;

pub use error::{MenuError, MenuResult};
pub use host::{MenuHost, MessageHandle, ReactionEvent, ReactionFilter};
pub use menus::{
    ColorSelector, ColourSelector, Confirm, MenuContext, MenuOptions, NumericSelector,
    OptionSelector, ReactionMenu, ScrollablePager,
};
