pub mod colour;
pub mod confirm;
pub mod context;
pub mod engine;
pub mod pager;
pub mod selector;
pub mod trigger;

pub use colour::{ColorSelector, ColourEntry, ColourSelector, Palette, PickedColour};
pub use confirm::Confirm;
pub use context::{Invoker, MenuContext, MenuNotification};
pub use engine::{
    MenuBehaviour, MenuFlow, MenuOptions, MenuSession, MenuState, ReactionMenu, DEFAULT_TIMEOUT,
};
pub use pager::{PageRenderer, ScrollablePager};
pub use selector::{NumericSelector, OptionSelector};
pub use trigger::Trigger;

pub const EMBED_DESCRIPTION_LIMIT: usize = 2048;

pub(crate) fn truncate_chars(text: String, limit: usize) -> String {
    match text.char_indices().nth(limit) {
        Some((end, _)) => text[..end].to_string(),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::truncate_chars;

    #[test]
    fn truncation_counts_characters_not_bytes() {
        assert_eq!(truncate_chars("héllo".to_string(), 2), "hé");
        assert_eq!(truncate_chars("hi".to_string(), 5), "hi");
    }
}
