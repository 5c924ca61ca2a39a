use std::time::Duration;

use serenity::all::{ChannelId, Colour, CreateEmbed};

use crate::error::{MenuError, MenuResult};
use crate::host::MessageHandle;
use crate::menus::context::MenuContext;
use crate::menus::engine::MenuOptions;
use crate::menus::pager::PageRenderer;
use crate::menus::EMBED_DESCRIPTION_LIMIT;

/// Builds pages line by line, starting a new page whenever the next line would not fit.
#[derive(Debug, Clone)]
pub struct EmbedPaginator {
    title: String,
    prefix: String,
    suffix: String,
    max_size: usize,
    current: String,
    /// Newlines owed before the next line on the open page.
    breaks: usize,
    pages: Vec<String>,
}

impl Default for EmbedPaginator {
    fn default() -> Self {
        Self {
            title: String::new(),
            prefix: String::new(),
            suffix: String::new(),
            max_size: EMBED_DESCRIPTION_LIMIT,
            current: String::new(),
            breaks: 0,
            pages: Vec::new(),
        }
    }
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

impl EmbedPaginator {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size.clamp(1, EMBED_DESCRIPTION_LIMIT);
        self
    }

    /// Text wrapped around every page, such as a code fence.
    pub fn with_wrapping(mut self, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self.suffix = suffix.into();
        self
    }

    /// Cuts `text` into pages of at most `max_size` characters each.
    pub fn from_text(
        title: impl Into<String>,
        text: &str,
        max_size: usize,
    ) -> MenuResult<Self> {
        let mut paginator = Self::new(title).with_max_size(max_size);
        let mut rest = text;
        while !rest.is_empty() {
            let split_at = rest
                .char_indices()
                .nth(paginator.max_size)
                .map_or(rest.len(), |(i, _)| i);
            let (chunk, tail) = rest.split_at(split_at);
            paginator.add_page(chunk)?;
            rest = tail;
        }
        Ok(paginator)
    }

    fn room(&self) -> usize {
        self.max_size
            .saturating_sub(char_len(&self.prefix) + char_len(&self.suffix))
    }

    /// Appends a line, followed by a blank one when `empty` is set.
    pub fn add_line(&mut self, line: &str, empty: bool) -> MenuResult<()> {
        let len = char_len(line);
        if len > self.room() {
            return Err(MenuError::config(format!(
                "a line of {} characters does not fit in a page of {}",
                len, self.max_size
            )));
        }
        let used = char_len(&self.current) + self.breaks;
        if !self.current.is_empty() && used + len > self.room() {
            self.close_page();
        }
        if !self.current.is_empty() {
            self.current.extend(std::iter::repeat('\n').take(self.breaks));
        }
        self.current.push_str(line);
        self.breaks = if empty { 2 } else { 1 };
        Ok(())
    }

    /// Puts `text` on a page of its own, exactly as given. Empty text adds nothing.
    pub fn add_page(&mut self, text: &str) -> MenuResult<()> {
        if char_len(text) > self.room() {
            return Err(MenuError::config(format!(
                "a page of {} characters does not fit in {}",
                char_len(text),
                self.max_size
            )));
        }
        self.close_page();
        if !text.is_empty() {
            self.pages.push(self.wrap(text));
        }
        Ok(())
    }

    pub fn close_page(&mut self) {
        self.breaks = 0;
        if self.current.is_empty() {
            return;
        }
        let body = std::mem::take(&mut self.current);
        let page = self.wrap(&body);
        self.pages.push(page);
    }

    fn wrap(&self, body: &str) -> String {
        format!("{}{}{}", self.prefix, body, self.suffix)
    }

    /// Includes the open page.
    pub fn pages(&self) -> Vec<String> {
        let mut pages = self.pages.clone();
        if !self.current.is_empty() {
            pages.push(self.wrap(&self.current));
        }
        pages
    }

    pub fn finish(mut self) -> TextPages {
        self.close_page();
        TextPages {
            title: self.title,
            pages: self.pages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextPages {
    pub title: String,
    pub pages: Vec<String>,
}

impl TextPages {
    pub async fn send(
        &self,
        ctx: &MenuContext,
        channel_id: ChannelId,
        options: &MenuOptions,
        pacing: Pacing,
    ) -> MenuResult<Vec<MessageHandle>> {
        let mut sent = Vec::with_capacity(self.pages.len());
        for index in 0..self.pages.len() {
            if index > 0 && !pacing.between_sends.is_zero() {
                tokio::time::sleep(pacing.between_sends).await;
            }
            let handle = ctx
                .host
                .send(channel_id, self.render_page(index, options))
                .await?;
            sent.push(handle);
        }
        Ok(sent)
    }
}

impl PageRenderer for TextPages {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn render_page(&self, index: usize, options: &MenuOptions) -> CreateEmbed {
        let title = options.title.clone().unwrap_or_else(|| self.title.clone());
        let title = if self.pages.len() > 1 {
            format!("{} ({}/{})", title, index + 1, self.pages.len())
        } else {
            title
        };
        let mut embed = CreateEmbed::new()
            .title(title)
            .description(self.pages.get(index).cloned().unwrap_or_default())
            .colour(options.colour.unwrap_or(Colour::GOLD));
        if let Some(timestamp) = options.timestamp {
            embed = embed.timestamp(timestamp);
        }
        embed
    }
}

/// How long to wait between consecutive sends, to stay clear of rate limits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pacing {
    pub between_sends: Duration,
}

impl Pacing {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn every(between_sends: Duration) -> Self {
        Self { between_sends }
    }

    pub fn slow() -> Self {
        Self::every(Duration::from_secs(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lines_spill_onto_a_new_page_when_full() {
        let mut paginator = EmbedPaginator::new("log").with_max_size(10);
        paginator.add_line("aaaa", false).unwrap();
        paginator.add_line("bbbb", false).unwrap();
        paginator.add_line("cccc", false).unwrap();
        assert_eq!(paginator.pages(), ["aaaa\nbbbb", "cccc"]);
    }

    #[test]
    fn empty_flag_adds_a_blank_line() {
        let mut paginator = EmbedPaginator::new("log");
        paginator.add_line("one", true).unwrap();
        paginator.add_line("two", false).unwrap();
        assert_eq!(paginator.pages(), ["one\n\ntwo"]);
    }

    #[test]
    fn wrapping_counts_against_the_page_size() {
        let mut paginator = EmbedPaginator::new("code").with_max_size(12).with_wrapping("```", "```");
        paginator.add_line("abc", false).unwrap();
        paginator.add_line("def", false).unwrap();
        assert_eq!(paginator.pages(), ["```abc```", "```def```"]);
        assert!(matches!(
            paginator.add_line("far too long", false),
            Err(MenuError::Configuration(_))
        ));
    }

    #[test]
    fn from_text_splits_on_characters() {
        let text = "é".repeat(25);
        let pages = EmbedPaginator::from_text("t", &text, 10).unwrap().finish();
        let sizes: Vec<usize> = pages.pages.iter().map(|p| p.chars().count()).collect();
        assert_eq!(sizes, [10, 10, 5]);
    }

    #[test]
    fn from_text_keeps_every_character_and_makes_no_blank_pages() {
        for (text, size) in [("ab\n\ncd\n", 3), ("\n\n\n\n\nx", 2), ("line\n\n\n", 4)] {
            let pages = EmbedPaginator::from_text("t", text, size).unwrap().finish().pages;
            assert_eq!(pages.concat(), text, "{text:?} in pages of {size}");
            assert!(pages.iter().all(|p| !p.is_empty()), "{pages:?}");
            assert!(pages.iter().all(|p| p.chars().count() <= size), "{pages:?}");
        }
    }

    #[test]
    fn empty_text_has_no_pages() {
        let paginator = EmbedPaginator::from_text("t", "", 10).unwrap();
        assert!(paginator.pages().is_empty());
        assert!(paginator.finish().pages.is_empty());
    }

    #[test]
    fn page_titles_carry_their_position() {
        let pages = TextPages {
            title: "Chapter".to_string(),
            pages: vec!["a".to_string(), "b".to_string()],
        };
        let embed = serde_json::to_value(pages.render_page(1, &MenuOptions::default())).unwrap();
        assert_eq!(embed["title"], "Chapter (2/2)");
        assert_eq!(embed["description"], "b");
    }

    #[test]
    fn slow_pacing_is_one_second() {
        assert_eq!(Pacing::slow().between_sends, Duration::from_secs(1));
        assert!(Pacing::none().between_sends.is_zero());
    }
}
