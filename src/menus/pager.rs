use std::fmt;

use serenity::all::{ChannelId, CreateEmbed};
use serenity::async_trait;

use crate::error::{MenuError, MenuResult};
use crate::host::ReactionEvent;
use crate::menus::context::MenuContext;
use crate::menus::engine::{MenuBehaviour, MenuFlow, MenuOptions, MenuSession, ReactionMenu};
use crate::menus::selector::{OptionSelector, MAX_OPTIONS};
use crate::menus::trigger::Trigger;

pub const PREVIOUS: &str = "\u{25c0}\u{fe0f}";
pub const STOP: &str = "\u{23f9}\u{fe0f}";
pub const NEXT: &str = "\u{25b6}\u{fe0f}";
pub const JUMP: &str = "#\u{fe0f}\u{20e3}";

pub trait PageRenderer: Send + Sync {
    fn page_count(&self) -> usize;

    fn render_page(&self, index: usize, options: &MenuOptions) -> CreateEmbed;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerAction {
    Previous,
    Stop,
    Next,
    Jump,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageChoice {
    pub index: usize,
}

impl fmt::Display for PageChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Page {}", self.index + 1)
    }
}

/// The pages the jump menu offers: at most eleven, as centred on `cursor` as the ends allow.
pub fn jump_window(cursor: usize, page_count: usize) -> std::ops::Range<usize> {
    let size = page_count.min(MAX_OPTIONS);
    let start = cursor
        .saturating_sub(MAX_OPTIONS / 2)
        .min(page_count - size);
    start..start + size
}

pub struct ScrollablePager<P> {
    pages: P,
    cursor: usize,
    jump: bool,
    options: MenuOptions,
}

impl<P: PageRenderer> ScrollablePager<P> {
    pub fn new(pages: P) -> MenuResult<Self> {
        if pages.page_count() == 0 {
            return Err(MenuError::config("a pager needs at least one page"));
        }
        Ok(Self {
            pages,
            cursor: 0,
            jump: true,
            options: MenuOptions::default(),
        })
    }

    /// Offer #️⃣ to jump straight to a page. On by default.
    pub fn with_jump(mut self, jump: bool) -> Self {
        self.jump = jump;
        self
    }

    pub fn with_options(mut self, options: MenuOptions) -> Self {
        self.options = options;
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn pages(&self) -> &P {
        &self.pages
    }

    fn last_page(&self) -> usize {
        self.pages.page_count().saturating_sub(1)
    }

    /// Moves the cursor by `delta` pages, never past either end. Returns whether it moved.
    pub fn step(&mut self, delta: isize) -> bool {
        let target = if delta.is_negative() {
            self.cursor.saturating_sub(delta.unsigned_abs())
        } else {
            self.cursor.saturating_add(delta.unsigned_abs())
        };
        self.seek(target)
    }

    /// Clamped like [`step`](Self::step).
    pub fn seek(&mut self, index: usize) -> bool {
        let target = index.min(self.last_page());
        let moved = target != self.cursor;
        self.cursor = target;
        moved
    }

    pub fn into_menu(mut self) -> MenuResult<ReactionMenu<Self>> {
        let options = std::mem::take(&mut self.options);
        ReactionMenu::new(self, options)
    }

    pub async fn result(self, ctx: &MenuContext) -> MenuResult<()> {
        self.result_in(ctx, ctx.channel_id).await
    }

    pub async fn result_in(self, ctx: &MenuContext, channel_id: ChannelId) -> MenuResult<()> {
        self.into_menu()?.run(ctx, channel_id).await?;
        Ok(())
    }

    /// Replaces the pager with a numbered menu of pages and waits for a pick.
    async fn ask_for_page(&self, session: &mut MenuSession<'_>) -> MenuResult<Option<usize>> {
        session.delete_message().await?;

        let choices = jump_window(self.cursor, self.pages.page_count())
            .map(|index| PageChoice { index })
            .collect();
        let options = MenuOptions {
            title: Some("Jump to which page?".to_string()),
            colour: session.options().colour,
            timestamp: None,
            delete_message_after: true,
            timeout: session.options().timeout,
            public: session.options().public,
        };
        let picked = OptionSelector::new(choices)?
            .with_options(options)
            .result_in(session.context(), session.channel_id())
            .await?;
        Ok(picked.map(|choice| choice.index))
    }
}

#[async_trait]
impl<P: PageRenderer> MenuBehaviour for ScrollablePager<P> {
    type Action = PagerAction;
    type Output = ();

    fn triggers(&self) -> Vec<Trigger<PagerAction>> {
        let mut triggers = vec![
            Trigger::new(PREVIOUS, PagerAction::Previous).at(0),
            Trigger::new(STOP, PagerAction::Stop).at(1),
            Trigger::new(NEXT, PagerAction::Next).at(2),
        ];
        if self.jump && self.pages.page_count() > 1 {
            triggers.push(Trigger::new(JUMP, PagerAction::Jump).at(3));
        }
        triggers
    }

    fn render(&self, _ctx: &MenuContext, options: &MenuOptions) -> CreateEmbed {
        self.pages.render_page(self.cursor, options)
    }

    async fn on_trigger(
        &mut self,
        action: PagerAction,
        event: &ReactionEvent,
        session: &mut MenuSession<'_>,
    ) -> MenuResult<MenuFlow> {
        match action {
            PagerAction::Previous | PagerAction::Next => {
                let delta = if action == PagerAction::Previous { -1 } else { 1 };
                if self.step(delta) {
                    let page = self.pages.render_page(self.cursor, session.options());
                    session.edit(page).await?;
                }
                session.clear_reaction(event).await;
                Ok(MenuFlow::Continue)
            }
            PagerAction::Stop => {
                session.delete_message().await?;
                Ok(MenuFlow::Stop)
            }
            PagerAction::Jump => match self.ask_for_page(session).await? {
                Some(index) => {
                    self.seek(index);
                    Ok(MenuFlow::Reopen)
                }
                None => Ok(MenuFlow::Stop),
            },
        }
    }

    fn take_result(&mut self) -> Option<()> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Numbered(usize);

    impl PageRenderer for Numbered {
        fn page_count(&self) -> usize {
            self.0
        }

        fn render_page(&self, index: usize, _options: &MenuOptions) -> CreateEmbed {
            CreateEmbed::new().description(index.to_string())
        }
    }

    #[test]
    fn cursor_never_leaves_the_pages() {
        let mut pager = ScrollablePager::new(Numbered(3)).unwrap();
        for _ in 0..4 {
            pager.step(1);
            assert!(pager.cursor() <= 2);
        }
        assert_eq!(pager.cursor(), 2);
        assert!(!pager.step(1));

        for _ in 0..4 {
            pager.step(-1);
        }
        assert_eq!(pager.cursor(), 0);
        assert!(!pager.step(-1));
    }

    #[test]
    fn large_steps_clamp_in_one_go() {
        let mut pager = ScrollablePager::new(Numbered(5)).unwrap();
        assert!(pager.step(isize::MAX));
        assert_eq!(pager.cursor(), 4);
        assert!(pager.step(isize::MIN));
        assert_eq!(pager.cursor(), 0);
    }

    #[test]
    fn empty_page_lists_are_rejected() {
        assert!(matches!(
            ScrollablePager::new(Numbered(0)),
            Err(MenuError::Configuration(_))
        ));
    }

    #[test]
    fn jump_window_stays_inside_the_pages() {
        assert_eq!(jump_window(0, 5), 0..5);
        assert_eq!(jump_window(0, 30), 0..11);
        assert_eq!(jump_window(15, 30), 10..21);
        assert_eq!(jump_window(29, 30), 19..30);
    }

    #[test]
    fn single_page_pagers_have_no_jump() {
        let pager = ScrollablePager::new(Numbered(1)).unwrap();
        assert!(pager.triggers().iter().all(|t| t.symbol != JUMP));
    }
}
