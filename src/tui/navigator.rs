use log::{debug, info};
use std::sync::Arc;

use crate::stack::{Gate, LevelHandle, LevelIdGenerator, PopOutcome, PushOutcome};
use crate::tui::view::{LinkStyle, Page, PageStack, with_pusher};

/// A page on screen plus the handle it hosts (if it has a pusher)
struct Frame {
    page: Arc<Page>,
    handle: Option<LevelHandle>,
}

impl Frame {
    fn new(page: Arc<Page>, ids: &LevelIdGenerator) -> Self {
        let handle = page
            .pusher()
            .map(|pusher| LevelHandle::new(ids, pusher.gate().cloned()));
        Self { page, handle }
    }
}

/// Link as seen by the renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView<'a> {
    pub label: &'a str,
    pub style: LinkStyle,
    pub enabled: bool,
    pub focused: bool,
}

/// Root stack view
///
/// Keeps one frame per page in the navigation path. The root page always hosts
/// a pusher; every pushed page that hosts one gets its own handle the first
/// time it is shown. Only the top page is visible and interactive.
pub struct Navigator {
    stack: PageStack,
    frames: Vec<Frame>,
    focused: Option<usize>,
}

impl Navigator {
    pub fn new(stack: PageStack, root: Page) -> Self {
        Self::with_root_gate(stack, root, None)
    }

    /// Root whose pusher only admits pushes that pass `gate`
    ///
    /// A root page that already declares a pusher keeps it.
    pub fn with_root_gate(stack: PageStack, root: Page, gate: Option<Gate>) -> Self {
        let root = if root.pusher().is_some() {
            root
        } else {
            with_pusher(root, gate)
        };

        let ids = stack.id_generator();
        let mut navigator = Self {
            stack,
            frames: vec![Frame::new(Arc::new(root), &ids)],
            focused: None,
        };
        navigator.sync();
        info!("Navigator ready with {} registered levels", navigator.stack.len());
        navigator
    }

    pub fn stack(&self) -> &PageStack {
        &self.stack
    }

    /// Bring the frame path in line with the store
    ///
    /// Walks down from the root: each visible handle is registered, and the page
    /// its level presents becomes the next frame. Frames whose page is no
    /// longer presented are dropped together with their handles.
    pub fn sync(&mut self) {
        let top_before = self.frames.last().map(|frame| Arc::clone(&frame.page));
        let frames = &mut self.frames;

        self.stack.with_mut(|store| {
            let mut depth = 0;
            loop {
                let presented = match frames[depth].handle.as_mut() {
                    Some(handle) => {
                        handle.appear(store);
                        handle.content(store).cloned()
                    }
                    None => None,
                };

                let Some(page) = presented else {
                    frames.truncate(depth + 1);
                    break;
                };

                let same_page = frames
                    .get(depth + 1)
                    .is_some_and(|next| Arc::ptr_eq(&next.page, &page));
                if !same_page {
                    frames.truncate(depth + 1);
                    frames.push(Frame::new(page, &store.id_generator()));
                }
                depth += 1;
            }
        });

        let top_changed = match (&top_before, self.frames.last()) {
            (Some(before), Some(after)) => !Arc::ptr_eq(before, &after.page),
            _ => true,
        };
        if top_changed {
            debug!("Top page changed, depth now {}", self.frames.len());
            self.focused = None;
        }
    }

    fn top_frame(&self) -> &Frame {
        // frames always holds the root
        &self.frames[self.frames.len() - 1]
    }

    /// Page currently on screen
    pub fn top(&self) -> &Page {
        &self.top_frame().page
    }

    /// Number of pages in the navigation path, root included
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn title(&self) -> Option<&str> {
        self.top().title_text()
    }

    pub fn can_go_back(&self) -> bool {
        self.frames.len() > 1
    }

    /// Label of the back affordance: the previous page's title, or "Back"
    pub fn back_label(&self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        let previous = &self.frames[self.frames.len() - 2].page;
        Some(previous.title_text().unwrap_or("Back"))
    }

    /// Title and text nodes of the top page
    pub fn visible_texts(&self) -> Vec<&str> {
        let top = self.top();
        top.title_text().into_iter().chain(top.texts()).collect()
    }

    pub fn is_visible(&self, text: &str) -> bool {
        self.visible_texts().contains(&text)
    }

    pub fn links(&self) -> Vec<LinkView<'_>> {
        self.top()
            .links()
            .enumerate()
            .map(|(index, link)| LinkView {
                label: link.label(),
                style: link.style(),
                enabled: link.is_enabled(&self.stack),
                focused: self.focused == Some(index),
            })
            .collect()
    }

    /// Tap the link labelled `label` on the top page
    ///
    /// Returns None when the top page has no such link.
    pub fn tap(&mut self, label: &str) -> Option<PushOutcome> {
        let link = self.top().find_link(label)?.clone();
        let outcome = link.tap(&self.stack);
        info!("Tapped {:?}: {:?}", label, outcome);
        self.sync();
        Some(outcome)
    }

    /// Navigate back one page
    ///
    /// The frame below the top presented the top page; its handle sees its
    /// indicator close, which pops its level.
    pub fn back(&mut self) -> Option<PopOutcome> {
        if !self.can_go_back() {
            return None;
        }

        let presenter = self.frames.len() - 2;
        let frames = &mut self.frames;
        let outcome = self.stack.with_mut(|store| {
            frames[presenter]
                .handle
                .as_mut()
                .and_then(|handle| handle.close(store))
        });
        info!("Back: {:?}", outcome);
        self.sync();
        outcome
    }

    pub fn focused_label(&self) -> Option<&str> {
        let index = self.focused?;
        self.top().links().nth(index).map(|link| link.label())
    }

    /// Move focus to the next link (wraps around)
    pub fn focus_next(&mut self) {
        let count = self.top().links().count();
        if count == 0 {
            self.focused = None;
            return;
        }
        self.focused = Some(match self.focused {
            Some(index) => (index + 1) % count,
            None => 0,
        });
    }

    /// Move focus to the previous link (wraps around)
    pub fn focus_previous(&mut self) {
        let count = self.top().links().count();
        if count == 0 {
            self.focused = None;
            return;
        }
        self.focused = Some(match self.focused {
            Some(0) | None => count - 1,
            Some(index) => index - 1,
        });
    }

    /// Tap the focused link, if any
    pub fn activate_focused(&mut self) -> Option<PushOutcome> {
        let label = self.focused_label()?.to_string();
        self.tap(&label)
    }
}
