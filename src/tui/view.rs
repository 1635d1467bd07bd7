use std::fmt;
use std::sync::Arc;

use crate::stack::{Context, Gate, PushOutcome, SharedStack};

/// Stack specialised for terminal pages
pub type PageStack = SharedStack<Arc<Page>>;

/// Builds the page a link presents; called once per tap
pub type ContentFactory = Arc<dyn Fn() -> Page + Send + Sync>;

/// How a link is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// Plain button
    Button,

    /// List row with a trailing chevron
    ListRow,
}

/// Control that pushes a page onto the stack when tapped
///
/// The link never knows which level will present its page; the stack decides
/// that when the push happens.
#[derive(Clone)]
pub struct NavigationLink {
    label: String,
    content: ContentFactory,
    context: Context,
    style: LinkStyle,
}

impl NavigationLink {
    /// Button that pushes `content` (StackNavigationLink)
    pub fn stack<F>(label: impl Into<String>, content: F) -> Self
    where
        F: Fn() -> Page + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            content: Arc::new(content),
            context: Context::new(),
            style: LinkStyle::Button,
        }
    }

    /// List row that pushes `content` (ListNavigationLink)
    pub fn list<F>(label: impl Into<String>, content: F) -> Self
    where
        F: Fn() -> Page + Send + Sync + 'static,
    {
        Self {
            style: LinkStyle::ListRow,
            ..Self::stack(label, content)
        }
    }

    /// Context handed to the active level's gate on tap
    pub fn context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn style(&self) -> LinkStyle {
        self.style
    }

    pub fn push_context(&self) -> &Context {
        &self.context
    }

    /// Preview whether tapping would push, without touching the stack
    pub fn is_enabled(&self, stack: &PageStack) -> bool {
        stack.evaluate(&self.context)
    }

    /// Build the content and push it
    pub fn tap(&self, stack: &PageStack) -> PushOutcome {
        let page = (self.content)();
        stack.push(Arc::new(page), &self.context)
    }
}

impl fmt::Debug for NavigationLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigationLink")
            .field("label", &self.label)
            .field("style", &self.style)
            .field("context", &self.context)
            .finish()
    }
}

/// Marks a page as able to present deeper pages
#[derive(Clone, Default)]
pub struct PusherSpec {
    gate: Option<Gate>,
}

impl PusherSpec {
    pub fn new(gate: Option<Gate>) -> Self {
        Self { gate }
    }

    pub fn gate(&self) -> Option<&Gate> {
        self.gate.as_ref()
    }
}

impl fmt::Debug for PusherSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PusherSpec")
            .field("gated", &self.gate.is_some())
            .finish()
    }
}

/// Single piece of page content
#[derive(Debug, Clone)]
pub enum Node {
    Text(String),
    Link(NavigationLink),
}

/// Declarative page content
#[derive(Debug, Clone, Default)]
pub struct Page {
    title: Option<String>,
    nodes: Vec<Node>,
    pusher: Option<PusherSpec>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Title shown in the navigation bar
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn text(mut self, content: impl Into<String>) -> Self {
        self.nodes.push(Node::Text(content.into()));
        self
    }

    pub fn link(mut self, link: NavigationLink) -> Self {
        self.nodes.push(Node::Link(link));
        self
    }

    /// Host a pusher after the content so this page can present deeper pages
    pub fn with_pusher(self) -> Self {
        with_pusher(self, None)
    }

    /// Like `with_pusher`, but pushes into this page must pass `gate`
    pub fn with_gated_pusher(self, gate: Gate) -> Self {
        with_pusher(self, Some(gate))
    }

    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn pusher(&self) -> Option<&PusherSpec> {
        self.pusher.as_ref()
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Text(text) => Some(text.as_str()),
            Node::Link(_) => None,
        })
    }

    pub fn links(&self) -> impl Iterator<Item = &NavigationLink> {
        self.nodes.iter().filter_map(|node| match node {
            Node::Link(link) => Some(link),
            Node::Text(_) => None,
        })
    }

    pub fn find_link(&self, label: &str) -> Option<&NavigationLink> {
        self.links().find(|link| link.label() == label)
    }
}

/// Wrap `page` so it renders its content followed by a pusher
///
/// Replaces any pusher the page already had.
pub fn with_pusher(mut page: Page, gate: Option<Gate>) -> Page {
    page.pusher = Some(PusherSpec::new(gate));
    page
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stack::{LevelId, require_flag};

    #[test]
    fn test_page_builder_keeps_order() {
        let page = Page::new()
            .title("Root view")
            .text("Root View")
            .link(NavigationLink::stack("Push", || Page::new().text("Pushed view")))
            .text("Footer");

        assert_eq!(page.title_text(), Some("Root view"));
        assert_eq!(page.texts().collect::<Vec<_>>(), vec!["Root View", "Footer"]);
        assert!(page.find_link("Push").is_some());
        assert!(page.find_link("Missing").is_none());
        assert!(page.pusher().is_none());
    }

    #[test]
    fn test_list_link_style() {
        let link = NavigationLink::list("Row", Page::new);
        assert_eq!(link.style(), LinkStyle::ListRow);
        assert_eq!(link.label(), "Row");
    }

    #[test]
    fn test_tap_pushes_fresh_content() {
        let stack = PageStack::new();
        stack.register(LevelId(0), None);
        let link = NavigationLink::stack("Push", || Page::new().text("Pushed view"));

        assert!(link.tap(&stack).is_pushed());
        let page = stack.content(LevelId(0)).unwrap();
        assert_eq!(page.texts().next(), Some("Pushed view"));
    }

    #[test]
    fn test_is_enabled_previews_gate() {
        let stack = PageStack::new();
        stack.register(LevelId(0), Some(require_flag("expected")));

        let truthy = NavigationLink::stack("Push truthy", Page::new)
            .context(Context::new().with("expected", true));
        let falsy = NavigationLink::stack("Push falsy", Page::new)
            .context(Context::new().with("expected", false));

        assert!(truthy.is_enabled(&stack));
        assert!(!falsy.is_enabled(&stack));
        assert_eq!(stack.version(), 1);
    }
}
