use anyhow::{Result, anyhow};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::stack::{Context, Gate, require_flag};
use crate::tui::navigator::Navigator;
use crate::tui::view::{NavigationLink, Page, PageStack};

/// Context key the gated scenarios check
pub const EXPECTED_KEY: &str = "expected";

/// Built-in demo stacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Scenario {
    /// One push from the root and back
    #[default]
    Simple,
    /// Four levels, each page hosting its own pusher
    Nested,
    /// Plain texts without any link
    WithoutVstack,
    /// The root only admits pushes whose context says expected = true
    EvaluateRoot,
    /// A pushed page that only admits pushes whose context says expected = true
    EvaluateNested,
}

impl Scenario {
    pub fn all() -> &'static [Scenario] {
        &[
            Scenario::Simple,
            Scenario::Nested,
            Scenario::WithoutVstack,
            Scenario::EvaluateRoot,
            Scenario::EvaluateNested,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Simple => "simple",
            Scenario::Nested => "nested",
            Scenario::WithoutVstack => "without-vstack",
            Scenario::EvaluateRoot => "evaluate-root",
            Scenario::EvaluateNested => "evaluate-nested",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Scenario::Simple => "one push from the root and back",
            Scenario::Nested => "four nested levels, each with its own pusher",
            Scenario::WithoutVstack => "plain texts, nothing to push",
            Scenario::EvaluateRoot => "gated root level",
            Scenario::EvaluateNested => "gated second level",
        }
    }

    /// Build the scenario's root stack view on `stack`
    pub fn navigator(&self, stack: PageStack) -> Navigator {
        Navigator::with_root_gate(stack, self.root_page(), self.root_gate())
    }

    fn root_gate(&self) -> Option<Gate> {
        match self {
            Scenario::EvaluateRoot => Some(require_flag(EXPECTED_KEY)),
            _ => None,
        }
    }

    fn root_page(&self) -> Page {
        match self {
            Scenario::Simple => Page::new()
                .text("Hello world!")
                .link(NavigationLink::stack("Push", || Page::new().text("Pushed view"))),
            Scenario::Nested => nested_root(),
            Scenario::WithoutVstack => Page::new().text("Should be visible").text("This too"),
            Scenario::EvaluateRoot => evaluation_links(Page::new().title("Root view")),
            Scenario::EvaluateNested => Page::new().title("Root view").link(NavigationLink::stack("Push", || {
                evaluation_links(Page::new().title("Second view").text("Second view"))
                    .with_gated_pusher(require_flag(EXPECTED_KEY))
            })),
        }
    }
}

fn nested_root() -> Page {
    Page::new()
        .title("Root view")
        .text("Root View")
        .link(NavigationLink::stack("Push another view", || {
            Page::new()
                .title("Second view")
                .text("Second view")
                .link(NavigationLink::stack("Push yet another view", || {
                    Page::new()
                        .title("Third view")
                        .text("Third view")
                        .link(NavigationLink::stack("And another view", || {
                            Page::new().title("Fourth view").text("Fourth view").with_pusher()
                        }))
                        .with_pusher()
                }))
                .with_pusher()
        }))
}

/// Add the truthy/falsy push pair used by the gated scenarios
fn evaluation_links(page: Page) -> Page {
    page.link(
        NavigationLink::stack("Push truthy", || Page::new().text("Pushed with evaluation"))
            .context(Context::new().with(EXPECTED_KEY, true)),
    )
    .link(
        NavigationLink::stack("Push falsy", || Page::new().text("No-op"))
            .context(Context::new().with(EXPECTED_KEY, false)),
    )
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts both `without-vstack` and `without_vstack` spellings
impl FromStr for Scenario {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().replace('_', "-");
        <Scenario as ValueEnum>::from_str(&normalized, true)
            .map_err(|_| anyhow!("Unknown scenario '{}'", s))
    }
}
