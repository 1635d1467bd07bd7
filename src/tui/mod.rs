pub mod keymap;
pub mod navigator;
pub mod renderer;
pub mod runtime;
pub mod scenarios;
pub mod script;
pub mod theme;
pub mod view;

pub use keymap::{Action, KeyBinding, Keymap};
pub use navigator::{LinkView, Navigator};
pub use renderer::Renderer;
pub use runtime::{RuntimeConfig, StackRuntime};
pub use scenarios::Scenario;
pub use script::{Step, StepReport, StepResult, describe_page, run_script};
pub use theme::{Theme, ThemeVariant};
pub use view::{LinkStyle, NavigationLink, Node, Page, PageStack, PusherSpec, with_pusher};
