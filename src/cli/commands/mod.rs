pub mod run;
pub mod scenarios;
pub mod tui;

pub use run::run_command;
pub use scenarios::scenarios_command;
pub use tui::tui_command;
