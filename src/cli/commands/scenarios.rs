use anyhow::Result;

use stapel::config::StapelConfig;
use stapel::tui::Scenario;

pub fn scenarios_command(config: &StapelConfig) -> Result<()> {
    for scenario in Scenario::all() {
        let marker = if *scenario == config.scenario { "*" } else { " " };
        println!("{} {:<16} {}", marker, scenario.name(), scenario.description());
    }
    Ok(())
}
