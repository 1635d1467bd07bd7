use anyhow::Result;
use clap::Args;
use log::info;

use stapel::config::StapelConfig;
use stapel::tui::{PageStack, Scenario, Step, describe_page, run_script};

#[derive(Args)]
pub struct RunCommands {
    /// Scenario to drive (overrides config and STAPEL_SCENARIO)
    #[arg(short, long)]
    pub scenario: Option<Scenario>,

    /// Step to apply: `tap:<label>` or `back` (repeatable)
    #[arg(long = "step", value_name = "STEP")]
    pub steps: Vec<Step>,
}

pub fn run_command(args: RunCommands, config: &StapelConfig) -> Result<()> {
    let scenario = args.scenario.unwrap_or(config.scenario);
    info!("Running scenario {} with {} steps", scenario, args.steps.len());

    let mut navigator = scenario.navigator(PageStack::new());
    println!("{}", describe_page(&navigator));

    for report in run_script(&mut navigator, &args.steps)? {
        println!();
        println!("> {} ({})", report.step, report.result);
        println!("{}", report.page);
    }

    Ok(())
}
