use anyhow::{Result, anyhow, bail};
use log::info;
use std::fmt;
use std::str::FromStr;

use crate::stack::{PopOutcome, PushOutcome};
use crate::tui::navigator::Navigator;
use crate::tui::view::LinkStyle;

/// One simulated user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Tap the link with this label on the top page
    Tap(String),
    /// Use the back affordance
    Back,
}

impl FromStr for Step {
    type Err = anyhow::Error;

    /// Parses `tap:<label>` or `back`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("back") {
            return Ok(Step::Back);
        }
        match s.split_once(':') {
            Some((kind, label)) if kind.trim().eq_ignore_ascii_case("tap") => {
                let label = label.trim();
                if label.is_empty() {
                    bail!("Step 'tap:' needs a link label");
                }
                Ok(Step::Tap(label.to_string()))
            }
            _ => Err(anyhow!("Invalid step '{}'. Expected 'tap:<label>' or 'back'", s)),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Tap(label) => write!(f, "tap:{}", label),
            Step::Back => f.write_str("back"),
        }
    }
}

/// What a step did to the stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepResult {
    Pushed(PushOutcome),
    Popped(PopOutcome),
    /// Back on the root page
    AtRoot,
}

impl fmt::Display for StepResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepResult::Pushed(PushOutcome::Pushed(id)) => write!(f, "pushed onto {}", id),
            StepResult::Pushed(PushOutcome::RejectedByGate(id)) => {
                write!(f, "rejected by the gate of {}", id)
            }
            StepResult::Pushed(PushOutcome::NoActiveLevel) => f.write_str("no active level"),
            StepResult::Popped(outcome) => {
                write!(f, "popped {}", outcome.id())?;
                if !outcome.truncated().is_empty() {
                    write!(f, " ({} deeper levels removed)", outcome.truncated().len())?;
                }
                Ok(())
            }
            StepResult::AtRoot => f.write_str("already at the root"),
        }
    }
}

/// A step, its result and the page shown afterwards
#[derive(Debug, Clone)]
pub struct StepReport {
    pub step: Step,
    pub result: StepResult,
    pub page: String,
}

/// Apply `steps` in order, stopping at the first tap on a missing link
pub fn run_script(navigator: &mut Navigator, steps: &[Step]) -> Result<Vec<StepReport>> {
    let mut reports = Vec::with_capacity(steps.len());

    for step in steps {
        let result = apply_step(navigator, step)?;
        info!("Step {} -> {}", step, result);
        reports.push(StepReport {
            step: step.clone(),
            result,
            page: describe_page(navigator),
        });
    }

    Ok(reports)
}

pub fn apply_step(navigator: &mut Navigator, step: &Step) -> Result<StepResult> {
    match step {
        Step::Tap(label) => {
            let outcome = navigator.tap(label).ok_or_else(|| {
                let available: Vec<&str> = navigator.links().iter().map(|link| link.label).collect();
                anyhow!("No link labelled '{}' on this page (links: {:?})", label, available)
            })?;
            Ok(StepResult::Pushed(outcome))
        }
        Step::Back => Ok(navigator
            .back()
            .map(StepResult::Popped)
            .unwrap_or(StepResult::AtRoot)),
    }
}

/// Plain-text rendering of the top page
pub fn describe_page(navigator: &Navigator) -> String {
    let mut lines = Vec::new();

    let header = match (navigator.back_label(), navigator.title()) {
        (Some(back), Some(title)) => format!("< {} | {}", back, title),
        (Some(back), None) => format!("< {}", back),
        (None, Some(title)) => title.to_string(),
        (None, None) => String::new(),
    };
    if !header.is_empty() {
        lines.push(header);
    }

    lines.extend(navigator.top().texts().map(|text| format!("  {}", text)));

    for link in navigator.links() {
        let marker = if link.enabled { "" } else { " (disabled)" };
        let line = match link.style {
            LinkStyle::Button => format!("  [ {} ]{}", link.label, marker),
            LinkStyle::ListRow => format!("  {} >{}", link.label, marker),
        };
        lines.push(line);
    }

    lines.join("\n")
}
