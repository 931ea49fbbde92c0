//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::cli::scenario::Scenario;
use crate::engine::{load_more_channel, PaginationEngine};
use crate::error::Result;
use crate::pagination::PaginationState;
use crate::source::{BoundsPolicy, MemorySource};
use futures::StreamExt;
use std::fmt::{Debug, Write as _};
use std::time::Duration;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let scenario = self.scenario()?;
        let states = execute(&scenario).await?;

        for state in &states {
            self.output_state(state)?;
        }

        if let Some(last) = states.last() {
            info!(
                states = states.len(),
                elements = last.elements.len(),
                exhausted = last.is_exhausted(),
                "pagination finished"
            );
        }
        Ok(())
    }

    /// Build the scenario from flags or a file
    fn scenario(&self) -> Result<Scenario> {
        match &self.cli.command {
            Commands::Run {
                total,
                page_size,
                loads,
                start,
                delay_ms,
                fail_at,
                strict,
            } => {
                let scenario = Scenario {
                    total: *total,
                    page_size: *page_size,
                    loads: *loads,
                    start: *start,
                    delay_ms: *delay_ms,
                    fail_at: *fail_at,
                    bounds: if *strict {
                        BoundsPolicy::Strict
                    } else {
                        BoundsPolicy::Truncate
                    },
                    ..Scenario::default()
                };
                scenario.validate()?;
                Ok(scenario)
            }
            Commands::Scenario { path } => {
                debug!(path = %path.display(), "loading scenario");
                Scenario::from_file(path)
            }
        }
    }

    /// Output a state
    fn output_state(&self, state: &PaginationState<usize, u64>) -> Result<()> {
        match self.cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(state)?),
            OutputFormat::Text => println!("{}", describe(state)),
        }
        Ok(())
    }
}

/// Run a scenario to completion and collect every state
///
/// A load-more trigger is fired each time the session settles, until
/// `loads` triggers have been spent or the source is exhausted.
pub async fn execute(scenario: &Scenario) -> Result<Vec<PaginationState<usize, u64>>> {
    let items: Vec<u64> = (1..=scenario.total as u64).collect();
    let mut source = MemorySource::new(items, scenario.page_size)?
        .with_latency(Duration::from_millis(scenario.delay_ms))
        .with_bounds(scenario.bounds);
    if let Some(offset) = scenario.fail_at {
        source = source.with_failure_at(offset);
    }

    let engine = PaginationEngine::new(source).with_config(scenario.engine.clone());
    let (load_more, signal) = load_more_channel();
    let mut states = engine.run(scenario.start, signal);
    let mut remaining = scenario.loads;
    let mut seen = Vec::new();

    while let Some(state) = states.next().await {
        let settled = !state.is_loading;
        let can_continue = state.can_load_more();
        seen.push(state);

        if !settled {
            continue;
        }
        if remaining == 0 || !can_continue {
            break;
        }
        remaining -= 1;
        load_more.trigger();
    }

    Ok(seen)
}

/// One-line summary of a state
pub fn describe<C: Debug, T>(state: &PaginationState<C, T>) -> String {
    let phase = if state.is_loading { "loading" } else { "idle" };
    let cursor = state
        .next_cursor
        .as_ref()
        .map_or_else(|| "end".to_string(), |c| format!("{c:?}"));

    let mut line = format!("{phase}@{cursor} elements={}", state.elements.len());
    if let Some(e) = &state.error {
        let _ = write!(line, " error=\"{e}\"");
    }
    line
}
