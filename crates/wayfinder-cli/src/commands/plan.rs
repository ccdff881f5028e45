//! One-shot plan command

use crate::app::{OutputFormat, PlanArgs};
use crate::output;
use crate::progress::SpinnerObserver;
use anyhow::Result;
use wayfinder_core::{PlanRequest, Planner};

pub async fn run(args: PlanArgs, planner: &Planner, format: OutputFormat) -> Result<()> {
    let raw = args.query.join(" ");
    let request = PlanRequest::parse(&raw)?;

    let plan = match format {
        // No spinner when the output is machine-readable
        OutputFormat::Json => planner.plan(&request, None).await?,
        OutputFormat::Cli => {
            let observer = SpinnerObserver::new();
            planner.plan(&request, Some(&observer)).await?
        }
    };

    output::print_plan(&plan, format)?;
    Ok(())
}
