//! Plan rendering for the terminal

use crate::app::OutputFormat;
use anyhow::Result;
use std::io::Write;
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use wayfinder_core::{PlanSource, TravelPlan};

pub fn print_plan(plan: &TravelPlan, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(plan)?);
            Ok(())
        }
        OutputFormat::Cli => print_terminal(plan),
    }
}

fn print_terminal(plan: &TravelPlan) -> Result<()> {
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);

    let origin = match plan.source {
        PlanSource::Cache { distance } => {
            format!(
                "{} (served from cache, distance {:.3})",
                plan.destination, distance
            )
        }
        PlanSource::Generated => format!("{} (freshly generated)", plan.destination),
    };

    stdout.set_color(ColorSpec::new().set_bold(true))?;
    writeln!(stdout, "{}", origin)?;
    stdout.reset()?;
    writeln!(stdout)?;

    section(&mut stdout, "Location Suggestions", &plan.suggestions)?;
    section(&mut stdout, "Itinerary", &plan.itinerary)?;
    section(&mut stdout, "Geolocation", &plan.geolocation)?;

    Ok(())
}

fn section(stdout: &mut StandardStream, title: &str, body: &str) -> Result<()> {
    stdout.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    writeln!(stdout, "{}", title)?;
    stdout.reset()?;
    writeln!(stdout, "{}", body)?;
    writeln!(stdout)?;
    Ok(())
}
