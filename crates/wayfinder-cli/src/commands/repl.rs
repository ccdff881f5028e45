//! Interactive turn loop

use crate::app::OutputFormat;
use crate::output;
use crate::progress::SpinnerObserver;
use anyhow::Result;
use std::io::{self, BufRead, Write};
use wayfinder_core::{PlanRequest, Planner};

pub async fn run(planner: &Planner, format: OutputFormat) -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        println!("Enter your travel details (e.g., '5 days in Paris') or type 'exit' to quit.");
        print!("> ");
        io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break, // EOF
        };
        let input = line.trim();

        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "exit" | "quit") {
            break;
        }

        // A failed turn never takes the loop down: format errors re-prompt,
        // pipeline and store failures are reported and the next turn starts.
        let request = match PlanRequest::parse(input) {
            Ok(request) => request,
            Err(err) => {
                eprintln!("{}", err);
                continue;
            }
        };

        let observer = SpinnerObserver::new();
        match planner.plan(&request, Some(&observer)).await {
            Ok(plan) => output::print_plan(&plan, format)?,
            Err(err) => eprintln!("{}", err),
        }

        println!("{}", "-".repeat(50));
    }

    Ok(())
}
