//! Terminal spinner for long-running pipeline stages

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use wayfinder_core::{PlanObserver, Stage};

/// Animated spinner on stderr. The stop token is handed to the render
/// thread at spawn time; `stop` flips it and joins before returning, so
/// nothing prints after the spinner is gone.
pub struct Spinner {
    stop: Arc<AtomicBool>,
    handle: thread::JoinHandle<()>,
}

impl Spinner {
    pub fn start(message: &str) -> Self {
        let stop = Arc::new(AtomicBool::new(false));
        let token = stop.clone();
        let message = message.to_string();

        let handle = thread::spawn(move || {
            let frames = ['|', '/', '-', '\\'];
            let mut i = 0;
            while !token.load(Ordering::Relaxed) {
                eprint!("\r{} {}", message, frames[i % frames.len()]);
                io::stderr().flush().ok();
                i += 1;
                thread::sleep(Duration::from_millis(120));
            }
            eprint!("\r{:width$}\r", "", width = message.len() + 2);
            io::stderr().flush().ok();
        });

        Self { stop, handle }
    }

    pub fn stop(self) {
        self.stop.store(true, Ordering::Relaxed);
        let _ = self.handle.join();
    }
}

/// Runs a spinner for the duration of each pipeline stage
#[derive(Default)]
pub struct SpinnerObserver {
    active: Mutex<Option<Spinner>>,
}

impl SpinnerObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlanObserver for SpinnerObserver {
    fn stage_started(&self, stage: Stage) {
        let message = match stage {
            Stage::Suggestions => "Scouting locations...",
            Stage::Itinerary => "Drafting itinerary...",
            Stage::Geolocation => "Resolving coordinates...",
        };
        if let Ok(mut active) = self.active.lock() {
            *active = Some(Spinner::start(message));
        }
    }

    fn stage_finished(&self, _stage: Stage) {
        if let Ok(mut active) = self.active.lock() {
            if let Some(spinner) = active.take() {
                spinner.stop();
            }
        }
    }
}
