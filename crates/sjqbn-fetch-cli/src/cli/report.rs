//! User-facing progress lines on stdout.

use sjqbn_fetch_core::fetch::{FetchEvent, FetchOutcome};

pub fn print_event(event: FetchEvent<'_>) {
    match event {
        FetchEvent::Starting => println!("\nDownloading model dataset\n"),
        FetchEvent::Linking { target } => tracing::debug!("linking {}", target.display()),
        FetchEvent::Downloading { tarball, url } => {
            tracing::debug!("GET {}", url);
            println!("download  {}", tarball);
        }
        FetchEvent::Extracting { .. } => {}
        FetchEvent::DatasetMissing { label, file } => {
            println!("warning: dataset {} not found at {}", label, file.display())
        }
    }
}

pub fn print_outcome(outcome: &FetchOutcome) {
    match outcome {
        FetchOutcome::Linked { .. } => println!("\nLinked!"),
        FetchOutcome::AlreadyPresent { .. } | FetchOutcome::Downloaded { .. } => {
            println!("\nDone!")
        }
    }
}
