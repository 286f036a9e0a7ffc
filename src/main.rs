//! `taskdash` (td) - Marker-based task dashboard CLI
//!
//! Manages a Markdown task dashboard whose raw text is the database:
//! issue blocks between sentinel markers, one issue file per task.

use taskdash::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
