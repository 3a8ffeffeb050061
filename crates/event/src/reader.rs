//! Streaming reader for line-delimited event files
//!
//! Event samples can be far larger than memory, so files are read one line
//! at a time through a buffered stream and decoded into [Event] records as
//! they go. The convenience function collects everything; the [EventReader]
//! iterator is preferred when events are processed and dropped.
//!
//! # Quickstart
//!
//! ```rust, no_run
//! # use spinetools_event::{read_events, Event, EventReader};
//! // Collect every event in the file
//! let events: Vec<Event> = read_events("path/to/events.jsonl").unwrap();
//!
//! // Or stream them one at a time
//! let mut reader = EventReader::open("path/to/events.jsonl").unwrap();
//! reader.disable_progress();
//! for event in reader {
//!     let event = event.unwrap();
//!     // ...process and drop
//! }
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use kdam::{Bar, BarBuilder, BarExt};
use log::debug;

use crate::error::{Error, Result};
use crate::event::Event;

/// Read all events from a line-delimited JSON file
///
/// Returns a result containing a vector of every [Event] in the file at
/// `path`. Blank lines are skipped; any malformed line is an error carrying
/// the offending line number.
///
/// - `path` - Path to the event file, can be [&str], [String], [Path], etc...
///
/// Example
/// ```rust, no_run
/// # use spinetools_event::{read_events, Event};
/// let events: Vec<Event> = read_events("path/to/events.jsonl").unwrap();
/// ```
pub fn read_events<P: AsRef<Path>>(path: P) -> Result<Vec<Event>> {
    let mut reader = EventReader::open(path)?;
    reader.disable_progress();
    reader.collect()
}

/// Streaming iterator over the events of a line-delimited JSON file
///
/// Holds at most one line of the file in memory at a time. A progress bar
/// is rendered to the terminal unless disabled, which is recommended for
/// anything non-interactive.
pub struct EventReader {
    lines: Lines<BufReader<File>>,
    line_number: usize,
    progress: Option<Bar>,
}

impl EventReader {
    /// Open an event file for streaming
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("opening event file {}", path.display());

        let reader = BufReader::new(File::open(path)?);
        Ok(Self {
            lines: reader.lines(),
            line_number: 0,
            progress: Some(init_progress_bar()),
        })
    }

    /// Do not print the progress indicator
    pub fn disable_progress(&mut self) {
        self.progress = None;
    }

    /// Decode the next non-blank line into an event
    fn next_event(&mut self) -> Option<Result<Event>> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_number += 1;

            if let Some(bar) = self.progress.as_mut() {
                // rendering failures are not worth killing the read over
                let _ = bar.update(1);
            }

            if line.trim().is_empty() {
                continue;
            }

            return Some(serde_json::from_str(&line).map_err(|source| {
                Error::MalformedRecord {
                    line: self.line_number,
                    source,
                }
            }));
        }
    }
}

impl Iterator for EventReader {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event()
    }
}

impl std::fmt::Debug for EventReader {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("EventReader")
            .field("line_number", &self.line_number)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Initialise the progress bar for interactive reads
fn init_progress_bar() -> Bar {
    BarBuilder::default()
        .unit(" events")
        .unit_scale(true)
        .bar_format("{count} events [{rate} events/s]   ")
        .build()
        .expect("Failed to initialise progress bar")
}
