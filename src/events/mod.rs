//! # Events Module
//!
//! Progress reporting decoupled from any front end.
//!
//! ## Design
//! The core library emits events through channels; the CLI (or any other
//! UI) subscribes and renders them. Nobody listening is fine.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = event_channel();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Analysis(AnalysisEvent::SignalCompleted { signal, .. }) = event {
//!             println!("{signal} done");
//!         }
//!     }
//! });
//!
//! analyzer.analyze_with_events(&frames, &sender)?;
//! ```

mod channel;
mod types;

pub use channel::{event_channel, null_sender, EventReceiver, EventSender};
pub use types::*;
