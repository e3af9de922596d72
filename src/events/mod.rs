//! # Events Module
//!
//! Progress reporting for batch runs.
//!
//! ## Design
//! The core library emits events through channels, allowing any UI
//! (CLI, GUI, web handler) to subscribe and display progress without the
//! deduplicator knowing who is listening.
//!
//! ## Example
//! ```rust,ignore
//! let (sender, receiver) = EventChannel::new();
//!
//! std::thread::spawn(move || {
//!     for event in receiver.iter() {
//!         if let Event::Fingerprint(FingerprintEvent::Progress { completed, total, .. }) = event {
//!             println!("Fingerprinted {}/{}", completed, total);
//!         }
//!     }
//! });
//!
//! deduplicator.run_with_events(&assets, &sender);
//! ```

mod channel;
mod types;

pub use channel::{null_sender, EventChannel, EventReceiver, EventSender};
pub use types::*;
