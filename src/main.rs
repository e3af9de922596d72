//! # site-dedup CLI
//!
//! Command-line interface for the site photo deduplicator.
//!
//! ## Usage
//! ```bash
//! site-dedup dedup uploads/job-17 --threshold 5
//! site-dedup estimate uploads/job-17 --output json
//! site-dedup hash kitchen.jpg hallway.jpg
//! ```

mod cli;

use site_photo_dedup::Result;

fn main() -> Result<()> {
    site_photo_dedup::init_tracing();
    cli::run()
}
