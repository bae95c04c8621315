//! Sector progress display.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use xax_lib::SECTOR_SIZE;

/// Progress bar when the input size is known, spinner otherwise (stdin).
pub(crate) struct SectorProgress {
    bar: ProgressBar,
}

impl SectorProgress {
    /// When `hidden` is true nothing is drawn; verbose sector listings and
    /// JSON output would otherwise interleave with the bar.
    pub fn new(input_bytes: Option<u64>, hidden: bool) -> Self {
        let bar = match input_bytes {
            Some(bytes) => {
                let bar = ProgressBar::new(bytes / SECTOR_SIZE as u64);
                bar.set_style(
                    ProgressStyle::with_template(
                        "  {spinner:.cyan} [{bar:40.cyan/blue}] {pos}/{len} sectors {msg}",
                    )
                    .expect("static pattern")
                    .tick_chars("/-\\|")
                    .progress_chars("=> "),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("  {spinner:.cyan} {pos} sectors {msg}")
                        .expect("static pattern")
                        .tick_chars("/-\\|"),
                );
                bar
            }
        };

        if hidden {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        } else {
            bar.enable_steady_tick(Duration::from_millis(100));
        }
        Self { bar }
    }

    /// Record that sector `index` has been classified.
    pub fn sector(&self, index: u64) {
        self.bar.set_position(index + 1);
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}
