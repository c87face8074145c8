//! CLI progress display utilities
//!
//! Step indicators with emojis, plus a spinner for the stages that run as a
//! single library call.

use std::time::Duration;

use console::{Emoji, style};
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};

/// Magnifying glass - for reading/scanning operations
pub static LOOKING_GLASS: Emoji<'_, '_> = Emoji("🔍 ", "");
/// Package - for opening archives
pub static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "");
/// Map - for continent stitching
pub static MAP: Emoji<'_, '_> = Emoji("🗺️  ", "");
/// Picture - for icon extraction
pub static PICTURE: Emoji<'_, '_> = Emoji("🖼️  ", "");
/// Floppy disk - for writing/saving operations
pub static DISK: Emoji<'_, '_> = Emoji("💾 ", "");
/// Sparkles - for completion
pub static SPARKLE: Emoji<'_, '_> = Emoji("✨ ", "");

/// Step counter shared by the stages of one command.
#[derive(Debug, Clone, Copy)]
pub struct Steps {
    current: usize,
    total: usize,
    quiet: bool,
}

impl Steps {
    #[must_use]
    pub fn new(total: usize, quiet: bool) -> Self {
        Self {
            current: 0,
            total,
            quiet,
        }
    }

    #[must_use]
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    /// Advance and print the next step line unless quiet.
    pub fn next(&mut self, emoji: Emoji, msg: &str) {
        self.current += 1;
        if !self.quiet {
            print_step(self.current, self.total, emoji, msg);
        }
    }
}

/// Print a step indicator: `[1/3] 📦 Message...`
pub fn print_step(current: usize, total: usize, emoji: Emoji, msg: &str) {
    println!(
        "{} {}{}",
        style(format!("[{current}/{total}]")).bold().dim(),
        emoji,
        msg
    );
}

/// Print completion message: `✨ Done in 2s`
pub fn print_done(elapsed: Duration) {
    println!("{} Done in {}", SPARKLE, HumanDuration(elapsed));
}

/// Create a simple spinner, or a hidden one when `quiet`.
///
/// # Panics
/// Panics if the template string is invalid (this is a compile-time constant).
#[must_use]
pub fn simple_spinner(msg: &str, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .expect("valid template"),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
