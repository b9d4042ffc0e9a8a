//! Progress bar for the onboarding pipeline.

use std::ops::ControlFlow;

use cpass_skills::{BatchObserver, RowProgress};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Draws a row progress bar on stderr and stops after `limit` rows.
pub struct RowProgressBar {
    bar: ProgressBar,
    limit: Option<usize>,
    skills_found: usize,
}

impl RowProgressBar {
    /// Hidden when `visible` is false, e.g. for `--json` output.
    pub fn new(total_rows: usize, limit: Option<usize>, visible: bool) -> Self {
        let shown = limit.map_or(total_rows, |l| l.min(total_rows));
        let bar = ProgressBar::new(shown as u64);
        if visible {
            bar.set_draw_target(ProgressDrawTarget::stderr());
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner} onboarding [{bar:30}] {pos}/{len} rows, {msg}",
            ) {
                bar.set_style(style.progress_chars("=> "));
            }
        } else {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        Self {
            bar,
            limit,
            skills_found: 0,
        }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl BatchObserver for RowProgressBar {
    fn on_row(&mut self, progress: &RowProgress) -> ControlFlow<()> {
        self.skills_found += progress.skills_found;
        self.bar.set_position(progress.row_number as u64);
        self.bar
            .set_message(format!("{} skills found", self.skills_found));
        match self.limit {
            Some(limit) if progress.row_number >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}
