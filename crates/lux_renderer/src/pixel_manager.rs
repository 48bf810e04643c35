//! Hands out pixels to render workers and tracks progress.

use std::sync::atomic::{AtomicU64, Ordering};

/// A pixel position in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub row: u32,
    pub col: u32,
}

/// Shared pixel dispenser.
///
/// Every pixel is handed out exactly once, in row-major order, no matter
/// how many threads call [`next_pixel`](Self::next_pixel) concurrently.
#[derive(Debug)]
pub struct PixelManager {
    rows: u32,
    cols: u32,
    total: u64,
    next: AtomicU64,
    done: AtomicU64,
    /// Last logged progress percentage
    reported: AtomicU64,
    /// Percent step between progress logs, 0 disables
    progress_step: u64,
}

impl PixelManager {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            total: rows as u64 * cols as u64,
            next: AtomicU64::new(0),
            done: AtomicU64::new(0),
            reported: AtomicU64::new(0),
            progress_step: 0,
        }
    }

    /// Log progress each time it advances by `step` percent.
    pub fn with_progress_step(mut self, step: u64) -> Self {
        self.progress_step = step;
        self
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Claim the next unrendered pixel, or `None` when all are claimed.
    pub fn next_pixel(&self) -> Option<Pixel> {
        let index = self
            .next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |i| {
                (i < self.total).then_some(i + 1)
            })
            .ok()?;

        let cols = self.cols as u64;
        Some(Pixel {
            row: (index / cols) as u32,
            col: (index % cols) as u32,
        })
    }

    /// Record one finished pixel.
    pub fn pixel_done(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        if self.progress_step == 0 || self.total == 0 {
            return;
        }

        let percent = done * 100 / self.total;
        let last = self.reported.load(Ordering::Relaxed);
        if percent >= last + self.progress_step
            && self
                .reported
                .compare_exchange(last, percent, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
        {
            log::info!("Rendered {}% ({}/{} pixels)", percent, done, self.total);
        }
    }

    /// Number of pixels reported done.
    pub fn completed(&self) -> u64 {
        self.done.load(Ordering::Relaxed)
    }

    /// Fraction of pixels done, in [0, 1].
    pub fn progress(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed() as f64 / self.total as f64
    }
}
