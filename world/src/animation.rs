//! Step-wise playback of a committed move path.

use std::time::Duration;

use tactics_core::{AnimationSnapshot, TileCoord, UnitId};

/// In-flight move of a single unit along a precomputed path.
///
/// The unit keeps its authoritative tile until playback finishes; only the
/// displayed step advances while time accumulates.
#[derive(Clone, Debug)]
pub(crate) struct MoveAnimation {
    unit: UnitId,
    path: Vec<TileCoord>,
    step: usize,
    accumulator: Duration,
}

/// Result of feeding elapsed time into an animation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Progress {
    /// Tiles entered during the advance, in order.
    pub(crate) entered: Vec<TileCoord>,
    /// Whether the final tile of the path was reached.
    pub(crate) finished: bool,
}

impl MoveAnimation {
    pub(crate) fn new(unit: UnitId, path: Vec<TileCoord>) -> Self {
        Self {
            unit,
            path,
            step: 0,
            accumulator: Duration::ZERO,
        }
    }

    pub(crate) const fn unit(&self) -> UnitId {
        self.unit
    }

    pub(crate) fn destination(&self) -> Option<TileCoord> {
        self.path.last().copied()
    }

    /// Accumulates `dt` and advances one path node per elapsed `step_duration`.
    pub(crate) fn advance(&mut self, dt: Duration, step_duration: Duration) -> Progress {
        let mut progress = Progress::default();
        let last = self.path.len().saturating_sub(1);

        if step_duration.is_zero() {
            progress.entered.extend(self.path.iter().skip(self.step + 1).copied());
            self.step = last;
            self.accumulator = Duration::ZERO;
            progress.finished = true;
            return progress;
        }

        self.accumulator = self.accumulator.saturating_add(dt);
        while self.step < last && self.accumulator >= step_duration {
            self.accumulator = self.accumulator.saturating_sub(step_duration);
            self.step += 1;
            if let Some(tile) = self.path.get(self.step) {
                progress.entered.push(*tile);
            }
        }

        progress.finished = self.step >= last;
        progress
    }

    pub(crate) fn snapshot(&self) -> AnimationSnapshot {
        AnimationSnapshot {
            unit: self.unit,
            path: self.path.clone(),
            step: self.step,
        }
    }
}
