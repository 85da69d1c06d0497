//! Alternating phase bookkeeping.

use tactics_core::{PlayerId, TurnInfo};

/// Turn counter plus the player whose phase is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct TurnState {
    turn_number: u32,
    current: PlayerId,
}

impl Default for TurnState {
    fn default() -> Self {
        Self {
            turn_number: 1,
            current: PlayerId::One,
        }
    }
}

impl TurnState {
    pub(crate) const fn current(&self) -> PlayerId {
        self.current
    }

    pub(crate) const fn info(&self) -> TurnInfo {
        TurnInfo {
            turn_number: self.turn_number,
            current_player: self.current,
        }
    }

    /// Passes control to the opponent and returns the incoming player.
    ///
    /// The turn number only grows when player two hands back to player one.
    pub(crate) fn advance(&mut self) -> PlayerId {
        let next = self.current.opponent();
        if next == PlayerId::One {
            self.turn_number = self.turn_number.saturating_add(1);
        }
        self.current = next;
        next
    }
}
