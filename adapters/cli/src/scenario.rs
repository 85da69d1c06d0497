//! Scripted demo driving one full round through the session interface.

use glam::Vec2;
use tactics_core::{Event, TileCoord, UnitId};
use tactics_session::Session;
use tracing::{info, warn};

/// Outcome of the scripted round.
#[derive(Debug, Default)]
pub(crate) struct ScenarioReport {
    pub(crate) moves: usize,
    pub(crate) engagements: usize,
    pub(crate) rejections: usize,
}

/// Plays a short opening: both players advance, then player one engages.
pub(crate) fn run(session: &mut Session) -> ScenarioReport {
    let mut report = ScenarioReport::default();
    let log_start = session.event_log().count();

    // Player one: ZAKU walks along the open corridor, DOM moves instantly.
    walk(session, UnitId::new(1), TileCoord::new(6, 2));
    if !session.move_unit(UnitId::new(2), TileCoord::new(3, 3)) {
        warn!("DOM could not reach 3,3");
    }
    end_turn(session);

    // Player two: GM is brought forward and closes in on ZAKU.
    if !session.relocate_unit(UnitId::new(5), TileCoord::new(9, 2)) {
        warn!("GM could not be placed");
    }
    walk(session, UnitId::new(5), TileCoord::new(8, 2));
    end_turn(session);

    // Player one: ZAKU moves onto GM's tile.
    walk(session, UnitId::new(1), TileCoord::new(8, 2));
    session.zoom(-1.0, session.camera().viewport() * 0.5);
    session.scroll(Vec2::new(64.0, 0.0));

    for event in session.event_log().skip(log_start) {
        match event {
            Event::UnitMoved { .. } => report.moves += 1,
            Event::EngagementStarted { .. } => report.engagements += 1,
            Event::CommandRejected { .. } => report.rejections += 1,
            _ => {}
        }
    }
    report
}

fn walk(session: &mut Session, unit: UnitId, destination: TileCoord) {
    if !session.select_unit(unit) {
        warn!(unit = unit.get(), "unit is not selectable");
        return;
    }
    session.click_tile(destination);
    let waited = session.wait_for_animation();
    info!(
        unit = unit.get(),
        %destination,
        waited_ms = waited.as_millis() as u64,
        "move finished"
    );
}

fn end_turn(session: &mut Session) {
    if session.end_turn() {
        let turn = session.turn_info();
        info!(turn = turn.turn_number, phase = turn.phase(), "phase changed");
    }
}
