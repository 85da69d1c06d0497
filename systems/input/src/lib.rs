#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure input system translating pointer, wheel, and keyboard events.
//!
//! Camera operations are applied directly to the provided [`Camera`], while
//! anything that touches selection is emitted as a world [`Command`]. Touch
//! input arrives as the same pointer events as the mouse.

use glam::Vec2;
use tactics_core::{Command, DRAG_THRESHOLD};
use tactics_system_camera::{Camera, Minimap, ScrollDirection};

/// Surface that received a pointer event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Surface {
    /// The main map canvas.
    MapCanvas,
    /// The miniature overview.
    Minimap,
}

/// Keys the dispatcher reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// Scroll left.
    ArrowLeft,
    /// Scroll right.
    ArrowRight,
    /// Scroll up.
    ArrowUp,
    /// Scroll down.
    ArrowDown,
    /// Clear every selection.
    Escape,
}

/// Raw input event captured by an adapter, in surface-relative pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A button or finger went down.
    PointerDown {
        /// Surface under the pointer.
        surface: Surface,
        /// Pointer position relative to the surface.
        position: Vec2,
    },
    /// The pointer moved.
    PointerMove {
        /// Surface under the pointer.
        surface: Surface,
        /// Pointer position relative to the surface.
        position: Vec2,
    },
    /// A button or finger was released.
    PointerUp {
        /// Surface under the pointer.
        surface: Surface,
        /// Pointer position relative to the surface.
        position: Vec2,
    },
    /// The pointer left the surface.
    PointerLeave {
        /// Surface the pointer left.
        surface: Surface,
    },
    /// The wheel turned over the map canvas.
    Wheel {
        /// Vertical wheel delta; negative values zoom in.
        delta_y: f32,
        /// Pointer position relative to the map canvas.
        position: Vec2,
    },
    /// A key was pressed.
    Key(Key),
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Press {
    last: Vec2,
    travel: f32,
}

impl Press {
    fn is_drag(&self) -> bool {
        self.travel > DRAG_THRESHOLD
    }
}

/// Input system distinguishing clicks from drags and routing them.
#[derive(Clone, Debug, Default)]
pub struct InputDispatcher {
    press: Option<Press>,
    minimap_follow: bool,
}

impl InputDispatcher {
    /// Creates a new dispatcher with no gesture in progress.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            press: None,
            minimap_follow: false,
        }
    }

    /// Reports whether a map-canvas press is currently being tracked.
    #[must_use]
    pub fn is_pressing(&self) -> bool {
        self.press.is_some()
    }

    /// Reports whether the camera follows the pointer on the overview.
    #[must_use]
    pub const fn is_following_minimap(&self) -> bool {
        self.minimap_follow
    }

    /// Consumes raw input, updating the camera and emitting commands.
    ///
    /// `animating` mirrors the world's move playback at the time of the call.
    /// Clicks are dropped while it is set; camera operations keep working.
    pub fn handle(
        &mut self,
        animating: bool,
        input: &[InputEvent],
        camera: &mut Camera,
        minimap: &Minimap,
        out: &mut Vec<Command>,
    ) {
        for event in input {
            match *event {
                InputEvent::PointerDown {
                    surface: Surface::MapCanvas,
                    position,
                } => {
                    self.press = Some(Press {
                        last: position,
                        travel: 0.0,
                    });
                }
                InputEvent::PointerMove {
                    surface: Surface::MapCanvas,
                    position,
                } => {
                    if let Some(press) = self.press.as_mut() {
                        let delta = position - press.last;
                        camera.scroll_by(-delta);
                        press.travel += delta.length();
                        press.last = position;
                    }
                    out.push(Command::HoverTile {
                        tile: camera.screen_to_tile(position),
                    });
                }
                InputEvent::PointerUp {
                    surface: Surface::MapCanvas,
                    position,
                } => {
                    let Some(press) = self.press.take() else {
                        continue;
                    };
                    if press.is_drag() || animating {
                        continue;
                    }
                    if let Some(tile) = camera.screen_to_tile(position) {
                        out.push(Command::ClickTile { tile });
                    }
                }
                InputEvent::PointerLeave {
                    surface: Surface::MapCanvas,
                } => {
                    self.press = None;
                    out.push(Command::HoverTile { tile: None });
                }
                InputEvent::PointerDown {
                    surface: Surface::Minimap,
                    position,
                } => {
                    self.minimap_follow = minimap.focus(camera, position);
                }
                InputEvent::PointerMove {
                    surface: Surface::Minimap,
                    position,
                } => {
                    if self.minimap_follow {
                        let _ = minimap.focus(camera, position);
                    }
                }
                InputEvent::PointerUp {
                    surface: Surface::Minimap,
                    ..
                }
                | InputEvent::PointerLeave {
                    surface: Surface::Minimap,
                } => {
                    self.minimap_follow = false;
                }
                InputEvent::Wheel { delta_y, position } => camera.zoom(delta_y, position),
                InputEvent::Key(Key::ArrowLeft) => camera.scroll_step(ScrollDirection::Left),
                InputEvent::Key(Key::ArrowRight) => camera.scroll_step(ScrollDirection::Right),
                InputEvent::Key(Key::ArrowUp) => camera.scroll_step(ScrollDirection::Up),
                InputEvent::Key(Key::ArrowDown) => camera.scroll_step(ScrollDirection::Down),
                InputEvent::Key(Key::Escape) => out.push(Command::ClearSelection),
            }
        }
    }
}
