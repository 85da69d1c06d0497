use glam::Vec2;
use tactics_core::{Command, TileCoord, DEFAULT_SCALE, SCROLL_SPEED};
use tactics_system_camera::{Camera, Minimap};
use tactics_system_input::{InputDispatcher, InputEvent, Key, Surface};

fn camera() -> Camera {
    Camera::new(Vec2::new(800.0, 600.0))
}

fn dispatch(
    dispatcher: &mut InputDispatcher,
    camera: &mut Camera,
    input: &[InputEvent],
) -> Vec<Command> {
    let mut commands = Vec::new();
    dispatcher.handle(false, input, camera, &Minimap::default(), &mut commands);
    commands
}

#[test]
fn stationary_press_emits_click_on_tile() {
    let mut dispatcher = InputDispatcher::new();
    let mut camera = camera();
    let position = Vec2::new(2.5 * 64.0, 2.5 * 64.0);

    let commands = dispatch(
        &mut dispatcher,
        &mut camera,
        &[
            InputEvent::PointerDown {
                surface: Surface::MapCanvas,
                position,
            },
            InputEvent::PointerUp {
                surface: Surface::MapCanvas,
                position,
            },
        ],
    );

    assert_eq!(
        commands,
        vec![Command::ClickTile {
            tile: TileCoord::new(2, 2)
        }],
        "a press without travel should click the tile under the pointer",
    );
}

#[test]
fn drag_pans_camera_and_suppresses_click() {
    let mut dispatcher = InputDispatcher::new();
    let mut camera = camera();
    let start = Vec2::new(400.0, 300.0);
    let end = Vec2::new(300.0, 200.0);

    let commands = dispatch(
        &mut dispatcher,
        &mut camera,
        &[
            InputEvent::PointerDown {
                surface: Surface::MapCanvas,
                position: start,
            },
            InputEvent::PointerMove {
                surface: Surface::MapCanvas,
                position: end,
            },
            InputEvent::PointerUp {
                surface: Surface::MapCanvas,
                position: end,
            },
        ],
    );

    assert_eq!(
        camera.scroll(),
        Vec2::new(100.0, 100.0),
        "dragging left and up scrolls right and down"
    );
    assert!(
        !commands
            .iter()
            .any(|command| matches!(command, Command::ClickTile { .. })),
        "a drag must not click"
    );
}

#[test]
fn small_jitter_still_clicks() {
    let mut dispatcher = InputDispatcher::new();
    let mut camera = camera();
    camera.scroll_to(Vec2::new(100.0, 100.0));
    let start = Vec2::new(200.0, 200.0);
    let jitter = Vec2::new(202.0, 201.0);

    let commands = dispatch(
        &mut dispatcher,
        &mut camera,
        &[
            InputEvent::PointerDown {
                surface: Surface::MapCanvas,
                position: start,
            },
            InputEvent::PointerMove {
                surface: Surface::MapCanvas,
                position: jitter,
            },
            InputEvent::PointerUp {
                surface: Surface::MapCanvas,
                position: jitter,
            },
        ],
    );

    assert!(commands.contains(&Command::ClickTile {
        tile: TileCoord::new(4, 4)
    }));
}

#[test]
fn hover_follows_pointer_and_clears_on_leave() {
    let mut dispatcher = InputDispatcher::new();
    let mut camera = camera();

    let commands = dispatch(
        &mut dispatcher,
        &mut camera,
        &[
            InputEvent::PointerMove {
                surface: Surface::MapCanvas,
                position: Vec2::new(70.0, 5.0),
            },
            InputEvent::PointerLeave {
                surface: Surface::MapCanvas,
            },
        ],
    );

    assert_eq!(
        commands,
        vec![
            Command::HoverTile {
                tile: Some(TileCoord::new(1, 0))
            },
            Command::HoverTile { tile: None },
        ]
    );
}

#[test]
fn wheel_up_zooms_in() {
    let mut dispatcher = InputDispatcher::new();
    let mut camera = camera();

    let _ = dispatch(
        &mut dispatcher,
        &mut camera,
        &[InputEvent::Wheel {
            delta_y: -100.0,
            position: Vec2::new(400.0, 300.0),
        }],
    );

    assert!(camera.scale() > DEFAULT_SCALE);
}

#[test]
fn arrows_scroll_and_escape_clears() {
    let mut dispatcher = InputDispatcher::new();
    let mut camera = camera();

    let commands = dispatch(
        &mut dispatcher,
        &mut camera,
        &[
            InputEvent::Key(Key::ArrowRight),
            InputEvent::Key(Key::ArrowDown),
            InputEvent::Key(Key::ArrowDown),
            InputEvent::Key(Key::Escape),
        ],
    );

    assert_eq!(camera.scroll(), Vec2::new(SCROLL_SPEED, SCROLL_SPEED * 2.0));
    assert_eq!(commands, vec![Command::ClearSelection]);
}

#[test]
fn minimap_drag_follows_until_release() {
    let mut dispatcher = InputDispatcher::new();
    let mut camera = camera();

    let _ = dispatch(
        &mut dispatcher,
        &mut camera,
        &[InputEvent::PointerDown {
            surface: Surface::Minimap,
            position: Vec2::new(100.0, 60.0),
        }],
    );
    assert!(dispatcher.is_following_minimap());
    assert_eq!(camera.scroll(), Vec2::new(560.0, 340.0));

    let _ = dispatch(
        &mut dispatcher,
        &mut camera,
        &[
            InputEvent::PointerMove {
                surface: Surface::Minimap,
                position: Vec2::new(130.0, 60.0),
            },
            InputEvent::PointerUp {
                surface: Surface::Minimap,
                position: Vec2::new(130.0, 60.0),
            },
        ],
    );
    assert_eq!(camera.scroll(), Vec2::new(880.0, 340.0));
    assert!(!dispatcher.is_following_minimap());

    let before = camera.scroll();
    let _ = dispatch(
        &mut dispatcher,
        &mut camera,
        &[InputEvent::PointerMove {
            surface: Surface::Minimap,
            position: Vec2::new(20.0, 20.0),
        }],
    );
    assert_eq!(camera.scroll(), before, "release stops continuous follow");
}

#[test]
fn clicks_are_dropped_while_a_move_plays() {
    let mut dispatcher = InputDispatcher::new();
    let mut camera = camera();
    let position = Vec2::new(100.0, 100.0);
    let mut commands = Vec::new();

    dispatcher.handle(
        true,
        &[
            InputEvent::PointerDown {
                surface: Surface::MapCanvas,
                position,
            },
            InputEvent::PointerUp {
                surface: Surface::MapCanvas,
                position,
            },
        ],
        &mut camera,
        &Minimap::default(),
        &mut commands,
    );

    assert!(commands.is_empty());
    assert!(!dispatcher.is_pressing());
}

#[test]
fn clicks_resume_once_playback_ends() {
    let mut dispatcher = InputDispatcher::new();
    let mut camera = camera();
    let position = Vec2::new(100.0, 100.0);
    let click = [
        InputEvent::PointerDown {
            surface: Surface::MapCanvas,
            position,
        },
        InputEvent::PointerUp {
            surface: Surface::MapCanvas,
            position,
        },
    ];
    let mut commands = Vec::new();

    dispatcher.handle(true, &click, &mut camera, &Minimap::default(), &mut commands);
    assert!(commands.is_empty());

    dispatcher.handle(false, &click, &mut camera, &Minimap::default(), &mut commands);
    assert_eq!(
        commands,
        vec![Command::ClickTile {
            tile: TileCoord::new(1, 1)
        }],
        "the dispatcher keeps no memory of earlier playback"
    );
}
