//! End-to-end runs through the sandbox, driven only by input events.

use glam::Vec2;
use inkfall_engine::{
    InputEvent, Sandbox, SandboxConfig, WindowId, WindowRect, WindowUpdate, WorldState,
};

const FRAME: f32 = 1.0 / 60.0;

fn mounted() -> Sandbox {
    let mut sandbox = Sandbox::new(SandboxConfig::default());
    sandbox.mount(800.0, 600.0);
    sandbox
}

fn stroke(sandbox: &mut Sandbox, points: &[(f32, f32)]) {
    let (x, y) = points[0];
    sandbox.push_input(InputEvent::PointerDown { x, y });
    for &(x, y) in &points[1..] {
        sandbox.push_input(InputEvent::PointerMove { x, y });
    }
    let (x, y) = points[points.len() - 1];
    sandbox.push_input(InputEvent::PointerUp { x, y });
}

fn window(id: &str, x: f32, y: f32, w: f32, h: f32) -> InputEvent {
    InputEvent::Window(WindowUpdate::Geometry {
        id: WindowId::from(id),
        rect: WindowRect::new(x, y, w, h),
    })
}

#[test]
fn horizontal_stroke_launches_marble_rightward() {
    let mut sandbox = mounted();
    stroke(&mut sandbox, &[(100.0, 100.0), (300.0, 100.0)]);
    sandbox.push_input(InputEvent::Spawn);
    sandbox.tick(FRAME);

    let world = sandbox.world();
    let dir = world.first_stroke_direction().expect("direction after first stroke");
    assert!((dir.x - 1.0).abs() < 1e-5 && dir.y.abs() < 1e-5, "direction {:?}", dir);

    let id = world.marble_ids()[0];
    let v = world.marble_velocity(id).expect("marble is live");
    assert!(v.x > 0.0, "vx should follow the stroke: {}", v.x);
    assert!(v.y >= 12.0, "vy should include the downward bias: {}", v.y);
}

#[test]
fn spawn_without_spawn_point_is_ignored() {
    let mut sandbox = mounted();
    sandbox.push_input(InputEvent::Spawn);
    sandbox.tick(FRAME);
    assert_eq!(sandbox.world().marble_count(), 0);
}

#[test]
fn marble_cap_evicts_oldest() {
    let mut sandbox = mounted();
    stroke(&mut sandbox, &[(100.0, 100.0), (300.0, 100.0)]);
    for _ in 0..50 {
        sandbox.push_input(InputEvent::Spawn);
    }
    sandbox.tick(0.0);
    let first = sandbox.world().marble_ids()[0];
    assert_eq!(sandbox.world().marble_count(), 50);

    sandbox.push_input(InputEvent::Spawn);
    sandbox.tick(0.0);
    assert_eq!(sandbox.world().marble_count(), 50);
    assert!(!sandbox.world().marble_ids().contains(&first));
}

#[test]
fn window_insert_then_remove() {
    let mut sandbox = mounted();
    sandbox.push_input(window("W1", 100.0, 100.0, 300.0, 200.0));
    sandbox.tick(FRAME);
    assert!(sandbox.world().window_collider(&WindowId::from("W1")).is_some());

    sandbox.push_input(InputEvent::Window(WindowUpdate::Removed {
        id: WindowId::from("W1"),
    }));
    sandbox.tick(FRAME);
    assert!(sandbox.world().window_collider(&WindowId::from("W1")).is_none());
    assert_eq!(sandbox.world().window_collider_count(), 0);
}

#[test]
fn window_updates_within_one_frame_resolve_last_write_wins() {
    let mut sandbox = mounted();
    sandbox.push_input(window("W1", 0.0, 0.0, 100.0, 100.0));
    sandbox.push_input(window("W1", 200.0, 50.0, 100.0, 100.0));
    sandbox.tick(FRAME);
    assert_eq!(
        sandbox.world().window_collider(&WindowId::from("W1")),
        Some(WindowRect::new(200.0, 50.0, 100.0, 100.0))
    );
}

#[test]
fn clear_keeps_walls_and_windows() {
    let mut sandbox = mounted();
    stroke(&mut sandbox, &[(100.0, 100.0), (200.0, 150.0), (300.0, 150.0)]);
    sandbox.push_input(window("W1", 400.0, 300.0, 200.0, 100.0));
    sandbox.tick(FRAME);
    assert_eq!(sandbox.world().static_collider_count(), 2);

    sandbox.push_input(InputEvent::Clear);
    sandbox.tick(FRAME);

    let world = sandbox.world();
    assert_eq!(world.static_collider_count(), 0);
    assert_eq!(world.wall_count(), 2);
    assert_eq!(world.window_collider_count(), 1);
    assert!(world.spawn_point().is_none());

    // a new session picks a new spawn point once its first stroke completes
    sandbox.push_input(InputEvent::PointerDown { x: 500.0, y: 500.0 });
    sandbox.tick(FRAME);
    assert!(sandbox.world().spawn_point().is_none());
    sandbox.push_input(InputEvent::PointerMove { x: 600.0, y: 500.0 });
    sandbox.push_input(InputEvent::PointerUp { x: 600.0, y: 500.0 });
    sandbox.tick(FRAME);
    assert_eq!(sandbox.world().spawn_point(), Some(Vec2::new(510.0, 495.0)));
}

#[test]
fn resize_regenerates_walls_only() {
    let mut sandbox = mounted();
    stroke(&mut sandbox, &[(100.0, 100.0), (300.0, 100.0)]);
    sandbox.push_input(InputEvent::Spawn);
    sandbox.tick(FRAME);

    sandbox.push_input(InputEvent::Resize {
        width: 1200.0,
        height: 600.0,
    });
    sandbox.tick(FRAME);

    let world = sandbox.world();
    assert_eq!(world.wall_count(), 2);
    let walls = world.wall_positions();
    assert!((walls[0].x + 50.0).abs() < 0.001, "left wall at {:?}", walls[0]);
    assert!((walls[1].x - 1250.0).abs() < 0.001, "right wall at {:?}", walls[1]);
    assert_eq!(world.static_collider_count(), 1);
    assert_eq!(world.marble_count(), 1);
}

#[test]
fn marble_rolls_off_the_ink_and_is_culled() {
    let mut sandbox = mounted();
    // gentle slope down to the right, ending mid-screen
    stroke(&mut sandbox, &[(100.0, 200.0), (250.0, 230.0), (400.0, 260.0)]);
    sandbox.push_input(InputEvent::Spawn);
    sandbox.tick(FRAME);
    assert_eq!(sandbox.world().marble_count(), 1);

    for _ in 0..(60 * 15) {
        sandbox.tick(FRAME);
        if sandbox.world().marble_count() == 0 {
            break;
        }
    }
    assert_eq!(sandbox.world().marble_count(), 0, "marble should leave the screen and be culled");
}

#[test]
fn marble_rests_on_a_window() {
    let mut sandbox = mounted();
    // spans wall to wall so the marble cannot roll off an edge
    sandbox.push_input(window("W1", 0.0, 300.0, 800.0, 200.0));
    // short stroke heading down-right, away from the marble's fall
    stroke(&mut sandbox, &[(390.0, 200.0), (405.0, 226.0)]);
    sandbox.push_input(InputEvent::Spawn);
    for _ in 0..(60 * 4) {
        sandbox.tick(FRAME);
        let marble = sandbox.world().marbles().next().expect("marble should still be live");
        assert!(marble.position.y < 300.0, "marble fell through the window: {:?}", marble.position);
    }
}

#[test]
fn click_then_spawn_launches_nothing() {
    let mut sandbox = mounted();
    sandbox.push_input(InputEvent::PointerDown { x: 390.0, y: 200.0 });
    sandbox.push_input(InputEvent::PointerUp { x: 390.0, y: 200.0 });
    sandbox.push_input(InputEvent::Spawn);
    sandbox.tick(0.0);
    assert_eq!(sandbox.world().static_collider_count(), 0);
    assert!(sandbox.world().spawn_point().is_none());
    assert_eq!(sandbox.world().marble_count(), 0);
}

#[test]
fn spawn_mid_stroke_launches_nothing() {
    let mut sandbox = mounted();
    sandbox.push_input(InputEvent::PointerDown { x: 100.0, y: 100.0 });
    sandbox.push_input(InputEvent::PointerMove { x: 250.0, y: 120.0 });
    sandbox.push_input(InputEvent::Spawn);
    sandbox.tick(0.0);
    assert_eq!(sandbox.world().static_collider_count(), 0);
    assert_eq!(sandbox.world().marble_count(), 0);
}

#[test]
fn pointer_cancel_finishes_stroke() {
    let mut sandbox = mounted();
    sandbox.push_input(InputEvent::PointerDown { x: 100.0, y: 100.0 });
    sandbox.push_input(InputEvent::PointerMove { x: 200.0, y: 100.0 });
    sandbox.push_input(InputEvent::PointerCancel);
    sandbox.tick(FRAME);
    assert!(!sandbox.capture().is_drawing());
    assert_eq!(sandbox.world().static_collider_count(), 1);
}

#[test]
fn short_jitter_produces_no_colliders() {
    let mut sandbox = mounted();
    stroke(&mut sandbox, &[(100.0, 100.0), (102.0, 101.0), (103.0, 103.0), (104.0, 100.0)]);
    sandbox.tick(FRAME);
    assert_eq!(sandbox.world().static_collider_count(), 0);
    // the ink is still drawn
    assert_eq!(sandbox.capture().finished_segments().len(), 3);
}

#[test]
fn dispose_makes_everything_a_noop() {
    let mut sandbox = mounted();
    stroke(&mut sandbox, &[(100.0, 100.0), (300.0, 100.0)]);
    sandbox.tick(FRAME);
    sandbox.dispose();

    sandbox.push_input(InputEvent::Spawn);
    sandbox.push_input(window("W1", 0.0, 0.0, 100.0, 100.0));
    sandbox.tick(FRAME);

    assert_eq!(sandbox.state(), WorldState::Disposed);
    assert_eq!(sandbox.world().body_count(), 0);
    assert_eq!(sandbox.world().marble_count(), 0);
    assert_eq!(sandbox.frame().ink.vertex_count(), 0);
}

#[test]
fn config_from_partial_json() {
    let config = SandboxConfig::from_json(r#"{"seed": 7, "physics": {"gravity": 500.0}}"#)
        .expect("valid json");
    assert_eq!(config.seed, 7);
    assert_eq!(config.physics.gravity, 500.0);
    assert_eq!(config.marbles.max_marbles, 50);

    let mut sandbox = Sandbox::new(config);
    sandbox.mount(640.0, 480.0);
    assert_eq!(sandbox.state(), WorldState::Running);
}
