//! App-level tests for the locomotion pipeline.
//!
//! These drive a headless Bevy app with the manual-probe backend: the test
//! writes `DirectionalInput` and `GroundContact` by hand and steps the clock
//! deterministically, then checks transforms, state and markers.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use tapdash_character_controller::prelude::*;

const DT: f32 = 1.0 / 60.0;

/// Create a minimal headless app with a deterministic clock, feeding input
/// and ground contact by hand.
fn create_test_app() -> App {
    let mut app = App::new();

    app.add_plugins(MinimalPlugins);
    app.add_plugins(TransformPlugin);
    app.add_plugins(LocomotionPlugin::<ManualProbeBackend>::default());
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        1.0 / 60.0,
    )));
    // No sampler: tests write DirectionalInput directly.
    app.world_mut().remove_resource::<InputBindings>();

    app.finish();
    app.cleanup();
    // First update has a zero delta while the clock starts up.
    app.update();
    app
}

fn spawn_character(app: &mut App) -> Entity {
    app.world_mut()
        .spawn((
            Transform::default(),
            LocomotionConfig::default(),
            MotionState::default(),
            DirectionalInput::default(),
            GroundContact::default(),
        ))
        .id()
}

fn set_floor_contact(app: &mut App, entity: Entity) {
    let mut contact = app.world_mut().get_mut::<GroundContact>(entity).unwrap();
    contact.hit = Some(GroundHit::new(0.2, Vec2::ZERO, SurfaceKind::Floor));
}

fn clear_contact(app: &mut App, entity: Entity) {
    let mut contact = app.world_mut().get_mut::<GroundContact>(entity).unwrap();
    contact.hit = None;
}

fn press_right(app: &mut App, entity: Entity) {
    let mut input = app.world_mut().get_mut::<DirectionalInput>(entity).unwrap();
    input.right.press();
}

fn release_right(app: &mut App, entity: Entity) {
    let mut input = app.world_mut().get_mut::<DirectionalInput>(entity).unwrap();
    input.right.release();
}

fn press_jump(app: &mut App, entity: Entity) {
    let mut input = app.world_mut().get_mut::<DirectionalInput>(entity).unwrap();
    input.jump_just_pressed = true;
}

fn set_axis(app: &mut App, entity: Entity, value: f32) {
    let mut input = app.world_mut().get_mut::<DirectionalInput>(entity).unwrap();
    input.set_axis(value);
}

fn state(app: &App, entity: Entity) -> &MotionState {
    app.world().get::<MotionState>(entity).unwrap()
}

fn translation(app: &App, entity: Entity) -> Vec3 {
    app.world().get::<Transform>(entity).unwrap().translation
}

#[test]
fn held_key_walks_the_character_right() {
    let mut app = create_test_app();
    let character = spawn_character(&mut app);
    set_floor_contact(&mut app, character);

    press_right(&mut app, character);
    for _ in 0..5 {
        app.update();
    }

    let config = LocomotionConfig::default();
    let travelled = translation(&app, character).x;
    let expected = config.walk_speed * DT * 5.0;
    assert!(
        (travelled - expected).abs() < 1e-3,
        "walked {travelled}, expected about {expected}"
    );
    assert_eq!(state(&app, character).current_speed(), config.walk_speed);
    assert!(app.world().get::<Grounded>(character).is_some());
    assert!(app.world().get::<Airborne>(character).is_none());
}

#[test]
fn releasing_the_key_stops_dead() {
    let mut app = create_test_app();
    let character = spawn_character(&mut app);
    set_floor_contact(&mut app, character);

    press_right(&mut app, character);
    for _ in 0..3 {
        app.update();
    }
    release_right(&mut app, character);
    app.update();

    let x_after_release = translation(&app, character).x;
    app.update();
    app.update();

    assert_eq!(translation(&app, character).x, x_after_release);
    assert_eq!(state(&app, character).current_speed(), 0.0);
    assert!(!state(&app, character).is_running());
}

#[test]
fn losing_ground_contact_starts_a_fall() {
    let mut app = create_test_app();
    let character = spawn_character(&mut app);
    set_floor_contact(&mut app, character);
    app.update();
    assert!(app.world().get::<Grounded>(character).is_some());

    clear_contact(&mut app, character);
    for _ in 0..10 {
        app.update();
    }

    assert!(app.world().get::<Airborne>(character).is_some());
    assert!(app.world().get::<Grounded>(character).is_none());
    assert!(translation(&app, character).y < 0.0);
    assert!(state(&app, character).vertical_velocity() < 0.0);
}

#[test]
fn jump_rises_then_landing_restores_the_budget() {
    let mut app = create_test_app();
    let character = spawn_character(&mut app);
    set_floor_contact(&mut app, character);
    app.update();

    press_jump(&mut app, character);
    // The probe would stop seeing the floor as the character rises.
    clear_contact(&mut app, character);
    app.update();

    assert!(state(&app, character).is_airborne());
    assert_eq!(state(&app, character).jumps_used(), 1);
    assert!(translation(&app, character).y > 0.0);

    // Fall until descending, then hand the probe the floor again.
    for _ in 0..300 {
        app.update();
    }
    assert!(state(&app, character).vertical_velocity() < 0.0);

    set_floor_contact(&mut app, character);
    app.update();

    assert!(state(&app, character).is_grounded());
    assert_eq!(state(&app, character).jumps_used(), 0);
    assert!(app.world().get::<Grounded>(character).is_some());
}

#[test]
fn jump_edges_beyond_the_budget_are_ignored() {
    let mut app = create_test_app();
    let character = spawn_character(&mut app);
    set_floor_contact(&mut app, character);
    app.update();

    press_jump(&mut app, character);
    clear_contact(&mut app, character);
    app.update();
    press_jump(&mut app, character);
    app.update();
    assert_eq!(state(&app, character).jumps_used(), 2);

    press_jump(&mut app, character);
    app.update();
    assert_eq!(state(&app, character).jumps_used(), 2);
}

#[test]
fn double_tapped_key_opens_a_dash() {
    let mut app = create_test_app();
    let character = spawn_character(&mut app);
    set_floor_contact(&mut app, character);

    // Tap, release, tap again: three frames, well inside the 0.3s window.
    press_right(&mut app, character);
    app.update();
    release_right(&mut app, character);
    app.update();
    press_right(&mut app, character);
    app.update();

    assert!(state(&app, character).is_running());
    assert!(state(&app, character).is_dashing());

    // Keep holding: the ramp tops out at dash speed, then settles to run.
    for _ in 0..30 {
        app.update();
    }
    let config = LocomotionConfig::default();
    assert!(state(&app, character).is_running());
    assert!(!state(&app, character).is_dashing());
    assert_eq!(state(&app, character).current_speed(), config.run_speed);
}

#[test]
fn sustained_full_deflection_latches_a_run() {
    let mut app = create_test_app();
    let character = spawn_character(&mut app);
    set_floor_contact(&mut app, character);

    set_axis(&mut app, character, 0.95);
    app.update();
    app.update();
    assert!(state(&app, character).is_running());

    // Easing off the stick drops the run.
    set_axis(&mut app, character, 0.5);
    app.update();
    assert!(!state(&app, character).is_running());
}

#[test]
fn input_edges_are_consumed_after_one_frame() {
    let mut app = create_test_app();
    let character = spawn_character(&mut app);
    set_floor_contact(&mut app, character);

    press_jump(&mut app, character);
    clear_contact(&mut app, character);
    app.update();
    assert_eq!(state(&app, character).jumps_used(), 1);

    // The edge was settled in PostUpdate; nothing re-triggers.
    app.update();
    assert_eq!(state(&app, character).jumps_used(), 1);
    assert!(!app
        .world()
        .get::<DirectionalInput>(character)
        .unwrap()
        .jump_just_pressed);
}

#[test]
fn markers_stay_mutually_exclusive_through_transitions() {
    let mut app = create_test_app();
    let character = spawn_character(&mut app);

    for frame in 0..12 {
        if frame % 4 == 0 {
            set_floor_contact(&mut app, character);
        } else if frame % 4 == 2 {
            clear_contact(&mut app, character);
        }
        app.update();

        let grounded = app.world().get::<Grounded>(character).is_some();
        let airborne = app.world().get::<Airborne>(character).is_some();
        assert!(
            grounded != airborne,
            "exactly one marker must be present (frame {frame})"
        );
    }
}
