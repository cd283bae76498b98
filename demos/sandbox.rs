//! Interactive sandbox: arrows/WASD to walk, double-tap a direction to
//! dash, Space to double-jump. The brown platform is one-way: jump up
//! through it, land on top.
//!
//! Run with `cargo run --example sandbox`.

use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use tapdash_character_controller::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        .add_plugins(LocomotionPlugin::<Rapier2dBackend>::default())
        .add_systems(Startup, setup)
        .run();
}

fn setup(mut commands: Commands) {
    commands.spawn(Camera2d);

    // Floor
    commands.spawn((
        Sprite::from_color(Color::srgb(0.30, 0.32, 0.38), Vec2::new(900.0, 20.0)),
        Transform::from_xyz(0.0, -200.0, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(450.0, 10.0),
        Surface::floor(),
    ));

    // One-way platform
    commands.spawn((
        Sprite::from_color(Color::srgb(0.55, 0.42, 0.26), Vec2::new(180.0, 10.0)),
        Transform::from_xyz(140.0, -60.0, 0.0),
        RigidBody::Fixed,
        Collider::cuboid(90.0, 5.0),
        Surface::platform(),
    ));

    // Player, tuned to pixel scale.
    commands.spawn((
        Sprite::from_color(Color::srgb(0.92, 0.62, 0.20), Vec2::new(24.0, 36.0)),
        Transform::from_xyz(0.0, -100.0, 1.0),
        LocomotionConfig::player()
            .with_ground_speeds(140.0, 220.0)
            .with_dash(380.0, 1800.0)
            .with_air_speed(110.0)
            .with_jump_velocity(420.0)
            .with_fall(400.0, 3.0)
            .with_probe(18.0, 12.0),
        MotionState::default(),
        DirectionalInput::default(),
        GroundContact::default(),
    ));
}
