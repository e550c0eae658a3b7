//! Systems for the demo world: scene setup and fly camera controls.
use bevy::{
    ecs::message::MessageReader,
    input::{mouse::MouseMotion, ButtonInput},
    math::primitives::{Cuboid, Cylinder, Plane3d},
    prelude::*,
    window::{CursorGrabMode, CursorOptions},
};

use crate::{
    compass::{config::CompassSettings, resolve::NEEDLE_NAME, tracker::HeadingTracker},
    interaction::components::{Grabbable, Player},
    world::components::{FlyCamera, NorthMarker},
};

const GROUND_SCALE: f32 = 60.0;
const CAMERA_START_POS: Vec3 = Vec3::new(0.0, 1.7, -2.0);
const PEDESTAL_HEIGHT: f32 = 0.9;
const COMPASS_RADIUS: f32 = 0.18;
const COMPASS_THICKNESS: f32 = 0.04;
const NORTH_MARKER_DISTANCE: f32 = 40.0;

/// Spawns the ground, light, pedestal, north landmark, and the player camera.
pub fn spawn_world_environment(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<CompassSettings>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Mesh::from(Plane3d::default()))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb_u8(96, 128, 84),
            perceptual_roughness: 0.9,
            metallic: 0.0,
            ..default()
        })),
        Transform::from_scale(Vec3::splat(GROUND_SCALE)),
        Name::new("Ground"),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(8.0, 16.0, -6.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Sun"),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Cuboid::new(0.4, PEDESTAL_HEIGHT, 0.4))),
        MeshMaterial3d(materials.add(Color::srgb(0.45, 0.42, 0.38))),
        Transform::from_xyz(0.0, PEDESTAL_HEIGHT / 2.0, 0.0),
        Name::new("Pedestal"),
    ));

    let north = settings.tracker.north;
    commands.spawn((
        Mesh3d(meshes.add(Cylinder::new(0.4, 8.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.8, 0.15, 0.1))),
        Transform::from_translation(north * NORTH_MARKER_DISTANCE + Vec3::Y * 4.0),
        NorthMarker,
        Name::new("North Marker"),
    ));

    let camera_transform =
        Transform::from_translation(CAMERA_START_POS).looking_at(Vec3::new(0.0, 0.9, 0.0), Vec3::Y);
    let (yaw, pitch) = yaw_pitch_from_transform(&camera_transform);

    commands.spawn((
        Camera3d::default(),
        camera_transform,
        FlyCamera::new(yaw, pitch),
        Player,
        Name::new("Player Hand"),
    ));
}

/// Spawns the compass body on the pedestal with a child named after [`NEEDLE_NAME`].
///
/// The needle is left for the tracker to find by name.
pub fn spawn_compass(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<CompassSettings>,
) {
    let brass = materials.add(StandardMaterial {
        base_color: Color::srgb(0.72, 0.55, 0.25),
        metallic: 0.8,
        perceptual_roughness: 0.35,
        ..default()
    });
    let north_tip = materials.add(Color::srgb(0.85, 0.1, 0.1));
    let south_tip = materials.add(Color::srgb(0.92, 0.92, 0.92));
    let half_needle = meshes.add(Cuboid::new(0.02, 0.01, COMPASS_RADIUS * 0.8));

    commands
        .spawn((
            Mesh3d(meshes.add(Cylinder::new(COMPASS_RADIUS, COMPASS_THICKNESS))),
            MeshMaterial3d(brass),
            Transform::from_xyz(0.0, PEDESTAL_HEIGHT + COMPASS_THICKNESS / 2.0, 0.0)
                .with_rotation(Quat::from_rotation_y(0.8)),
            HeadingTracker::new(settings.tracker),
            Grabbable::default(),
            Name::new("Compass"),
        ))
        .with_children(|body| {
            body.spawn((
                Transform::from_xyz(0.0, COMPASS_THICKNESS / 2.0 + 0.01, 0.0),
                Visibility::default(),
                Name::new(NEEDLE_NAME),
            ))
            .with_children(|needle| {
                needle.spawn((
                    Mesh3d(half_needle.clone()),
                    MeshMaterial3d(north_tip),
                    Transform::from_xyz(0.0, 0.0, COMPASS_RADIUS * 0.4),
                ));
                needle.spawn((
                    Mesh3d(half_needle),
                    MeshMaterial3d(south_tip),
                    Transform::from_xyz(0.0, 0.0, -COMPASS_RADIUS * 0.4),
                ));
            });
        });

    info!("Compass spawned; press E near it to pick it up, Z/X/R/F to twist it");
}

/// Toggles cursor grab when engaging the fly camera look mode.
pub fn update_cursor_grab(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor_options: Single<&mut CursorOptions>,
) {
    if mouse_buttons.just_pressed(MouseButton::Right) {
        cursor_options.visible = false;
        cursor_options.grab_mode = CursorGrabMode::Locked;
    } else if mouse_buttons.just_released(MouseButton::Right) {
        cursor_options.visible = true;
        cursor_options.grab_mode = CursorGrabMode::None;
    }
}

/// Applies mouse look to the fly camera while the right mouse button is held.
pub fn fly_camera_mouse_look(
    mut motion_events: MessageReader<MouseMotion>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut query: Query<(&mut FlyCamera, &mut Transform)>,
) {
    let cumulative_delta: Vec2 = motion_events.read().map(|ev| ev.delta).sum();

    if !mouse_buttons.pressed(MouseButton::Right) || cumulative_delta == Vec2::ZERO {
        return;
    }

    let Ok((mut fly_cam, mut transform)) = query.single_mut() else {
        return;
    };

    let sensitivity = fly_cam.look_sensitivity * time.delta_secs();
    fly_cam.yaw -= cumulative_delta.x * sensitivity;
    fly_cam.pitch = (fly_cam.pitch - cumulative_delta.y * sensitivity).clamp(-1.54, 1.54);

    transform.rotation = (Quat::from_rotation_y(fly_cam.yaw)
        * Quat::from_rotation_x(fly_cam.pitch))
    .normalize();
}

/// Walks the fly camera with WASD, Space/LShift for height.
pub fn fly_camera_translate(
    keyboard: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut query: Query<(&FlyCamera, &mut Transform)>,
) {
    let Ok((fly_cam, mut transform)) = query.single_mut() else {
        return;
    };

    let forward = {
        let f = transform.forward().as_vec3();
        Vec3::new(f.x, 0.0, f.z).normalize_or_zero()
    };
    let right = {
        let r = transform.right().as_vec3();
        Vec3::new(r.x, 0.0, r.z).normalize_or_zero()
    };

    let bindings = [
        (KeyCode::KeyW, forward),
        (KeyCode::KeyS, -forward),
        (KeyCode::KeyA, -right),
        (KeyCode::KeyD, right),
        (KeyCode::Space, Vec3::Y),
        (KeyCode::ShiftLeft, -Vec3::Y),
    ];
    let direction: Vec3 = bindings
        .iter()
        .filter(|(key, _)| keyboard.pressed(*key))
        .map(|(_, dir)| *dir)
        .sum();

    if direction.length_squared() > 0.0 {
        transform.translation += direction.normalize() * fly_cam.move_speed * time.delta_secs();
    }
}

/// Yaw/pitch that reproduce the transform's facing with `Ry(yaw) * Rx(pitch)`.
fn yaw_pitch_from_transform(transform: &Transform) -> (f32, f32) {
    let forward = transform.forward().as_vec3();
    let yaw = (-forward.x).atan2(-forward.z);
    let pitch = forward.y.clamp(-1.0, 1.0).asin();
    (yaw, pitch)
}
