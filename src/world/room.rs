use bevy::prelude::*;

use crate::config::ConfigLoaded;

const WALL_THICKNESS: f32 = 0.2;

/// Floor, a concrete back wall and two glass side walls.
pub fn spawn_room(
  mut commands: Commands,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
  config: Res<ConfigLoaded>,
) {
  let room = &config.room;
  let size = room.floor_size;
  let half = size / 2.0;
  let wall_y = room.wall_height / 2.0;

  let floor_material = materials.add(StandardMaterial {
    base_color: Color::srgb_u8(0x3a, 0x3a, 0x3a),
    perceptual_roughness: 0.8,
    metallic: 0.2,
    ..default()
  });
  let wall_material = materials.add(StandardMaterial {
    base_color: Color::srgb_u8(0x4a, 0x4a, 0x4a),
    perceptual_roughness: 0.7,
    metallic: 0.1,
    ..default()
  });
  let glass_material = materials.add(StandardMaterial {
    base_color: Color::srgba(1.0, 1.0, 1.0, 0.15),
    alpha_mode: AlphaMode::Blend,
    perceptual_roughness: 0.1,
    metallic: 0.0,
    specular_transmission: 0.9,
    thickness: 0.5,
    ..default()
  });

  commands.spawn((
    Name::new("Floor"),
    Mesh3d(meshes.add(Plane3d::default().mesh().size(size, size))),
    MeshMaterial3d(floor_material),
    Transform::default(),
  ));

  commands.spawn((
    Name::new("Back wall"),
    Mesh3d(meshes.add(Cuboid::new(size, room.wall_height, WALL_THICKNESS))),
    MeshMaterial3d(wall_material),
    Transform::from_xyz(0.0, wall_y, -half),
  ));

  let side_wall = meshes.add(Cuboid::new(WALL_THICKNESS, room.wall_height, size));
  for (name, x) in [("Left wall", -half), ("Right wall", half)] {
    commands.spawn((
      Name::new(name),
      Mesh3d(side_wall.clone()),
      MeshMaterial3d(glass_material.clone()),
      Transform::from_xyz(x, wall_y, 0.0),
    ));
  }

  debug!("Spawned room {}x{}", size, size);
}

pub fn spawn_lighting(mut commands: Commands) {
  commands.spawn((
    Name::new("Main light"),
    DirectionalLight {
      illuminance: 4_000.0,
      shadows_enabled: true,
      ..default()
    },
    Transform::from_xyz(5.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
  ));
}
