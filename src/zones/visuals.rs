use std::f32::consts::PI;

use bevy::prelude::*;

use super::ZoneRegistry;
use super::proximity::ZoneDescriptor;

const DISPLAY_SIZE: f32 = 1.5;
/// Radians per second about Y.
const DISPLAY_SPIN_RATE: f32 = 0.6;
const DISPLAY_WOBBLE: f32 = 0.1;
const LIGHT_LUMENS: f32 = 60_000.0;
const LIGHT_PULSE: f32 = 0.3;
const LIGHT_PULSE_RATE: f32 = 2.0;

/// Root entity of a zone's pedestal, display and light.
#[derive(Component)]
pub struct ZoneVisual;

/// The floating cube above a zone's pedestal.
#[derive(Component)]
pub struct ZoneDisplay {
  spin: f32,
  edge_color: Color,
}

#[derive(Component)]
pub struct ZoneLight {
  phase: f32,
}

pub fn spawn_zone_visuals(
  mut commands: Commands,
  mut meshes: ResMut<Assets<Mesh>>,
  mut materials: ResMut<Assets<StandardMaterial>>,
  registry: Res<ZoneRegistry>,
) {
  for (index, zone) in registry.zones.iter().enumerate() {
    spawn_zone(&mut commands, &mut meshes, &mut materials, index, zone);
  }
}

pub(super) fn spawn_zone(
  commands: &mut Commands,
  meshes: &mut Assets<Mesh>,
  materials: &mut Assets<StandardMaterial>,
  index: usize,
  zone: &ZoneDescriptor,
) {
  let [r, g, b] = zone.color;
  let color = Color::srgb(r, g, b);
  let glow = LinearRgba::from(color);

  let pedestal_material = materials.add(StandardMaterial {
    base_color: color,
    emissive: glow * 0.3,
    perceptual_roughness: 0.4,
    metallic: 0.6,
    ..default()
  });
  let display_material = materials.add(StandardMaterial {
    base_color: Color::srgb_u8(0x2a, 0x2a, 0x2a),
    emissive: glow * 0.2,
    perceptual_roughness: 0.3,
    metallic: 0.7,
    ..default()
  });

  commands.spawn((
    ZoneVisual,
    Name::new(format!("Zone: {}", zone.name)),
    Transform::from_translation(zone.position),
    Visibility::default(),
    children![
      (
        Mesh3d(meshes.add(Cuboid::new(2.0, 0.2, 2.0))),
        MeshMaterial3d(pedestal_material),
        Transform::from_xyz(0.0, -0.5, 0.0),
      ),
      (
        ZoneDisplay {
          spin: 0.0,
          edge_color: color,
        },
        Mesh3d(meshes.add(Cuboid::from_length(DISPLAY_SIZE))),
        MeshMaterial3d(display_material),
        Transform::default(),
      ),
      (
        ZoneLight {
          phase: index as f32 * PI,
        },
        PointLight {
          color,
          intensity: LIGHT_LUMENS,
          range: 10.0,
          ..default()
        },
        Transform::from_xyz(0.0, 0.5, 0.0),
      ),
    ],
  ));
}

pub fn animate_zone_displays(
  mut displays: Query<(&mut ZoneDisplay, &mut Transform)>,
  time: Res<Time>,
) {
  let wobble = time.elapsed_secs().sin() * DISPLAY_WOBBLE;
  for (mut display, mut transform) in &mut displays {
    display.spin = (display.spin + DISPLAY_SPIN_RATE * time.delta_secs()) % (2.0 * PI);
    transform.rotation = Quat::from_euler(EulerRot::XYZ, wobble, display.spin, 0.0);
  }
}

/// Zone lights breathe in alternating phase.
pub fn pulse_zone_lights(mut lights: Query<(&ZoneLight, &mut PointLight)>, time: Res<Time>) {
  let t = time.elapsed_secs() * LIGHT_PULSE_RATE;
  for (zone_light, mut light) in &mut lights {
    light.intensity = LIGHT_LUMENS * (1.0 + (t + zone_light.phase).sin() * LIGHT_PULSE);
  }
}

/// Edge glow around each floating display.
pub fn draw_zone_edges(mut gizmos: Gizmos, displays: Query<(&ZoneDisplay, &GlobalTransform)>) {
  for (display, global) in &displays {
    let (_, rotation, translation) = global.to_scale_rotation_translation();
    gizmos.primitive_3d(
      &Cuboid::from_length(DISPLAY_SIZE * 1.01),
      Isometry3d::new(translation, rotation),
      display.edge_color,
    );
  }
}
