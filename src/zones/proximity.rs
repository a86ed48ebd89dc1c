use bevy::prelude::*;
use serde::Deserialize;

/// A fixed point of interest in the room.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneDescriptor {
  pub position: Vec3,
  /// Display name shown in the HUD, e.g. "Retro Game Corner".
  pub name: String,
  /// Short tag, e.g. "RETRO GAMES".
  pub label: String,
  pub icon: String,
  pub color: [f32; 3],
}

impl ZoneDescriptor {
  /// HUD text for this zone.
  pub fn caption(&self) -> String {
    format!("{} {}", self.icon, self.name)
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneEvent {
  /// The zone at this index became the active zone.
  Enter(usize),
  /// No zone is in range any more.
  Leave,
}

/// How to pick between zones that are in range at the same time.
#[derive(Deserialize, Default, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TieBreak {
  /// The candidate latest in the zone list wins.
  #[default]
  LastInList,
  /// The closest candidate wins; equal distances fall back to list order.
  Nearest,
}

/// Tracks which zone, if any, the player is standing near.
#[derive(Debug, Clone)]
pub struct ZoneTracker {
  active: Option<usize>,
  radius: f32,
  tie_break: TieBreak,
}

impl ZoneTracker {
  pub fn new(radius: f32, tie_break: TieBreak) -> Self {
    Self {
      active: None,
      radius,
      tie_break,
    }
  }

  pub fn active(&self) -> Option<usize> {
    self.active
  }

  pub fn radius(&self) -> f32 {
    self.radius
  }

  pub fn tie_break(&self) -> TieBreak {
    self.tie_break
  }

  /// Forgets the active zone without emitting an event.
  pub fn reset(&mut self) {
    self.active = None;
  }

  /// Returns an event only when the active zone changes.
  pub fn update(&mut self, player: Vec3, zones: &[ZoneDescriptor]) -> Option<ZoneEvent> {
    match (self.winning_candidate(player, zones), self.active) {
      (Some(index), active) if active != Some(index) => {
        self.active = Some(index);
        Some(ZoneEvent::Enter(index))
      }
      (None, Some(_)) => {
        self.active = None;
        Some(ZoneEvent::Leave)
      }
      _ => None,
    }
  }

  fn winning_candidate(&self, player: Vec3, zones: &[ZoneDescriptor]) -> Option<usize> {
    let mut winner: Option<(usize, f32)> = None;

    for (index, zone) in zones.iter().enumerate() {
      let distance = player.distance(zone.position);
      if distance >= self.radius {
        continue;
      }
      let replaces = match (self.tie_break, winner) {
        (_, None) => true,
        (TieBreak::LastInList, Some(_)) => true,
        (TieBreak::Nearest, Some((_, best))) => distance < best,
      };
      if replaces {
        winner = Some((index, distance));
      }
    }

    winner.map(|(index, _)| index)
  }
}
