//! Per-tick view of the world handed to the controller by its host.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::entity::{EnemySnapshot, ProjectileSnapshot};
use crate::grid::RoomId;

/// The room the agent currently stands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    pub id: RoomId,
    /// Rooms with active enemies enable sliding, containment and spacing.
    #[serde(default)]
    pub has_active_enemies: bool,
}

impl RoomSnapshot {
    #[must_use]
    pub const fn new(id: RoomId, has_active_enemies: bool) -> Self {
        Self {
            id,
            has_active_enemies,
        }
    }
}

/// Borrowed registries for a single tick.
#[derive(Debug)]
pub struct WorldSnapshot<'a, C: ?Sized> {
    pub cells: &'a C,
    /// `None` while the agent is between rooms; the controller then idles.
    pub room: Option<RoomSnapshot>,
    pub projectiles: &'a [ProjectileSnapshot],
    pub enemies: &'a [EnemySnapshot],
    /// Seconds elapsed since the previous tick.
    pub dt: f32,
}

impl<'a, C: ?Sized> WorldSnapshot<'a, C> {
    /// A world with no projectiles or enemies.
    #[must_use]
    pub const fn empty(cells: &'a C, room: Option<RoomSnapshot>, dt: f32) -> Self {
        Self {
            cells,
            room,
            projectiles: &[],
            enemies: &[],
            dt,
        }
    }

    /// Whether the current room is fighting.
    #[must_use]
    pub fn in_combat_room(&self) -> bool {
        self.room.is_some_and(|room| room.has_active_enemies)
    }
}

/// Player input sampled for the tick.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TickInput {
    /// Cursor position projected into world space.
    pub cursor: Vec2,
    /// Secondary action, requesting a manual roll towards the cursor.
    pub roll_pressed: bool,
    /// Flips the controller on or off.
    pub toggle_pressed: bool,
}

impl TickInput {
    /// Input with only a cursor position.
    #[must_use]
    pub const fn cursor(cursor: Vec2) -> Self {
        Self {
            cursor,
            roll_pressed: false,
            toggle_pressed: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_room_is_not_combat() {
        let world = WorldSnapshot::<()>::empty(&(), None, 0.1);
        assert!(!world.in_combat_room());
    }

    #[rstest]
    fn input_defaults_from_json() {
        let input: TickInput =
            serde_json::from_str(r#"{"cursor":[3.0,0.0]}"#).expect("input should parse");
        assert_eq!(input, TickInput::cursor(Vec2::new(3.0, 0.0)));
    }
}
