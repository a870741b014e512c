//! Read-only snapshots of the actors the controller reasons about.
//!
//! Hosts rebuild these every tick from their own live registries; the
//! controller never holds on to them between ticks.
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::vector_math::vec_normalize;

/// Axis-aligned collider described by its half-extents around a centre.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Collider {
    pub half_extents: Vec2,
}

impl Collider {
    /// Creates a collider with the given half-extents.
    #[must_use]
    pub const fn new(half_extents: Vec2) -> Self {
        Self { half_extents }
    }

    /// Returns the bounding box centred on `centre`, grown by `padding` on
    /// every side.
    #[must_use]
    pub fn bounds_at(&self, centre: Vec2, padding: f32) -> Aabb {
        let reach = self.half_extents + Vec2::splat(padding);
        Aabb {
            min: centre - reach,
            max: centre + reach,
        }
    }
}

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Returns `true` when the boxes touch or overlap.
    ///
    /// # Examples
    /// ```
    /// use glam::Vec2;
    /// use cursor_pilot::entity::Aabb;
    /// let a = Aabb { min: Vec2::ZERO, max: Vec2::ONE };
    /// let b = Aabb { min: Vec2::splat(1.0), max: Vec2::splat(2.0) };
    /// assert!(a.overlaps(&b));
    /// ```
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
    }
}

/// State of the controlled character for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub position: Vec2,
    /// Velocity the host applied during the previous tick.
    #[serde(default)]
    pub velocity: Vec2,
    /// Base movement speed in units per second.
    pub speed: f32,
    /// Whether the character is flagged as fighting; door frames are only
    /// crossable while this is `false`.
    #[serde(default)]
    pub in_combat: bool,
    #[serde(default)]
    pub rolling: bool,
    /// `false` while a cutscene, menu or similar blocks all input.
    #[serde(default = "default_true")]
    pub accepting_input: bool,
    #[serde(default)]
    pub hitbox: Option<Collider>,
}

const fn default_true() -> bool {
    true
}

impl AgentSnapshot {
    /// Creates an idle agent that accepts input and has no hitbox.
    #[must_use]
    pub const fn new(position: Vec2, speed: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            speed,
            in_combat: false,
            rolling: false,
            accepting_input: true,
            hitbox: None,
        }
    }
}

/// Who fired a projectile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Owner {
    /// Fired by the controlled character; never a threat.
    Agent,
    #[default]
    Hostile,
}

/// A live projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileSnapshot {
    pub position: Vec2,
    /// Heading; normalised again before use.
    pub direction: Vec2,
    pub speed: f32,
    #[serde(default)]
    pub owner: Owner,
    #[serde(default)]
    pub collider: Option<Collider>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl ProjectileSnapshot {
    /// Creates an active hostile projectile without a collider.
    #[must_use]
    pub const fn hostile(position: Vec2, direction: Vec2, speed: f32) -> Self {
        Self {
            position,
            direction,
            speed,
            owner: Owner::Hostile,
            collider: None,
            active: true,
        }
    }

    /// Velocity derived from the normalised heading and speed.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        vec_normalize(self.direction) * self.speed
    }

    /// Linear extrapolation of the projectile's position after `seconds`.
    #[must_use]
    pub fn position_after(&self, seconds: f32) -> Vec2 {
        self.position + self.velocity() * seconds
    }

    /// Active projectiles that were not fired by the agent.
    #[must_use]
    pub fn is_threat(&self) -> bool {
        self.active && self.owner != Owner::Agent
    }
}

/// A live enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySnapshot {
    pub position: Vec2,
    #[serde(default = "default_true")]
    pub alive: bool,
    #[serde(default)]
    pub boss: bool,
    /// Allied followers share the enemy registry but are never targets.
    #[serde(default)]
    pub companion: bool,
}

impl EnemySnapshot {
    /// Creates a living, ordinary enemy.
    #[must_use]
    pub const fn new(position: Vec2) -> Self {
        Self {
            position,
            alive: true,
            boss: false,
            companion: false,
        }
    }

    /// Living enemies that are not allied companions.
    #[must_use]
    pub const fn is_hostile(&self) -> bool {
        self.alive && !self.companion
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    #[rstest]
    #[case::overlapping(Vec2::new(0.5, 0.5), true)]
    #[case::touching(Vec2::new(2.0, 0.0), true)]
    #[case::apart(Vec2::new(2.1, 0.0), false)]
    fn unit_boxes_overlap(#[case] offset: Vec2, #[case] expected: bool) {
        let collider = Collider::new(Vec2::splat(1.0));
        let a = collider.bounds_at(Vec2::ZERO, 0.0);
        let b = collider.bounds_at(offset, 0.0);
        assert_eq!(a.overlaps(&b), expected);
    }

    #[rstest]
    fn padding_grows_both_sides() {
        let bounds = Collider::new(Vec2::new(0.5, 0.25)).bounds_at(Vec2::ONE, 0.25);
        assert_eq!(bounds.min, Vec2::new(0.25, 0.5));
        assert_eq!(bounds.max, Vec2::new(1.75, 1.5));
    }

    #[rstest]
    fn extrapolation_uses_normalised_heading() {
        let bullet = ProjectileSnapshot::hostile(Vec2::ZERO, Vec2::new(0.0, 4.0), 2.0);
        let later = bullet.position_after(0.5);
        assert_relative_eq!(later.x, 0.0);
        assert_relative_eq!(later.y, 1.0);
    }

    #[rstest]
    fn agent_fire_is_never_a_threat() {
        let mut bullet = ProjectileSnapshot::hostile(Vec2::ZERO, Vec2::X, 1.0);
        assert!(bullet.is_threat());
        bullet.owner = Owner::Agent;
        assert!(!bullet.is_threat());
    }

    #[rstest]
    fn snapshot_defaults_from_json() {
        let agent: AgentSnapshot =
            serde_json::from_str(r#"{"position":[1.0,2.0],"speed":6.0}"#)
                .expect("agent snapshot should parse");
        assert!(agent.accepting_input);
        assert!(!agent.rolling);
        assert!(agent.hitbox.is_none());
    }
}
