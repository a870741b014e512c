//! Convenience constructors for agent, projectile and enemy snapshots.

use cursor_pilot::entity::{AgentSnapshot, Collider, EnemySnapshot, ProjectileSnapshot};
use glam::Vec2;

/// Half-extent of the agent hitbox used across the tests.
pub const AGENT_HALF_EXTENT: f32 = 0.3;
/// Half-extent of bullet colliders used across the tests.
pub const BULLET_HALF_EXTENT: f32 = 0.1;

/// An idle agent moving at 6 units per second, without a hitbox.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use test_utils::snapshots::agent_at;
/// let agent = agent_at(Vec2::new(1.0, 2.0));
/// assert_eq!(agent.position, Vec2::new(1.0, 2.0));
/// assert!(agent.hitbox.is_none());
/// ```
pub fn agent_at(position: Vec2) -> AgentSnapshot {
    AgentSnapshot::new(position, 6.0)
}

/// An agent with a hitbox, fighting inside a room.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use test_utils::snapshots::armoured_agent_at;
/// let agent = armoured_agent_at(Vec2::ZERO);
/// assert!(agent.hitbox.is_some());
/// assert!(agent.in_combat);
/// ```
pub fn armoured_agent_at(position: Vec2) -> AgentSnapshot {
    let mut agent = agent_at(position);
    agent.hitbox = Some(Collider::new(Vec2::splat(AGENT_HALF_EXTENT)));
    agent.in_combat = true;
    agent
}

/// A hostile bullet without a collider.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use test_utils::snapshots::bullet;
/// let b = bullet(Vec2::new(2.0, 0.0), Vec2::NEG_X);
/// assert!(b.collider.is_none());
/// assert_eq!(b.speed, 10.0);
/// ```
pub fn bullet(position: Vec2, direction: Vec2) -> ProjectileSnapshot {
    ProjectileSnapshot::hostile(position, direction, 10.0)
}

/// A hostile bullet with a small collider.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use test_utils::snapshots::solid_bullet;
/// let b = solid_bullet(Vec2::new(2.0, 0.0), Vec2::NEG_X);
/// assert!(b.collider.is_some());
/// ```
pub fn solid_bullet(position: Vec2, direction: Vec2) -> ProjectileSnapshot {
    let mut projectile = bullet(position, direction);
    projectile.collider = Some(Collider::new(Vec2::splat(BULLET_HALF_EXTENT)));
    projectile
}

/// A living, ordinary enemy.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use test_utils::snapshots::enemy_at;
/// assert!(enemy_at(Vec2::ZERO).is_hostile());
/// ```
pub fn enemy_at(position: Vec2) -> EnemySnapshot {
    EnemySnapshot::new(position)
}

/// A living boss.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use test_utils::snapshots::boss_at;
/// assert!(boss_at(Vec2::ZERO).boss);
/// ```
pub fn boss_at(position: Vec2) -> EnemySnapshot {
    EnemySnapshot {
        boss: true,
        ..EnemySnapshot::new(position)
    }
}

/// An allied companion sharing the enemy registry.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use test_utils::snapshots::companion_at;
/// assert!(!companion_at(Vec2::ZERO).is_hostile());
/// ```
pub fn companion_at(position: Vec2) -> EnemySnapshot {
    EnemySnapshot {
        companion: true,
        ..EnemySnapshot::new(position)
    }
}
