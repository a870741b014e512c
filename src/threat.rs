//! Classification of projectiles that are about to reach the agent.

use glam::Vec2;

use crate::entity::{AgentSnapshot, ProjectileSnapshot};
use crate::vector_math::{angle_between_deg, vec_normalize};
use crate::{DANGER_ANGLE_DEG, DANGER_RADIUS};

/// Non-empty set of projectiles judged dangerous this tick.
///
/// The set is rebuilt every tick and never persisted. Its absence is expressed
/// as `None` by [`detect_dangerous_bullets`] rather than as an empty set.
#[derive(Debug, Clone, PartialEq)]
pub struct DangerousBullets(Vec<ProjectileSnapshot>);

impl DangerousBullets {
    /// Wraps `bullets`, returning `None` when the list is empty.
    #[must_use]
    pub fn new(bullets: Vec<ProjectileSnapshot>) -> Option<Self> {
        if bullets.is_empty() {
            None
        } else {
            Some(Self(bullets))
        }
    }

    /// The dangerous projectiles in registry order.
    #[must_use]
    pub fn as_slice(&self) -> &[ProjectileSnapshot] {
        &self.0
    }

    /// Number of dangerous projectiles; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; provided for API symmetry with collections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Normalised sum of the bullets' headings.
    ///
    /// Opposing headings cancel out and yield [`Vec2::ZERO`].
    #[must_use]
    pub fn combined_direction(&self) -> Vec2 {
        let sum: Vec2 = self
            .0
            .iter()
            .map(|bullet| vec_normalize(bullet.direction))
            .sum();
        vec_normalize(sum)
    }
}

impl<'a> IntoIterator for &'a DangerousBullets {
    type Item = &'a ProjectileSnapshot;
    type IntoIter = std::slice::Iter<'a, ProjectileSnapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Whether a single projectile is close to and heading towards the agent.
#[must_use]
pub fn is_dangerous(agent_position: Vec2, bullet: &ProjectileSnapshot) -> bool {
    if !bullet.is_threat() {
        return false;
    }
    let to_agent = agent_position - bullet.position;
    to_agent.length() < DANGER_RADIUS
        && angle_between_deg(to_agent, bullet.direction) < DANGER_ANGLE_DEG
}

/// Collects every projectile that is close to and aimed at the agent.
///
/// Agent-owned and inactive projectiles are ignored. Returns `None` when
/// nothing qualifies so callers can branch on "no threats" directly.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use cursor_pilot::entity::{AgentSnapshot, ProjectileSnapshot};
/// use cursor_pilot::threat::detect_dangerous_bullets;
/// let agent = AgentSnapshot::new(Vec2::ZERO, 6.0);
/// let incoming = ProjectileSnapshot::hostile(Vec2::new(2.0, 0.0), Vec2::NEG_X, 10.0);
/// let set = detect_dangerous_bullets(&agent, &[incoming]).expect("bullet is dangerous");
/// assert_eq!(set.len(), 1);
/// ```
#[must_use]
pub fn detect_dangerous_bullets(
    agent: &AgentSnapshot,
    projectiles: &[ProjectileSnapshot],
) -> Option<DangerousBullets> {
    DangerousBullets::new(
        projectiles
            .iter()
            .filter(|bullet| is_dangerous(agent.position, bullet))
            .copied()
            .collect(),
    )
}
