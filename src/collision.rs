//! One-tick look-ahead hit prediction.

use log::trace;

use crate::entity::AgentSnapshot;
use crate::threat::DangerousBullets;
use crate::HITBOX_PADDING;

/// Predicts whether any dangerous bullet will overlap the agent's hitbox on
/// the next tick.
///
/// Both the agent and each bullet are extrapolated linearly by `dt` seconds
/// and compared as axis-aligned boxes padded by [`HITBOX_PADDING`]. Missing
/// colliders count as "no hit": an agent without a hitbox is never hit, and a
/// bullet without a collider is skipped.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use cursor_pilot::collision::will_hit_next_frame;
/// use cursor_pilot::entity::{AgentSnapshot, Collider, ProjectileSnapshot};
/// use cursor_pilot::threat::DangerousBullets;
/// let mut agent = AgentSnapshot::new(Vec2::ZERO, 6.0);
/// agent.hitbox = Some(Collider::new(Vec2::splat(0.4)));
/// let mut bullet = ProjectileSnapshot::hostile(Vec2::new(1.5, 0.0), Vec2::NEG_X, 10.0);
/// bullet.collider = Some(Collider::new(Vec2::splat(0.2)));
/// let set = DangerousBullets::new(vec![bullet]).expect("non-empty");
/// assert!(will_hit_next_frame(&agent, &set, 1.0 / 60.0));
/// ```
#[must_use]
pub fn will_hit_next_frame(agent: &AgentSnapshot, bullets: &DangerousBullets, dt: f32) -> bool {
    let Some(hitbox) = agent.hitbox else {
        return false;
    };
    let agent_next = agent.position + agent.velocity * dt;
    let agent_bounds = hitbox.bounds_at(agent_next, HITBOX_PADDING);

    bullets.into_iter().any(|bullet| {
        let Some(collider) = bullet.collider else {
            return false;
        };
        let bullet_next = bullet.position_after(dt);
        let hit = collider
            .bounds_at(bullet_next, HITBOX_PADDING)
            .overlaps(&agent_bounds);
        if hit {
            trace!("predicted hit from bullet at {bullet_next:?}");
        }
        hit
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Collider, ProjectileSnapshot};
    use glam::Vec2;
    use rstest::{fixture, rstest};

    const DT: f32 = 1.0 / 60.0;

    #[fixture]
    fn agent() -> AgentSnapshot {
        let mut agent = AgentSnapshot::new(Vec2::ZERO, 6.0);
        agent.hitbox = Some(Collider::new(Vec2::splat(0.3)));
        agent
    }

    fn bullet(position: Vec2, collider: Option<Collider>) -> ProjectileSnapshot {
        let mut bullet = ProjectileSnapshot::hostile(position, Vec2::NEG_Y, 12.0);
        bullet.collider = collider;
        bullet
    }

    fn set(bullets: Vec<ProjectileSnapshot>) -> DangerousBullets {
        DangerousBullets::new(bullets).expect("test sets are non-empty")
    }

    #[rstest]
    fn close_bullet_hits(agent: AgentSnapshot) {
        let incoming = bullet(Vec2::new(0.0, 1.5), Some(Collider::new(Vec2::splat(0.1))));
        assert!(will_hit_next_frame(&agent, &set(vec![incoming]), DT));
    }

    #[rstest]
    fn distant_bullet_misses(agent: AgentSnapshot) {
        let incoming = bullet(Vec2::new(0.0, 2.4), Some(Collider::new(Vec2::splat(0.1))));
        assert!(!will_hit_next_frame(&agent, &set(vec![incoming]), DT));
    }

    #[rstest]
    fn agent_motion_is_extrapolated(mut agent: AgentSnapshot) {
        let incoming = bullet(Vec2::new(0.0, 2.4), Some(Collider::new(Vec2::splat(0.1))));
        agent.velocity = Vec2::new(0.0, 60.0);
        assert!(will_hit_next_frame(&agent, &set(vec![incoming]), DT));
    }

    #[rstest]
    fn missing_agent_hitbox_is_safe(mut agent: AgentSnapshot) {
        agent.hitbox = None;
        let incoming = bullet(Vec2::new(0.0, 0.5), Some(Collider::new(Vec2::splat(0.1))));
        assert!(!will_hit_next_frame(&agent, &set(vec![incoming]), DT));
    }

    #[rstest]
    fn every_bullet_is_checked(agent: AgentSnapshot) {
        let grazing = bullet(Vec2::new(2.0, 2.0), Some(Collider::new(Vec2::splat(0.1))));
        let blind = bullet(Vec2::new(0.0, 0.5), None);
        let hitting = bullet(Vec2::new(0.0, 1.0), Some(Collider::new(Vec2::splat(0.1))));
        assert!(will_hit_next_frame(
            &agent,
            &set(vec![grazing, blind, hitting]),
            DT
        ));
    }
}
