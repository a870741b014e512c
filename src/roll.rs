//! Scoring of evasive roll directions.
//!
//! Eight fixed candidates are filtered by geometry and the combat area, then
//! scored on how far they lead from massed enemies, how far the roll end will
//! be from every projectile when the roll finishes, how congested it is, and
//! how squarely the roll crosses the incoming bullets.

use std::f32::consts::FRAC_1_SQRT_2;

use glam::Vec2;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::area::CombatArea;
use crate::config::RollWeights;
use crate::entity::{AgentSnapshot, EnemySnapshot, ProjectileSnapshot};
use crate::geometry::is_direction_clear;
use crate::grid::CellSource;
use crate::threat::DangerousBullets;
use crate::vector_math::{angle_between_deg, vec_normalize};
use crate::{
    ROLL_COMMAND_COOLDOWN, ROLL_CONGESTION_RADIUS, ROLL_DISTANCE, ROLL_DISTANCE_SCORE_CAP,
    ROLL_DURATION, ROLL_THREAT_RANGE,
};

/// Candidate roll directions in evaluation order. Ties keep the earliest.
pub const ROLL_CANDIDATES: [Vec2; 8] = [
    Vec2::NEG_X,
    Vec2::X,
    Vec2::Y,
    Vec2::NEG_Y,
    Vec2::new(-FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    Vec2::new(-FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
    Vec2::new(FRAC_1_SQRT_2, -FRAC_1_SQRT_2),
];

/// Request for the host to start a roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollCommand {
    pub direction: Vec2,
}

/// Suppresses repeat roll commands until the host reports the roll.
///
/// Hosts usually flag the agent as rolling a tick or two after accepting the
/// command; the latch covers that gap.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RollLatch {
    remaining: f32,
}

impl RollLatch {
    /// Starts the latch after a roll command.
    pub fn engage(&mut self) {
        self.remaining = ROLL_COMMAND_COOLDOWN;
    }

    pub fn decay(&mut self, dt: f32) {
        self.remaining = (self.remaining - dt).max(0.0);
    }

    /// Whether roll commands are currently suppressed.
    #[must_use]
    pub fn is_engaged(&self) -> bool {
        self.remaining > 0.0
    }
}

/// Score terms for a single candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RollScore {
    pub away: f32,
    pub distance: f32,
    pub congestion: u32,
    pub perpendicular: f32,
    pub total: f32,
}

/// World state consulted while choosing a roll.
#[derive(Debug)]
pub struct RollContext<'a, C: ?Sized> {
    pub cells: &'a C,
    pub agent: &'a AgentSnapshot,
    pub area: Option<CombatArea>,
    pub projectiles: &'a [ProjectileSnapshot],
    pub enemies: &'a [EnemySnapshot],
    pub weights: RollWeights,
}

impl<C> RollContext<'_, C>
where
    C: CellSource + ?Sized,
{
    /// Normalised sum of unit vectors towards every living enemy in threat
    /// range, or zero when none is close.
    #[must_use]
    pub fn threat_direction(&self) -> Vec2 {
        let origin = self.agent.position;
        let sum: Vec2 = self
            .enemies
            .iter()
            .filter(|enemy| enemy.alive && origin.distance(enemy.position) <= ROLL_THREAT_RANGE)
            .map(|enemy| vec_normalize(enemy.position - origin))
            .sum();
        vec_normalize(sum)
    }

    /// Whether a roll along `direction` is possible at all.
    #[must_use]
    pub fn is_viable(&self, direction: Vec2) -> bool {
        let end = self.agent.position + direction * ROLL_DISTANCE;
        is_direction_clear(
            self.cells,
            self.agent.position,
            direction,
            ROLL_DISTANCE,
            self.agent.in_combat,
        ) && self.area.map_or(true, |area| area.contains(end))
    }

    /// Scores `direction`, or returns `None` when it is not viable.
    #[must_use]
    pub fn score(
        &self,
        direction: Vec2,
        threat: Vec2,
        dangerous: Option<&DangerousBullets>,
    ) -> Option<RollScore> {
        if !self.is_viable(direction) {
            return None;
        }
        let end = self.agent.position + direction * ROLL_DISTANCE;

        let away = angle_between_deg(direction, threat);

        let (nearest, congestion) = self
            .projectiles
            .iter()
            .filter(|bullet| bullet.is_threat())
            .map(|bullet| end.distance(bullet.position_after(ROLL_DURATION)))
            .fold((f32::INFINITY, 0_u32), |(nearest, crowd), gap| {
                let crowd = if gap < ROLL_CONGESTION_RADIUS {
                    crowd + 1
                } else {
                    crowd
                };
                (nearest.min(gap), crowd)
            });
        // Only an empty field leaves the distance unbounded.
        let distance = if nearest.is_finite() {
            nearest
        } else {
            ROLL_DISTANCE_SCORE_CAP
        };

        let perpendicular = dangerous.map_or(0.0, |set| {
            let sum: f32 = set
                .into_iter()
                .map(|bullet| {
                    let angle = angle_between_deg(direction, vec_normalize(bullet.direction));
                    90.0 - (90.0 - angle).abs()
                })
                .sum();
            #[expect(
                clippy::cast_precision_loss,
                reason = "Dangerous sets hold a handful of bullets."
            )]
            let count = set.len() as f32;
            sum / count
        });

        let w = self.weights;
        #[expect(
            clippy::cast_precision_loss,
            reason = "Congestion counts are small."
        )]
        let penalty = (w.congestion * congestion as f32).min(w.congestion_cap);
        let total = w.away_from_enemies * away + w.bullet_distance * distance
            + w.perpendicular * perpendicular
            - penalty;

        Some(RollScore {
            away,
            distance,
            congestion,
            perpendicular,
            total,
        })
    }
}

/// Picks the best roll direction, or `None` when the agent is already rolling
/// or no candidate survives the geometry and combat-area filters.
///
/// # Examples
/// ```
/// use glam::{IVec2, Vec2};
/// use cursor_pilot::config::RollWeights;
/// use cursor_pilot::entity::AgentSnapshot;
/// use cursor_pilot::grid::{CellGrid, RoomId};
/// use cursor_pilot::roll::{select_roll, RollContext};
/// let rows = vec![".".repeat(15); 15];
/// let grid = CellGrid::from_ascii(&rows, IVec2::ZERO, RoomId(0)).expect("open room");
/// let agent = AgentSnapshot::new(Vec2::splat(7.5), 6.0);
/// let ctx = RollContext {
///     cells: &grid,
///     agent: &agent,
///     area: None,
///     projectiles: &[],
///     enemies: &[],
///     weights: RollWeights::default(),
/// };
/// // Every direction scores the same, so the first candidate wins.
/// assert_eq!(select_roll(&ctx, None).map(|roll| roll.direction), Some(Vec2::NEG_X));
/// ```
#[must_use]
pub fn select_roll<C>(ctx: &RollContext<'_, C>, dangerous: Option<&DangerousBullets>) -> Option<RollCommand>
where
    C: CellSource + ?Sized,
{
    if ctx.agent.rolling {
        return None;
    }
    let threat = ctx.threat_direction();

    let mut best: Option<(Vec2, f32)> = None;
    for direction in ROLL_CANDIDATES {
        let Some(score) = ctx.score(direction, threat, dangerous) else {
            debug!("roll {direction:?} rejected: blocked or outside combat area");
            continue;
        };
        debug!(
            "roll {direction:?}: away {:.1} distance {:.2} perpendicular {:.1} congestion {} = {:.2}",
            score.away, score.distance, score.perpendicular, score.congestion, score.total
        );
        if best.map_or(true, |(_, top)| score.total > top) {
            best = Some((direction, score.total));
        }
    }

    match best {
        Some((direction, total)) => {
            debug!("rolling {direction:?} with score {total:.2}");
            Some(RollCommand { direction })
        }
        None => {
            debug!("no viable roll direction");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{CellGrid, RoomId};
    use approx::assert_relative_eq;
    use glam::IVec2;
    use rstest::{fixture, rstest};

    const SIZE: usize = 15;

    #[fixture]
    fn open_room() -> CellGrid {
        let rows = vec![".".repeat(SIZE); SIZE];
        CellGrid::from_ascii(&rows, IVec2::ZERO, RoomId(0)).expect("open room")
    }

    #[fixture]
    fn agent() -> AgentSnapshot {
        AgentSnapshot::new(Vec2::splat(7.5), 6.0)
    }

    fn context<'a>(
        cells: &'a CellGrid,
        agent: &'a AgentSnapshot,
        projectiles: &'a [ProjectileSnapshot],
        enemies: &'a [EnemySnapshot],
    ) -> RollContext<'a, CellGrid> {
        RollContext {
            cells,
            agent,
            area: None,
            projectiles,
            enemies,
            weights: RollWeights::default(),
        }
    }

    fn chosen(ctx: &RollContext<'_, CellGrid>) -> Option<Vec2> {
        select_roll(ctx, None).map(|roll| roll.direction)
    }

    #[rstest]
    fn candidates_are_unit_length() {
        for candidate in ROLL_CANDIDATES {
            assert_relative_eq!(candidate.length(), 1.0, epsilon = 1e-6);
        }
    }

    #[rstest]
    fn ties_keep_first_candidate(open_room: CellGrid, agent: AgentSnapshot) {
        let ctx = context(&open_room, &agent, &[], &[]);
        assert_eq!(chosen(&ctx), Some(Vec2::NEG_X));
    }

    #[rstest]
    fn empty_field_scores_are_finite(open_room: CellGrid, agent: AgentSnapshot) {
        let ctx = context(&open_room, &agent, &[], &[]);
        let score = ctx.score(Vec2::X, Vec2::ZERO, None).expect("open direction");
        assert_relative_eq!(score.total, 2.0 * ROLL_DISTANCE_SCORE_CAP);
    }

    #[rstest]
    fn far_bullets_still_rank_candidates() {
        let rows = vec![".".repeat(80); 21];
        let grid = CellGrid::from_ascii(&rows, IVec2::ZERO, RoomId(0)).expect("long hall");
        let agent = AgentSnapshot::new(Vec2::new(40.5, 10.5), 6.0);
        let parked = ProjectileSnapshot::hostile(Vec2::new(5.0, 10.5), Vec2::X, 0.0);
        let ctx = context(&grid, &agent, std::slice::from_ref(&parked), &[]);

        let west = ctx.score(Vec2::NEG_X, Vec2::ZERO, None).expect("west open");
        let east = ctx.score(Vec2::X, Vec2::ZERO, None).expect("east open");
        assert_relative_eq!(west.distance, 30.0, epsilon = 1e-4);
        assert_relative_eq!(east.distance, 41.0, epsilon = 1e-4);
        assert_eq!(chosen(&ctx), Some(Vec2::X));
    }

    #[rstest]
    fn spent_bullets_leave_the_distance_capped(open_room: CellGrid, agent: AgentSnapshot) {
        let mut spent = ProjectileSnapshot::hostile(Vec2::new(2.0, 7.5), Vec2::X, 0.0);
        spent.active = false;
        let ctx = context(&open_room, &agent, std::slice::from_ref(&spent), &[]);
        let score = ctx.score(Vec2::NEG_X, Vec2::ZERO, None).expect("left open");
        assert_relative_eq!(score.distance, ROLL_DISTANCE_SCORE_CAP);
        assert_eq!(score.congestion, 0);
    }

    #[rstest]
    fn blocked_candidates_are_skipped(agent: AgentSnapshot) {
        let rows: Vec<String> = (0..SIZE)
            .map(|_| format!("...#{}", ".".repeat(SIZE - 4)))
            .collect();
        let grid = CellGrid::from_ascii(&rows, IVec2::ZERO, RoomId(0)).expect("walled room");
        let ctx = context(&grid, &agent, &[], &[]);
        assert!(!ctx.is_viable(Vec2::NEG_X));
        assert_eq!(chosen(&ctx), Some(Vec2::X));
    }

    #[rstest]
    fn rolls_away_from_enemies(open_room: CellGrid, agent: AgentSnapshot) {
        let enemies = [EnemySnapshot::new(Vec2::new(4.5, 7.5))];
        let ctx = context(&open_room, &agent, &[], &enemies);
        assert_eq!(chosen(&ctx), Some(Vec2::X));
    }

    #[rstest]
    fn distant_enemies_do_not_count(open_room: CellGrid, agent: AgentSnapshot) {
        let enemies = [EnemySnapshot::new(Vec2::new(-5.0, 7.5))];
        let ctx = context(&open_room, &agent, &[], &enemies);
        assert_eq!(ctx.threat_direction(), Vec2::ZERO);
    }

    #[rstest]
    fn congested_landing_is_penalised(open_room: CellGrid, agent: AgentSnapshot) {
        let parked = ProjectileSnapshot::hostile(Vec2::new(2.0, 7.5), Vec2::X, 0.0);
        let ctx = context(&open_room, &agent, std::slice::from_ref(&parked), &[]);
        let left = ctx.score(Vec2::NEG_X, Vec2::ZERO, None).expect("left open");
        assert_eq!(left.congestion, 1);
        assert_relative_eq!(left.distance, 0.0);
        assert_eq!(chosen(&ctx), Some(Vec2::X));
    }

    #[rstest]
    fn crossing_rolls_are_preferred(open_room: CellGrid, agent: AgentSnapshot) {
        let incoming = ProjectileSnapshot::hostile(Vec2::new(7.5, 9.0), Vec2::NEG_Y, 0.0);
        let set = DangerousBullets::new(vec![incoming]).expect("non-empty");
        let ctx = context(&open_room, &agent, &[], &[]);
        let across = ctx.score(Vec2::X, Vec2::ZERO, Some(&set)).expect("open");
        let along = ctx.score(Vec2::NEG_Y, Vec2::ZERO, Some(&set)).expect("open");
        assert_relative_eq!(across.perpendicular, 90.0, epsilon = 1e-4);
        assert_relative_eq!(along.perpendicular, 0.0, epsilon = 1e-4);
    }

    #[rstest]
    fn area_filter_can_reject_everything(open_room: CellGrid, agent: AgentSnapshot) {
        let mut ctx = context(&open_room, &agent, &[], &[]);
        ctx.area = Some(CombatArea {
            min: Vec2::splat(6.0),
            max: Vec2::splat(9.0),
        });
        assert!(chosen(&ctx).is_none());
    }

    #[rstest]
    fn latch_expires_after_cooldown() {
        let mut latch = RollLatch::default();
        assert!(!latch.is_engaged());
        latch.engage();
        latch.decay(ROLL_COMMAND_COOLDOWN / 2.0);
        assert!(latch.is_engaged());
        latch.decay(ROLL_COMMAND_COOLDOWN);
        assert!(!latch.is_engaged());
    }

    #[rstest]
    fn rolling_agent_is_left_alone(open_room: CellGrid, mut agent: AgentSnapshot) {
        agent.rolling = true;
        let ctx = context(&open_room, &agent, &[], &[]);
        assert!(chosen(&ctx).is_none());
    }
}
