//! Per-tick behaviour selection for a single agent.
//!
//! [`PilotController`] owns all state that survives between ticks: the
//! enabled flag, the slide memory, the combat-area cache and the roll latch.
//! Everything else is recomputed from the snapshots on every call to
//! [`PilotController::tick`].
//!
//! Priority, evaluated each tick while the agent is not rolling:
//!
//! 1. dangerous bullets present: roll when a hit is imminent, otherwise
//!    sidestep them;
//! 2. room still fighting: keep the nearest enemy at a comfortable range;
//! 3. otherwise follow the cursor.
//!
//! A manual roll request is honoured afterwards if nothing else rolled.

use glam::Vec2;
use log::{debug, info, warn};
use ordered_float::OrderedFloat;

use crate::area::{CombatArea, CombatAreaCache, Segment};
use crate::collision::will_hit_next_frame;
use crate::config::PilotConfig;
use crate::entity::{AgentSnapshot, EnemySnapshot};
use crate::grid::CellSource;
use crate::movement::{try_move, MoveContext};
use crate::roll::{select_roll, RollCommand, RollContext, RollLatch};
use crate::slide::SlideMemory;
use crate::threat::{detect_dangerous_bullets, DangerousBullets};
use crate::vector_math::{angle_between_deg, perpendicular_left, perpendicular_right, vec_normalize};
use crate::world::{TickInput, WorldSnapshot};
use crate::{
    BOSS_ENEMY_DISTANCE_THRESHOLD, BOSS_IDEAL_ENEMY_DISTANCE, CURSOR_FOLLOW_DEADZONE,
    ENEMY_DISTANCE_THRESHOLD, ENEMY_PANIC_DISTANCE, IDEAL_ENEMY_DISTANCE,
    MIN_MANUAL_ROLL_LENGTH, OUT_OF_COMBAT_SPEED_MULTIPLIER, RETREAT_WEIGHT,
};

/// Which branch produced a tick's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Behaviour {
    /// Switched off by the toggle.
    Disabled,
    /// The agent is not inside any room.
    NoRoom,
    /// The host is not accepting input.
    InputBlocked,
    /// A roll is in progress; only a manual roll may be queued.
    Rolling,
    /// Imminent hit; a roll was attempted.
    Dodge,
    AvoidBullets,
    /// An enemy got too close; a roll was attempted.
    PanicRoll,
    KeepSpacing,
    FollowCursor,
    /// Within the spacing band or cursor dead zone.
    Hold,
    /// Fighting room without a living enemy.
    Idle,
}

/// Commands produced by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    pub behaviour: Behaviour,
    /// Velocity to apply; `None` leaves the host's velocity untouched.
    pub velocity: Option<Vec2>,
    pub roll: Option<RollCommand>,
    /// Combat-area outline when border drawing is enabled.
    pub combat_border: Option<[Segment; 4]>,
}

impl TickOutput {
    const fn untouched(behaviour: Behaviour) -> Self {
        Self {
            behaviour,
            velocity: None,
            roll: None,
            combat_border: None,
        }
    }
}

/// Autonomous movement controller for one agent.
#[derive(Debug, Clone)]
pub struct PilotController {
    config: PilotConfig,
    enabled: bool,
    slide: SlideMemory,
    area: CombatAreaCache,
    latch: RollLatch,
}

impl Default for PilotController {
    fn default() -> Self {
        Self::new(PilotConfig::default())
    }
}

/// Values shared by the behaviours of a single tick.
struct Frame<'w, 'a, C: ?Sized> {
    agent: &'a AgentSnapshot,
    world: &'a WorldSnapshot<'w, C>,
    area: Option<CombatArea>,
    combat_room: bool,
}

impl<C> Frame<'_, '_, C>
where
    C: CellSource + ?Sized,
{
    fn movement(&self) -> MoveContext<'_, C> {
        MoveContext {
            cells: self.world.cells,
            position: self.agent.position,
            in_combat: self.agent.in_combat,
            combat_room: self.combat_room,
            area: self.area,
            dt: self.world.dt,
        }
    }
}

impl PilotController {
    /// Creates an enabled controller.
    #[must_use]
    pub fn new(config: PilotConfig) -> Self {
        Self {
            config,
            enabled: true,
            slide: SlideMemory::default(),
            area: CombatAreaCache::default(),
            latch: RollLatch::default(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &PilotConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: PilotConfig) {
        self.config = config;
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Flips the enabled state and returns the new value.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        info!(
            "cursor pilot {}",
            if self.enabled { "enabled" } else { "disabled" }
        );
        self.enabled
    }

    #[must_use]
    pub const fn slide_memory(&self) -> &SlideMemory {
        &self.slide
    }

    /// The cached combat area, if the agent's room is fighting.
    #[must_use]
    pub const fn combat_area(&self) -> Option<CombatArea> {
        self.area.current()
    }

    /// Advances the controller by one tick.
    ///
    /// # Examples
    /// ```
    /// use glam::{IVec2, Vec2};
    /// use cursor_pilot::controller::{Behaviour, PilotController};
    /// use cursor_pilot::entity::AgentSnapshot;
    /// use cursor_pilot::grid::{CellGrid, RoomId};
    /// use cursor_pilot::world::{RoomSnapshot, TickInput, WorldSnapshot};
    /// let rows = vec![".".repeat(10); 5];
    /// let grid = CellGrid::from_ascii(&rows, IVec2::ZERO, RoomId(0)).expect("open room");
    /// let world = WorldSnapshot::empty(&grid, Some(RoomSnapshot::new(RoomId(0), false)), 0.1);
    /// let agent = AgentSnapshot::new(Vec2::new(2.5, 2.5), 4.0);
    /// let mut pilot = PilotController::default();
    /// let out = pilot.tick(&agent, &world, &TickInput::cursor(Vec2::new(7.5, 2.5)));
    /// assert_eq!(out.behaviour, Behaviour::FollowCursor);
    /// assert_eq!(out.velocity, Some(Vec2::new(4.0, 0.0)));
    /// ```
    pub fn tick<C>(
        &mut self,
        agent: &AgentSnapshot,
        world: &WorldSnapshot<'_, C>,
        input: &TickInput,
    ) -> TickOutput
    where
        C: CellSource + ?Sized,
    {
        if input.toggle_pressed {
            self.toggle();
        }
        if !self.enabled {
            return TickOutput::untouched(Behaviour::Disabled);
        }
        let Some(room) = world.room else {
            return TickOutput::untouched(Behaviour::NoRoom);
        };
        if !agent.accepting_input {
            return TickOutput {
                velocity: Some(Vec2::ZERO),
                ..TickOutput::untouched(Behaviour::InputBlocked)
            };
        }

        self.slide.decay(world.dt);
        self.latch.decay(world.dt);
        let combat_room = world.in_combat_room();
        let frame = Frame {
            agent,
            world,
            area: self.area.refresh(world.cells, room.id, combat_room),
            combat_room,
        };
        let dangerous = detect_dangerous_bullets(agent, world.projectiles);

        let mut output = if agent.rolling {
            TickOutput::untouched(Behaviour::Rolling)
        } else if let Some(bullets) = dangerous {
            if will_hit_next_frame(agent, &bullets, world.dt) {
                debug!("imminent hit from {} bullet(s)", bullets.len());
                TickOutput {
                    roll: self.roll(&frame, Some(&bullets)),
                    ..TickOutput::untouched(Behaviour::Dodge)
                }
            } else {
                self.avoid_bullets(&frame, &bullets)
            }
        } else if frame.combat_room {
            self.keep_spacing(&frame)
        } else {
            self.follow_cursor(&frame, input.cursor)
        };

        if input.roll_pressed && !agent.rolling && output.roll.is_none() {
            output.roll = Some(self.manual_roll(agent, input.cursor));
        }

        if self.config.draw_combat_area {
            output.combat_border = frame.area.map(|area| area.border_segments());
        }
        output
    }

    fn speed_for(&self, agent: &AgentSnapshot, boosted: bool) -> f32 {
        if boosted && self.config.increase_speed_out_of_combat {
            agent.speed * OUT_OF_COMBAT_SPEED_MULTIPLIER
        } else {
            agent.speed
        }
    }

    fn steer<C>(&mut self, frame: &Frame<'_, '_, C>, direction: Vec2, speed: f32) -> Vec2
    where
        C: CellSource + ?Sized,
    {
        try_move(&frame.movement(), &mut self.slide, direction, speed)
    }

    fn roll<C>(
        &mut self,
        frame: &Frame<'_, '_, C>,
        dangerous: Option<&DangerousBullets>,
    ) -> Option<RollCommand>
    where
        C: CellSource + ?Sized,
    {
        if self.latch.is_engaged() {
            debug!("roll suppressed: previous command still pending");
            return None;
        }
        let ctx = RollContext {
            cells: frame.world.cells,
            agent: frame.agent,
            area: frame.area,
            projectiles: frame.world.projectiles,
            enemies: frame.world.enemies,
            weights: self.config.roll_weights,
        };
        let command = select_roll(&ctx, dangerous);
        if command.is_some() {
            self.latch.engage();
        }
        command
    }

    fn avoid_bullets<C>(&mut self, frame: &Frame<'_, '_, C>, bullets: &DangerousBullets) -> TickOutput
    where
        C: CellSource + ?Sized,
    {
        let heading = bullets.combined_direction();
        if heading == Vec2::ZERO {
            warn!("dangerous bullets cancel out; holding position");
        }
        let first = vec_normalize(perpendicular_left(heading) + heading * RETREAT_WEIGHT);
        let second = vec_normalize(perpendicular_right(heading) + heading * RETREAT_WEIGHT);

        let current = vec_normalize(frame.agent.velocity);
        let direction = if angle_between_deg(current, first) < angle_between_deg(current, second) {
            first
        } else {
            second
        };

        let speed = self.speed_for(frame.agent, !frame.combat_room);
        debug!("avoiding bullets along {direction:?}");
        TickOutput {
            velocity: Some(self.steer(frame, direction, speed)),
            ..TickOutput::untouched(Behaviour::AvoidBullets)
        }
    }

    fn keep_spacing<C>(&mut self, frame: &Frame<'_, '_, C>) -> TickOutput
    where
        C: CellSource + ?Sized,
    {
        let position = frame.agent.position;
        let Some(nearest) = nearest_hostile(frame.world.enemies, position) else {
            return TickOutput::untouched(Behaviour::Idle);
        };
        let distance = position.distance(nearest.position);

        if distance < ENEMY_PANIC_DISTANCE {
            debug!("enemy at {distance:.2} units; rolling");
            return TickOutput {
                roll: self.roll(frame, None),
                ..TickOutput::untouched(Behaviour::PanicRoll)
            };
        }

        let (ideal, threshold) = if frame.world.enemies.iter().any(|e| e.is_hostile() && e.boss) {
            (BOSS_IDEAL_ENEMY_DISTANCE, BOSS_ENEMY_DISTANCE_THRESHOLD)
        } else {
            (IDEAL_ENEMY_DISTANCE, ENEMY_DISTANCE_THRESHOLD)
        };

        let direction = if distance < ideal - threshold {
            vec_normalize(position - nearest.position)
        } else if distance > ideal + threshold {
            vec_normalize(nearest.position - position)
        } else {
            return TickOutput {
                velocity: Some(Vec2::ZERO),
                ..TickOutput::untouched(Behaviour::Hold)
            };
        };
        TickOutput {
            velocity: Some(self.steer(frame, direction, frame.agent.speed)),
            ..TickOutput::untouched(Behaviour::KeepSpacing)
        }
    }

    fn follow_cursor<C>(&mut self, frame: &Frame<'_, '_, C>, cursor: Vec2) -> TickOutput
    where
        C: CellSource + ?Sized,
    {
        let position = frame.agent.position;
        if position.distance(cursor) <= CURSOR_FOLLOW_DEADZONE {
            return TickOutput {
                velocity: Some(Vec2::ZERO),
                ..TickOutput::untouched(Behaviour::Hold)
            };
        }
        let direction = vec_normalize(cursor - position);
        let speed = self.speed_for(frame.agent, true);
        TickOutput {
            velocity: Some(self.steer(frame, direction, speed)),
            ..TickOutput::untouched(Behaviour::FollowCursor)
        }
    }

    fn manual_roll(&mut self, agent: &AgentSnapshot, cursor: Vec2) -> RollCommand {
        let offset = cursor - agent.position;
        let direction = if offset.length() < MIN_MANUAL_ROLL_LENGTH {
            Vec2::X
        } else {
            vec_normalize(offset)
        };
        debug!("manual roll towards {direction:?}");
        self.latch.engage();
        RollCommand { direction }
    }
}

/// Nearest living enemy that is not an allied companion.
fn nearest_hostile(enemies: &[EnemySnapshot], position: Vec2) -> Option<&EnemySnapshot> {
    enemies
        .iter()
        .filter(|enemy| enemy.is_hostile())
        .min_by_key(|enemy| OrderedFloat(position.distance_squared(enemy.position)))
}
