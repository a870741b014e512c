//! Minimal kinematic stand-in for a host game.
//!
//! Moves the agent by whatever velocity the controller requests, plays rolls
//! out at constant speed and advances projectiles in straight lines. Walls
//! are not enforced here; the controller's own probes keep the agent off
//! them.

use glam::Vec2;
use log::{debug, info};

use crate::config::PilotConfig;
use crate::controller::{PilotController, TickOutput};
use crate::entity::{AgentSnapshot, EnemySnapshot, ProjectileSnapshot};
use crate::grid::CellGrid;
use crate::numeric::cell_of;
use crate::scenario::{Scenario, ScenarioError};
use crate::world::{RoomSnapshot, TickInput, WorldSnapshot};
use crate::{ROLL_DISTANCE, ROLL_DURATION};

/// What happened on one simulated tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickRecord {
    pub tick: u64,
    /// Agent position after the tick was applied.
    pub position: Vec2,
    pub output: TickOutput,
}

/// A scenario being played out against a [`PilotController`].
#[derive(Debug)]
pub struct Simulation {
    grid: CellGrid,
    room: RoomSnapshot,
    agent: AgentSnapshot,
    projectiles: Vec<ProjectileSnapshot>,
    enemies: Vec<EnemySnapshot>,
    cursor: Vec2,
    roll_ticks: Vec<u64>,
    toggle_ticks: Vec<u64>,
    dt: f32,
    controller: PilotController,
    roll_velocity: Vec2,
    roll_remaining: f32,
    tick: u64,
}

impl Simulation {
    /// Prepares `scenario` for stepping.
    ///
    /// # Errors
    /// Returns [`ScenarioError::Layout`] when the room layout is invalid.
    pub fn new(scenario: Scenario, config: PilotConfig) -> Result<Self, ScenarioError> {
        let grid = scenario.grid()?;
        Ok(Self {
            grid,
            room: RoomSnapshot::new(scenario.room_id(), scenario.fighting),
            agent: scenario.agent,
            projectiles: scenario.projectiles,
            enemies: scenario.enemies,
            cursor: scenario.cursor,
            roll_ticks: scenario.roll_ticks,
            toggle_ticks: scenario.toggle_ticks,
            dt: scenario.dt,
            controller: PilotController::new(config),
            roll_velocity: Vec2::ZERO,
            roll_remaining: 0.0,
            tick: 0,
        })
    }

    #[must_use]
    pub const fn agent(&self) -> &AgentSnapshot {
        &self.agent
    }

    #[must_use]
    pub const fn controller(&self) -> &PilotController {
        &self.controller
    }

    #[must_use]
    pub fn projectiles(&self) -> &[ProjectileSnapshot] {
        &self.projectiles
    }

    /// Runs the controller once and applies its commands.
    pub fn step(&mut self) -> TickRecord {
        let input = TickInput {
            cursor: self.cursor,
            roll_pressed: self.roll_ticks.contains(&self.tick),
            toggle_pressed: self.toggle_ticks.contains(&self.tick),
        };
        let world = WorldSnapshot {
            cells: &self.grid,
            room: Some(self.room),
            projectiles: &self.projectiles,
            enemies: &self.enemies,
            dt: self.dt,
        };
        let output = self.controller.tick(&self.agent, &world, &input);
        self.apply(&output);

        let record = TickRecord {
            tick: self.tick,
            position: self.agent.position,
            output,
        };
        info!(
            "tick {}: {:?} at {:?} velocity {:?}",
            record.tick, output.behaviour, record.position, self.agent.velocity
        );
        if let Some(roll) = output.roll {
            info!("tick {}: roll towards {:?}", record.tick, roll.direction);
        }
        self.tick += 1;
        record
    }

    /// Steps `ticks` times, collecting every record.
    pub fn run(&mut self, ticks: u64) -> Vec<TickRecord> {
        (0..ticks).map(|_| self.step()).collect()
    }

    fn apply(&mut self, output: &TickOutput) {
        if let Some(roll) = output.roll {
            if !self.agent.rolling {
                self.agent.rolling = true;
                self.roll_remaining = ROLL_DURATION;
                self.roll_velocity = roll.direction * (ROLL_DISTANCE / ROLL_DURATION);
            }
        }

        if self.agent.rolling {
            let span = self.dt.min(self.roll_remaining);
            self.agent.velocity = self.roll_velocity;
            self.agent.position += self.roll_velocity * span;
            self.roll_remaining -= span;
            if self.roll_remaining <= 0.0 {
                debug!("roll finished");
                self.agent.rolling = false;
                self.agent.velocity = Vec2::ZERO;
            }
        } else {
            if let Some(velocity) = output.velocity {
                self.agent.velocity = velocity;
            }
            self.agent.position += self.agent.velocity * self.dt;
        }

        for bullet in &mut self.projectiles {
            if bullet.active {
                bullet.position = bullet.position_after(self.dt);
                if !self.grid.in_bounds(cell_of(bullet.position)) {
                    bullet.active = false;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    fn scenario(fighting: bool) -> Scenario {
        Scenario {
            rows: vec![".".repeat(20); 10],
            origin: glam::IVec2::ZERO,
            room: 1,
            fighting,
            agent: AgentSnapshot::new(Vec2::new(3.5, 5.5), 6.0),
            projectiles: Vec::new(),
            enemies: Vec::new(),
            cursor: Vec2::new(15.5, 5.5),
            roll_ticks: Vec::new(),
            toggle_ticks: Vec::new(),
            dt: 0.1,
            ticks: 10,
        }
    }

    #[rstest]
    fn agent_walks_to_cursor() {
        let mut sim = Simulation::new(scenario(false), PilotConfig::default()).expect("valid");
        let records = sim.run(30);
        let last = records.last().expect("thirty records");
        assert!(sim.agent().position.distance(Vec2::new(15.5, 5.5)) <= 1.5 + 0.6);
        assert_eq!(last.output.velocity, Some(Vec2::ZERO));
    }

    #[rstest]
    fn manual_roll_moves_roll_distance() {
        let mut scenario = scenario(false);
        scenario.dt = 0.125;
        scenario.cursor = Vec2::new(3.5 + ROLL_DISTANCE, 5.5);
        scenario.roll_ticks = vec![0];
        let mut sim = Simulation::new(scenario, PilotConfig::default()).expect("valid");
        let records = sim.run(8);
        assert!(records[0].output.roll.is_some());
        assert!(records[1].output.roll.is_none());
        assert!(!sim.agent().rolling);
        assert_relative_eq!(sim.agent().position.x, 3.5 + ROLL_DISTANCE, epsilon = 1e-3);
    }

    #[rstest]
    fn toggle_tick_freezes_controller() {
        let mut scenario = scenario(false);
        scenario.toggle_ticks = vec![0];
        let mut sim = Simulation::new(scenario, PilotConfig::default()).expect("valid");
        sim.run(5);
        assert!(!sim.controller().is_enabled());
        assert_eq!(sim.agent().position, Vec2::new(3.5, 5.5));
    }

    #[rstest]
    fn projectiles_leaving_the_room_go_inactive() {
        let mut scenario = scenario(false);
        scenario.projectiles = vec![ProjectileSnapshot::hostile(
            Vec2::new(19.5, 1.5),
            Vec2::X,
            10.0,
        )];
        let mut sim = Simulation::new(scenario, PilotConfig::default()).expect("valid");
        sim.step();
        assert!(!sim.projectiles()[0].active);
    }
}
