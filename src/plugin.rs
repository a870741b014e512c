//! Bevy integration driving [`PilotController`]s from ECS state.
//!
//! [`PilotPlugin`] inserts the [`PilotSettings`], [`PilotInput`] and
//! [`RoomCells`] resources and registers a single `Update` system. Each frame
//! the system builds snapshots from every [`HostileProjectile`] and
//! [`HostileEnemy`] entity, ticks the controller carried by each
//! [`PilotAgent`], and stores the result in the agent's [`PilotCommand`].
//! Applying the command (velocity, roll) is left to the host's own movement
//! systems.

use bevy::prelude::*;
use log::debug;

use crate::area::Segment;
use crate::config::PilotConfig;
use crate::controller::{Behaviour, PilotController};
use crate::entity::{AgentSnapshot, Collider, EnemySnapshot, Owner, ProjectileSnapshot};
use crate::grid::CellGrid;
use crate::roll::RollCommand;
use crate::world::{RoomSnapshot, TickInput, WorldSnapshot};

/// Plugin wiring the pilot into an app.
#[derive(Default)]
pub struct PilotPlugin;

impl Plugin for PilotPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PilotSettings>()
            .init_resource::<PilotInput>()
            .init_resource::<RoomCells>()
            .add_systems(Update, drive_pilots_system);
    }
}

/// Options applied to every agent.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PilotSettings(pub PilotConfig);

/// Player input for the current frame.
///
/// The roll and toggle flags are one-shot: they are cleared once every agent
/// has seen them.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct PilotInput(pub TickInput);

/// Level cells and the room the agents are in.
#[derive(Resource, Debug, Clone, Default)]
pub struct RoomCells {
    pub grid: CellGrid,
    pub current: Option<RoomSnapshot>,
}

/// A character steered by the pilot.
#[derive(Component, Debug, Clone)]
#[require(PilotCommand)]
pub struct PilotAgent {
    pub speed: f32,
    /// Velocity the host applied last frame.
    pub velocity: Vec2,
    pub in_combat: bool,
    pub rolling: bool,
    pub accepting_input: bool,
    pub hitbox: Option<Collider>,
    controller: PilotController,
}

impl PilotAgent {
    #[must_use]
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            velocity: Vec2::ZERO,
            in_combat: false,
            rolling: false,
            accepting_input: true,
            hitbox: None,
            controller: PilotController::default(),
        }
    }

    #[must_use]
    pub const fn controller(&self) -> &PilotController {
        &self.controller
    }

    fn snapshot(&self, position: Vec2) -> AgentSnapshot {
        AgentSnapshot {
            position,
            velocity: self.velocity,
            speed: self.speed,
            in_combat: self.in_combat,
            rolling: self.rolling,
            accepting_input: self.accepting_input,
            hitbox: self.hitbox,
        }
    }
}

/// A projectile the agent should be wary of.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HostileProjectile {
    pub direction: Vec2,
    pub speed: f32,
    pub collider: Option<Collider>,
    pub active: bool,
}

/// An enemy, companion or boss in the agent's room.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct HostileEnemy {
    pub alive: bool,
    pub boss: bool,
    pub companion: bool,
}

impl Default for HostileEnemy {
    fn default() -> Self {
        Self {
            alive: true,
            boss: false,
            companion: false,
        }
    }
}

/// Latest decision for a [`PilotAgent`].
#[derive(Component, Debug, Clone, Copy, Default, PartialEq)]
pub struct PilotCommand {
    /// `None` when the host's velocity should be left alone.
    pub velocity: Option<Vec2>,
    pub roll: Option<RollCommand>,
    pub behaviour: Option<Behaviour>,
    pub combat_border: Option<[Segment; 4]>,
}

/// Ticks every [`PilotAgent`] once per frame.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters are passed by value."
)]
pub fn drive_pilots_system(
    time: Res<Time>,
    settings: Res<PilotSettings>,
    mut input: ResMut<PilotInput>,
    cells: Res<RoomCells>,
    projectiles: Query<(&Transform, &HostileProjectile)>,
    enemies: Query<(&Transform, &HostileEnemy)>,
    mut agents: Query<(&Transform, &mut PilotAgent, &mut PilotCommand)>,
) {
    let projectiles: Vec<ProjectileSnapshot> = projectiles
        .iter()
        .map(|(transform, projectile)| ProjectileSnapshot {
            position: transform.translation.truncate(),
            direction: projectile.direction,
            speed: projectile.speed,
            owner: Owner::Hostile,
            collider: projectile.collider,
            active: projectile.active,
        })
        .collect();
    let enemies: Vec<EnemySnapshot> = enemies
        .iter()
        .map(|(transform, enemy)| EnemySnapshot {
            position: transform.translation.truncate(),
            alive: enemy.alive,
            boss: enemy.boss,
            companion: enemy.companion,
        })
        .collect();
    let world = WorldSnapshot {
        cells: &cells.grid,
        room: cells.current,
        projectiles: &projectiles,
        enemies: &enemies,
        dt: time.delta_secs(),
    };

    for (transform, mut agent, mut command) in &mut agents {
        if agent.controller.config() != &settings.0 {
            agent.controller.set_config(settings.0);
        }
        let snapshot = agent.snapshot(transform.translation.truncate());
        let output = agent.controller.tick(&snapshot, &world, &input.0);
        debug!("pilot {:?}: {:?}", output.behaviour, output.velocity);
        *command = PilotCommand {
            velocity: output.velocity,
            roll: output.roll,
            behaviour: Some(output.behaviour),
            combat_border: output.combat_border,
        };
    }

    if input.0.roll_pressed || input.0.toggle_pressed {
        input.0.roll_pressed = false;
        input.0.toggle_pressed = false;
    }
}
