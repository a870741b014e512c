#![cfg_attr(docsrs, feature(doc_cfg))]
//! Autonomous steering for a top-down bullet-hell character.
//!
//! Each tick the host hands [`PilotController::tick`] read-only snapshots of
//! the agent, nearby projectiles and enemies, and the level cells. The
//! controller answers with a velocity and, when needed, an evasive roll.
//! Enable the `host` feature for the Bevy plugin.
pub mod area;
pub mod collision;
pub mod config;
pub mod constants;
pub mod controller;
pub mod entity;
pub mod geometry;
pub mod grid;
pub mod logging;
pub mod movement;
pub mod numeric;
#[cfg(feature = "host")]
#[cfg_attr(docsrs, doc(cfg(feature = "host")))]
pub mod plugin;
pub mod roll;
pub mod scenario;
pub mod simulation;
pub mod slide;
pub mod threat;
pub mod vector_math;
pub mod world;
pub use constants::*;

// Re-export commonly used items
pub use area::{CombatArea, CombatAreaCache};
pub use config::{ConfigError, PilotConfig, RollWeights};
pub use controller::{Behaviour, PilotController, TickOutput};
pub use entity::{AgentSnapshot, Collider, EnemySnapshot, Owner, ProjectileSnapshot};
pub use grid::{Cell, CellGrid, CellKind, CellSource, GridError, RoomId};
pub use logging::init as init_logging;
#[cfg(feature = "host")]
#[cfg_attr(docsrs, doc(cfg(feature = "host")))]
pub use plugin::PilotPlugin;
pub use roll::{RollCommand, RollLatch};
pub use scenario::{Scenario, ScenarioError};
pub use simulation::{Simulation, TickRecord};
pub use threat::DangerousBullets;
pub use vector_math::vec_normalize;
pub use world::{RoomSnapshot, TickInput, WorldSnapshot};

pub mod prelude {
    //! Prelude exports used in documentation examples.
    //!
    //! ```rust,no_run
    //! use cursor_pilot::prelude::*;
    //! ```

    pub use crate::AgentSnapshot;
    pub use crate::CellGrid;
    pub use crate::EnemySnapshot;
    pub use crate::PilotConfig;
    pub use crate::PilotController;
    pub use crate::ProjectileSnapshot;
    pub use crate::RoomId;
    pub use crate::RoomSnapshot;
    pub use crate::TickInput;
    pub use crate::WorldSnapshot;
    pub use glam::{IVec2, Vec2};
}
