//! Turns a desired direction into a velocity the level geometry allows.

use glam::Vec2;
use log::trace;

use crate::area::CombatArea;
use crate::geometry::is_direction_clear;
use crate::grid::CellSource;
use crate::slide::{find_slide_direction, SlideMemory};
use crate::DEFAULT_PROBE_DISTANCE;

/// Everything the resolver needs to know about the agent's surroundings.
#[derive(Debug)]
pub struct MoveContext<'a, C: ?Sized> {
    pub cells: &'a C,
    pub position: Vec2,
    /// Agent combat flag; seals door frames.
    pub in_combat: bool,
    /// Whether the current room still has active enemies.
    pub combat_room: bool,
    pub area: Option<CombatArea>,
    pub dt: f32,
}

impl<C: ?Sized> Clone for MoveContext<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: ?Sized> Copy for MoveContext<'_, C> {}

impl<C> MoveContext<'_, C>
where
    C: CellSource + ?Sized,
{
    /// Short probe from the agent's position.
    #[must_use]
    pub fn is_clear(&self, direction: Vec2) -> bool {
        is_direction_clear(
            self.cells,
            self.position,
            direction,
            DEFAULT_PROBE_DISTANCE,
            self.in_combat,
        )
    }
}

/// Resolves `direction` at `speed` into a velocity.
///
/// A clear direction is taken as is. When blocked inside a combat room the
/// agent slides along the obstacle (renewing `memory`); otherwise it stops.
/// While fighting inside a known [`CombatArea`], components that would carry
/// the agent out of it are then zeroed.
///
/// # Examples
/// ```
/// use glam::{IVec2, Vec2};
/// use cursor_pilot::grid::{CellGrid, RoomId};
/// use cursor_pilot::movement::{try_move, MoveContext};
/// use cursor_pilot::slide::SlideMemory;
/// let grid = CellGrid::from_ascii(&["....", "....", "...."], IVec2::ZERO, RoomId(0))
///     .expect("valid layout");
/// let ctx = MoveContext {
///     cells: &grid,
///     position: Vec2::new(1.5, 2.0),
///     in_combat: false,
///     combat_room: false,
///     area: None,
///     dt: 1.0 / 60.0,
/// };
/// let velocity = try_move(&ctx, &mut SlideMemory::default(), Vec2::X, 4.0);
/// assert_eq!(velocity, Vec2::new(4.0, 0.0));
/// ```
pub fn try_move<C>(ctx: &MoveContext<'_, C>, memory: &mut SlideMemory, direction: Vec2, speed: f32) -> Vec2
where
    C: CellSource + ?Sized,
{
    let velocity = if ctx.is_clear(direction) {
        direction * speed
    } else if ctx.combat_room {
        match find_slide_direction(direction, memory, |candidate| ctx.is_clear(candidate)) {
            Some(slide) => {
                memory.remember(slide);
                trace!("sliding along {slide:?} instead of {direction:?}");
                slide * speed
            }
            None => Vec2::ZERO,
        }
    } else {
        Vec2::ZERO
    };

    match ctx.area {
        Some(area) if ctx.combat_room => area.contain_velocity(ctx.position, velocity, ctx.dt),
        _ => velocity,
    }
}
