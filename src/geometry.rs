//! Straight-line traversability probe over level cells.

use glam::Vec2;

use crate::grid::CellSource;
use crate::numeric::cell_of;
use crate::vector_math::vec_normalize;
use crate::{PROBE_ORIGIN_OFFSET_Y, PROBE_STEP};

/// Number of samples taken for a probe of `distance` units.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Probe distances are short, finite and clamped to at least one step."
)]
fn sample_count(distance: f32) -> u32 {
    if !distance.is_finite() || distance <= 0.0 {
        return 1;
    }
    ((distance / PROBE_STEP).ceil() as u32).max(1)
}

/// Returns `true` when the straight path from `origin` along `direction` for
/// `distance` units crosses only walkable cells.
///
/// The origin is lowered by half a unit so that walls directly beneath the
/// agent's centre do not block sideways moves. The path is then sampled every
/// half unit, starting one step out, and each sample fails when its cell is
/// missing, not floor, or a door frame while `in_combat`.
///
/// A zero `direction` probes the offset origin only.
///
/// # Examples
/// ```
/// use glam::{IVec2, Vec2};
/// use cursor_pilot::geometry::is_direction_clear;
/// use cursor_pilot::grid::{CellGrid, RoomId};
/// let grid = CellGrid::from_ascii(&["#####", "#...#", "#...#", "#####"], IVec2::ZERO, RoomId(0))
///     .expect("valid layout");
/// let origin = Vec2::new(1.5, 2.5);
/// assert!(is_direction_clear(&grid, origin, Vec2::X, 1.0, false));
/// assert!(!is_direction_clear(&grid, origin, Vec2::NEG_X, 1.0, false));
/// ```
#[must_use]
pub fn is_direction_clear<C>(
    cells: &C,
    origin: Vec2,
    direction: Vec2,
    distance: f32,
    in_combat: bool,
) -> bool
where
    C: CellSource + ?Sized,
{
    let start = origin + Vec2::new(0.0, PROBE_ORIGIN_OFFSET_Y);
    let step = vec_normalize(direction) * PROBE_STEP;

    (1..=sample_count(distance)).all(|i| {
        #[expect(
            clippy::cast_precision_loss,
            reason = "Sample indices stay tiny compared with f32 precision."
        )]
        let sample = start + step * i as f32;
        cells
            .cell_at(cell_of(sample))
            .is_some_and(|cell| cell.is_walkable(in_combat))
    })
}
