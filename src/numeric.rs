//! Numeric conversion helpers used across the project.
//!
//! These utilities guard conversions from world-space floats into the integer
//! cell domain.

use glam::{IVec2, Vec2};

/// Floor an `f32` and clamp it into the `i32` domain.
///
/// Non-finite inputs map to `i32::MIN`, which no grid ever contains.
#[expect(
    clippy::cast_possible_truncation,
    reason = "The value is clamped to the i32 bounds before casting."
)]
#[must_use]
pub fn floor_to_i32(value: f32) -> i32 {
    if value.is_nan() {
        return i32::MIN;
    }
    // `i32::MAX` is not representable in f32; clamp in f64 to stay exact.
    let floored = f64::from(value).floor();
    let clamped = floored.clamp(f64::from(i32::MIN), f64::from(i32::MAX));
    clamped as i32
}

/// Maps a world position to the cell containing it.
///
/// # Examples
/// ```
/// use glam::{IVec2, Vec2};
/// use cursor_pilot::numeric::cell_of;
/// assert_eq!(cell_of(Vec2::new(2.7, -0.2)), IVec2::new(2, -1));
/// ```
#[must_use]
pub fn cell_of(position: Vec2) -> IVec2 {
    IVec2::new(floor_to_i32(position.x), floor_to_i32(position.y))
}

/// Converts a cell coordinate into the world position of its lower corner.
#[expect(
    clippy::cast_precision_loss,
    reason = "Room coordinates stay far below 2^24."
)]
#[must_use]
pub fn cell_corner(cell: IVec2) -> Vec2 {
    Vec2::new(cell.x as f32, cell.y as f32)
}
