//! Room layouts for tests.

use cursor_pilot::grid::{CellGrid, RoomId};
use cursor_pilot::world::RoomSnapshot;
use glam::IVec2;

/// Room identifier used by every helper in this module.
pub const TEST_ROOM: RoomId = RoomId(1);

/// A `width` by `height` room of plain floor with its corner at the origin.
///
/// # Panics
/// Panics if either dimension is zero.
///
/// # Examples
/// ```
/// use test_utils::rooms::open_room;
/// assert_eq!(open_room(4, 3).len(), 12);
/// ```
pub fn open_room(width: usize, height: usize) -> CellGrid {
    let rows = vec![".".repeat(width); height];
    layout(&rows)
}

/// Builds a [`TEST_ROOM`] grid from ASCII rows, top row first.
///
/// # Panics
/// Panics if the layout is invalid.
///
/// # Examples
/// ```
/// use glam::IVec2;
/// use cursor_pilot::grid::{CellKind, CellSource};
/// use test_utils::rooms::layout;
/// let grid = layout(&["#.", ".."]);
/// let cell = grid.cell_at(IVec2::new(0, 1)).expect("wall cell");
/// assert_eq!(cell.kind, CellKind::Wall);
/// ```
pub fn layout<S: AsRef<str>>(rows: &[S]) -> CellGrid {
    CellGrid::from_ascii(rows, IVec2::ZERO, TEST_ROOM)
        .unwrap_or_else(|err| panic!("invalid test layout: {err}"))
}

/// [`TEST_ROOM`] with active enemies.
///
/// # Examples
/// ```
/// use test_utils::rooms::fighting;
/// assert!(fighting().has_active_enemies);
/// ```
pub const fn fighting() -> RoomSnapshot {
    RoomSnapshot::new(TEST_ROOM, true)
}

/// [`TEST_ROOM`] once cleared.
///
/// # Examples
/// ```
/// use test_utils::rooms::cleared;
/// assert!(!cleared().has_active_enemies);
/// ```
pub const fn cleared() -> RoomSnapshot {
    RoomSnapshot::new(TEST_ROOM, false)
}
