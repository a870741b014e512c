//! Cell-level level geometry queried by the geometry probe.
//!
//! Hosts expose their level through [`CellSource`]. [`CellGrid`] is the bundled
//! sparse implementation, used by the scenario runner and the tests, and can
//! be authored as ASCII rows.

use glam::IVec2;
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Identifier of a room within the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub u32);

impl From<u32> for RoomId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// Terrain classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Floor,
    Wall,
    Pit,
}

/// Data stored for one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub kind: CellKind,
    /// Door frames are walkable floor that seals while fighting.
    pub door_frame: bool,
    /// Room owning the cell, if any.
    pub room: Option<RoomId>,
}

impl Cell {
    /// Plain floor belonging to `room`.
    #[must_use]
    pub const fn floor(room: RoomId) -> Self {
        Self {
            kind: CellKind::Floor,
            door_frame: false,
            room: Some(room),
        }
    }

    /// A door-frame floor cell belonging to `room`.
    #[must_use]
    pub const fn door(room: RoomId) -> Self {
        Self {
            kind: CellKind::Floor,
            door_frame: true,
            room: Some(room),
        }
    }

    /// Impassable wall.
    #[must_use]
    pub const fn wall() -> Self {
        Self {
            kind: CellKind::Wall,
            door_frame: false,
            room: None,
        }
    }

    /// Pit the agent would fall into.
    #[must_use]
    pub const fn pit() -> Self {
        Self {
            kind: CellKind::Pit,
            door_frame: false,
            room: None,
        }
    }

    /// Whether an agent may stand on this cell given its combat state.
    #[must_use]
    pub fn is_walkable(&self, in_combat: bool) -> bool {
        self.kind == CellKind::Floor && !(self.door_frame && in_combat)
    }
}

/// Read-only access to level geometry.
pub trait CellSource {
    /// Returns the cell at `coord`, or `None` when the coordinate lies outside
    /// the level or carries no data.
    fn cell_at(&self, coord: IVec2) -> Option<Cell>;

    /// Coordinates of every floor cell belonging to `room`.
    fn room_floor_cells(&self, room: RoomId) -> Vec<IVec2>;
}

/// Errors raised while authoring a [`CellGrid`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The layout contained no rows or only empty rows.
    #[error("grid layout is empty")]
    Empty,
    /// A row's width differs from the first row.
    #[error("row {row} has {found} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
    /// A character that does not map to any cell kind.
    #[error("unknown glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },
    /// The layout is too large to index with `i32` coordinates.
    #[error("grid dimension {0} exceeds the supported range")]
    TooLarge(usize),
}

/// Sparse grid of cells with explicit bounds.
///
/// Coordinates inside the bounds without a stored cell report no data.
#[derive(Debug, Clone, Default)]
pub struct CellGrid {
    /// Inclusive lower corner.
    min: IVec2,
    /// Exclusive upper corner.
    max: IVec2,
    cells: HashMap<IVec2, Cell>,
}

impl CellGrid {
    /// Creates an empty grid covering `min..max` (upper corner exclusive).
    #[must_use]
    pub fn new(min: IVec2, max: IVec2) -> Self {
        Self {
            min,
            max,
            cells: HashMap::new(),
        }
    }

    /// Builds a single-room grid from ASCII rows.
    ///
    /// The first row is the top of the room; row `n` of `h` rows maps to
    /// `y = h - 1 - n`, columns map to `x`, both offset by `origin`.
    ///
    /// | glyph | cell |
    /// |-------|------|
    /// | `.`   | floor |
    /// | `D`   | door frame |
    /// | `#`   | wall |
    /// | `~`   | pit |
    /// | space | no data |
    ///
    /// # Errors
    /// Returns [`GridError`] for empty or ragged layouts and unknown glyphs.
    ///
    /// # Examples
    /// ```
    /// use glam::IVec2;
    /// use cursor_pilot::grid::{CellGrid, CellKind, CellSource, RoomId};
    /// let grid = CellGrid::from_ascii(&["###", "#.#", "###"], IVec2::ZERO, RoomId(1))
    ///     .expect("valid layout");
    /// let centre = grid.cell_at(IVec2::new(1, 1)).expect("centre cell");
    /// assert_eq!(centre.kind, CellKind::Floor);
    /// assert!(grid.cell_at(IVec2::new(3, 1)).is_none());
    /// ```
    pub fn from_ascii<S: AsRef<str>>(
        rows: &[S],
        origin: IVec2,
        room: RoomId,
    ) -> Result<Self, GridError> {
        let expected = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if expected == 0 {
            return Err(GridError::Empty);
        }
        let height = i32::try_from(rows.len()).map_err(|_| GridError::TooLarge(rows.len()))?;
        let width = i32::try_from(expected).map_err(|_| GridError::TooLarge(expected))?;

        let mut grid = Self::new(origin, origin + IVec2::new(width, height));
        for (row_index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let found = row.chars().count();
            if found != expected {
                return Err(GridError::RaggedRow {
                    row: row_index,
                    found,
                    expected,
                });
            }
            let row_y = i32::try_from(row_index).map_err(|_| GridError::TooLarge(row_index))?;
            let y = height - 1 - row_y;
            for (column, glyph) in row.chars().enumerate() {
                let cell = match glyph {
                    '.' => Cell::floor(room),
                    'D' => Cell::door(room),
                    '#' => Cell::wall(),
                    '~' => Cell::pit(),
                    ' ' => continue,
                    other => {
                        return Err(GridError::UnknownGlyph {
                            glyph: other,
                            row: row_index,
                            column,
                        })
                    }
                };
                let x = i32::try_from(column).map_err(|_| GridError::TooLarge(column))?;
                grid.insert(origin + IVec2::new(x, y), cell);
            }
        }
        Ok(grid)
    }

    /// Stores `cell` at `coord`, growing the bounds when needed.
    pub fn insert(&mut self, coord: IVec2, cell: Cell) {
        if self.cells.is_empty() && self.min == self.max {
            self.min = coord;
            self.max = coord + IVec2::ONE;
        } else {
            self.min = self.min.min(coord);
            self.max = self.max.max(coord + IVec2::ONE);
        }
        self.cells.insert(coord, cell);
    }

    /// Whether `coord` lies inside the grid bounds.
    #[must_use]
    pub fn in_bounds(&self, coord: IVec2) -> bool {
        coord.cmpge(self.min).all() && coord.cmplt(self.max).all()
    }

    /// Number of stored cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` when no cell is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl CellSource for CellGrid {
    fn cell_at(&self, coord: IVec2) -> Option<Cell> {
        if !self.in_bounds(coord) {
            return None;
        }
        self.cells.get(&coord).copied()
    }

    fn room_floor_cells(&self, room: RoomId) -> Vec<IVec2> {
        self.cells
            .iter()
            .filter(|(_, cell)| cell.kind == CellKind::Floor && cell.room == Some(room))
            .map(|(&coord, _)| coord)
            .collect()
    }
}
