//! Combat-area rectangle used to keep the agent inside the current fight.

use glam::{IVec2, Vec2};
use log::debug;

use crate::grid::{CellSource, RoomId};
use crate::numeric::cell_corner;
use crate::COMBAT_AREA_MARGIN;

/// A straight line segment in world space.
pub type Segment = (Vec2, Vec2);

/// Axis-aligned rectangle spanning a room's floor cells plus a margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombatArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl CombatArea {
    /// Bounds of `cells` (each a unit square) grown by `margin` on every side.
    ///
    /// Returns `None` for an empty cell set.
    ///
    /// # Examples
    /// ```
    /// use glam::{IVec2, Vec2};
    /// use cursor_pilot::area::CombatArea;
    /// let area = CombatArea::from_cells([IVec2::new(0, 0), IVec2::new(3, 1)], 0.5)
    ///     .expect("non-empty");
    /// assert_eq!(area.min, Vec2::new(-0.5, -0.5));
    /// assert_eq!(area.max, Vec2::new(4.5, 2.5));
    /// ```
    #[must_use]
    pub fn from_cells<I>(cells: I, margin: f32) -> Option<Self>
    where
        I: IntoIterator<Item = IVec2>,
    {
        let mut cells = cells.into_iter();
        let first = cells.next()?;
        let (lo, hi) = cells.fold((first, first), |(lo, hi), cell| {
            (lo.min(cell), hi.max(cell))
        });
        Some(Self {
            min: cell_corner(lo) - Vec2::splat(margin),
            max: cell_corner(hi + IVec2::ONE) + Vec2::splat(margin),
        })
    }

    /// Whether `point` lies inside the area, edges included.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Zeroes each velocity component that would carry the agent further
    /// outside the area on the next tick.
    ///
    /// Components pointing back inside, or along an axis where the agent
    /// stays within bounds, are preserved.
    #[must_use]
    pub fn contain_velocity(&self, position: Vec2, velocity: Vec2, dt: f32) -> Vec2 {
        let next = position + velocity * dt;
        let mut contained = velocity;
        if (next.x < self.min.x && velocity.x < 0.0) || (next.x > self.max.x && velocity.x > 0.0)
        {
            contained.x = 0.0;
        }
        if (next.y < self.min.y && velocity.y < 0.0) || (next.y > self.max.y && velocity.y > 0.0)
        {
            contained.y = 0.0;
        }
        contained
    }

    /// The four edges of the area, for debug overlays.
    #[must_use]
    pub fn border_segments(&self) -> [Segment; 4] {
        let bottom_right = Vec2::new(self.max.x, self.min.y);
        let top_left = Vec2::new(self.min.x, self.max.y);
        [
            (self.min, bottom_right),
            (bottom_right, self.max),
            (self.max, top_left),
            (top_left, self.min),
        ]
    }
}

/// Per-room cache of the combat area.
///
/// The area is rebuilt only when the room changes or when it first becomes a
/// combat room; outside combat no area is held.
#[derive(Debug, Clone, Default)]
pub struct CombatAreaCache {
    room: Option<RoomId>,
    area: Option<CombatArea>,
}

impl CombatAreaCache {
    /// Refreshes the cache for the agent's current room and returns the area.
    pub fn refresh<C>(&mut self, cells: &C, room: RoomId, in_combat_room: bool) -> Option<CombatArea>
    where
        C: CellSource + ?Sized,
    {
        if !in_combat_room {
            self.clear();
            return None;
        }
        if self.room != Some(room) || self.area.is_none() {
            self.area = CombatArea::from_cells(cells.room_floor_cells(room), COMBAT_AREA_MARGIN);
            self.room = Some(room);
            debug!("combat area for room {room:?}: {:?}", self.area);
        }
        self.area
    }

    /// The cached area, if any.
    #[must_use]
    pub const fn current(&self) -> Option<CombatArea> {
        self.area
    }

    /// Drops the cached area.
    pub fn clear(&mut self) {
        self.room = None;
        self.area = None;
    }
}
