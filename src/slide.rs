//! Wall sliding with short-lived direction memory.
//!
//! When the desired direction is blocked the agent slides along the obstacle
//! instead. Remembering the last slide for a moment stops the agent (and the
//! camera following it) from trembling between the two perpendiculars when
//! the blocked direction is ambiguous.

use glam::Vec2;

use crate::vector_math::{perpendicular_left, perpendicular_right};
use crate::SLIDE_COOLDOWN;

/// Last slide direction and the time left before it is forgotten.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SlideMemory {
    direction: Option<Vec2>,
    cooldown: f32,
}

impl SlideMemory {
    /// The remembered slide direction, if still live.
    #[must_use]
    pub const fn direction(&self) -> Option<Vec2> {
        self.direction
    }

    /// Seconds until the remembered direction expires.
    #[must_use]
    pub const fn cooldown(&self) -> f32 {
        self.cooldown
    }

    /// Stores `direction` and restarts the cooldown.
    pub fn remember(&mut self, direction: Vec2) {
        self.direction = Some(direction);
        self.cooldown = SLIDE_COOLDOWN;
    }

    /// Advances the cooldown by `dt`, forgetting the direction once it runs
    /// out.
    pub fn decay(&mut self, dt: f32) {
        self.cooldown -= dt;
        if self.cooldown <= 0.0 {
            self.cooldown = 0.0;
            self.direction = None;
        }
    }
}

/// Chooses a direction to slide along when `desired` is blocked.
///
/// Preference order: the remembered slide if `is_clear` still accepts it, the
/// left perpendicular, then the right perpendicular. A newly chosen
/// perpendicular is written to `memory`. Returns `None` when all are blocked.
///
/// # Examples
/// ```
/// use glam::Vec2;
/// use cursor_pilot::slide::{find_slide_direction, SlideMemory};
/// let mut memory = SlideMemory::default();
/// // Only downward motion is possible.
/// let slide = find_slide_direction(Vec2::X, &mut memory, |dir| dir.y < 0.0);
/// assert_eq!(slide, Some(Vec2::NEG_Y));
/// assert_eq!(memory.direction(), Some(Vec2::NEG_Y));
/// ```
pub fn find_slide_direction<F>(desired: Vec2, memory: &mut SlideMemory, is_clear: F) -> Option<Vec2>
where
    F: Fn(Vec2) -> bool,
{
    if let Some(previous) = memory.direction {
        if is_clear(previous) {
            return Some(previous);
        }
    }

    [perpendicular_left(desired), perpendicular_right(desired)]
        .into_iter()
        .find(|&candidate| is_clear(candidate))
        .inspect(|&chosen| memory.remember(chosen))
}
