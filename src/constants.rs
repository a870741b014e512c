/// Steering and evasion constants used across the controller.
///
/// Distances are world units (one grid cell per unit) and durations are
/// seconds measured against the host-supplied tick delta.
pub const DANGER_RADIUS: f32 = 2.5;
/// Maximum angle, in degrees, between a bullet's heading and the line to the
/// agent for the bullet to count as approaching.
pub const DANGER_ANGLE_DEG: f32 = 60.0;
/// Padding applied to both hitboxes when predicting an imminent hit.
///
/// Ten pixels at sixteen pixels per unit.
pub const HITBOX_PADDING: f32 = 0.625;

/// Spacing between consecutive samples of the geometry probe.
pub const PROBE_STEP: f32 = 0.5;
/// Probe distance used when validating ordinary movement and slides.
pub const DEFAULT_PROBE_DISTANCE: f32 = 0.5;
/// Vertical offset applied to the probe origin so that walls directly below
/// the agent's centre do not block sideways movement.
pub const PROBE_ORIGIN_OFFSET_Y: f32 = -0.5;

/// Lifetime of a remembered slide direction.
pub const SLIDE_COOLDOWN: f32 = 0.1;
/// Margin added around the floor cells of a room to form its combat area.
pub const COMBAT_AREA_MARGIN: f32 = 0.5;

pub const ROLL_DISTANCE: f32 = 5.5;
pub const ROLL_DURATION: f32 = 0.7;
/// Radius around the agent in which living enemies contribute to the threat
/// direction used when scoring rolls.
pub const ROLL_THREAT_RANGE: f32 = 10.0;
/// Extrapolated bullets closer than this to a roll end count as congestion.
pub const ROLL_CONGESTION_RADIUS: f32 = 5.0;
/// Nearest-bullet distance score used when no hostile projectile is active.
pub const ROLL_DISTANCE_SCORE_CAP: f32 = 25.0;
/// Interval after issuing a roll during which no further roll is requested.
pub const ROLL_COMMAND_COOLDOWN: f32 = 0.2;

/// Blend factor pulling avoidance diagonals along the bullets' heading.
pub const RETREAT_WEIGHT: f32 = 0.7;
pub const OUT_OF_COMBAT_SPEED_MULTIPLIER: f32 = 1.5;

pub const IDEAL_ENEMY_DISTANCE: f32 = 7.0;
pub const ENEMY_DISTANCE_THRESHOLD: f32 = 0.5;
pub const BOSS_IDEAL_ENEMY_DISTANCE: f32 = 10.0;
pub const BOSS_ENEMY_DISTANCE_THRESHOLD: f32 = 1.0;
/// Enemies closer than this trigger an immediate roll.
pub const ENEMY_PANIC_DISTANCE: f32 = 2.0;

/// The agent stops once the cursor is this close.
pub const CURSOR_FOLLOW_DEADZONE: f32 = 1.5;
/// Cursor offsets shorter than this fall back to a rightward manual roll.
pub const MIN_MANUAL_ROLL_LENGTH: f32 = 0.1;
