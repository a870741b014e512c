//! Utility helpers for tests.
//!
//! Builders for snapshots and rooms shared by the integration tests, plus a
//! ready-made Bevy app for exercising the host plugin.

pub mod app;
pub mod rooms;
pub mod snapshots;

use glam::Vec2;

/// Assert that two vectors match component-wise within `epsilon`.
///
/// # Panics
/// Panics with both vectors in the message when any component differs by more
/// than `epsilon`.
pub fn assert_vec2_near(actual: Vec2, expected: Vec2, epsilon: f32) {
    assert!(
        (actual - expected).abs().max_element() <= epsilon,
        "{actual:?} differs from {expected:?} by more than {epsilon}"
    );
}
