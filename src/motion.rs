//! Closed-form motion curves for the island and the bird.
//!
//! Every function here is pure in the elapsed time `t` (seconds), so any
//! frame can be reproduced from its timestamp alone.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Vertical hover of the island: `base_height + amplitude * sin(t * frequency)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IslandMotion {
    pub base_height: f32,
    pub amplitude: f32,
    /// Angular frequency in radians per second.
    pub frequency: f32,
}

impl Default for IslandMotion {
    fn default() -> Self {
        Self {
            base_height: -5.0,
            amplitude: 0.5,
            frequency: 0.5,
        }
    }
}

impl IslandMotion {
    #[inline]
    #[must_use]
    pub fn height(&self, t: f32) -> f32 {
        self.base_height + self.amplitude * (t * self.frequency).sin()
    }
}

/// Circular flight path of the bird around the world Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirdFlight {
    pub radius: f32,
    /// Radians per second along the circle.
    pub angular_speed: f32,
    pub base_height: f32,
    pub bob_amplitude: f32,
    pub bob_frequency: f32,
    /// Roll in radians at full bank.
    pub bank_factor: f32,
}

impl Default for BirdFlight {
    fn default() -> Self {
        Self {
            radius: 15.0,
            angular_speed: 0.5,
            base_height: 5.0,
            bob_amplitude: 1.0,
            bob_frequency: 1.0,
            bank_factor: 0.1,
        }
    }
}

/// Position and orientation of the bird at one instant.
///
/// Orientation is applied as Euler XYZ `(0, yaw, roll)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightPose {
    pub position: Vec3,
    pub yaw: f32,
    pub roll: f32,
}

impl BirdFlight {
    #[inline]
    fn phase(&self, t: f32) -> f32 {
        t * self.angular_speed
    }

    #[must_use]
    pub fn position(&self, t: f32) -> Vec3 {
        let phase = self.phase(t);
        Vec3::new(
            self.radius * phase.cos(),
            self.base_height + self.bob_amplitude * (t * self.bob_frequency).sin(),
            self.radius * phase.sin(),
        )
    }

    /// Heading around Y that keeps the bird facing along the circle.
    ///
    /// Jumps by `2π` where `atan2` crosses its branch cut; compare headings
    /// with [`angle_difference`].
    #[must_use]
    pub fn yaw(&self, t: f32) -> f32 {
        let phase = self.phase(t);
        (-phase.cos()).atan2(-phase.sin()) + FRAC_PI_2
    }

    #[must_use]
    pub fn roll(&self, t: f32) -> f32 {
        self.phase(t).sin() * self.bank_factor
    }

    #[must_use]
    pub fn pose(&self, t: f32) -> FlightPose {
        FlightPose {
            position: self.position(t),
            yaw: self.yaw(t),
            roll: self.roll(t),
        }
    }
}

/// Wraps an angle into `(-π, π]`.
#[must_use]
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI { wrapped + TAU } else { wrapped }
}

/// Smallest signed difference `b - a` between two headings.
#[must_use]
pub fn angle_difference(a: f32, b: f32) -> f32 {
    wrap_angle(b - a)
}
