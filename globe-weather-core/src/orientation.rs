//! Globe orientation: mapping a [`Location`] to the rotation that faces it
//! toward the viewer, and mapping view-space points back to locations.
//!
//! # Texture convention
//!
//! The globe is a unit sphere textured with an equirectangular world map.
//! A local sphere point `(x, y, z)` has texture coordinates
//!
//! ```text
//! u = atan2(z, -x) / 2π      (wrapped into [0, 1))
//! v = acos(y) / π            (0 at the north pole)
//! ```
//!
//! and the texture has `u = 0` at longitude −180 and `v = 0` at latitude +90
//! (see [`Location::from_uv`]). The mesh rotation is an Euler XYZ triple, so a
//! local point `p` lands in view space at `Rx(x) · Ry(y) · Rz(z) · p`. The
//! viewer sits on the +z axis looking toward the origin.
//!
//! The offsets in [`target_rotation`] (the `π/2` terms and the sign flips)
//! are calibrated for this convention. A texture with a different prime
//! meridian or pole alignment needs different offsets.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::ops::{Add, Mul, Sub};

use crate::location::Location;
use crate::tween::Lerp;

/// A 3-vector used both for points and for Euler rotations (radians).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    fn rotate_x(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.x,
            self.y * cos - self.z * sin,
            self.y * sin + self.z * cos,
        )
    }

    fn rotate_y(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.x * cos + self.z * sin,
            self.y,
            -self.x * sin + self.z * cos,
        )
    }

    fn rotate_z(self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.x * cos - self.y * sin,
            self.x * sin + self.y * cos,
            self.z,
        )
    }

    /// Shift each angle by whole turns so it lies within half a turn of the
    /// matching angle in `reference`. The orientation is unchanged; a tween
    /// toward the result takes the short way round.
    pub fn unwound_toward(self, reference: Vec3) -> Self {
        Self::new(
            unwind(self.x, reference.x),
            unwind(self.y, reference.y),
            unwind(self.z, reference.z),
        )
    }
}

impl Add for Vec3 {
    type Output = Vec3;

    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Vec3;

    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;

    fn mul(self, rhs: f64) -> Vec3 {
        Vec3::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Lerp for Vec3 {
    fn lerp(self, to: Self, t: f64) -> Self {
        self + (to - self) * t
    }
}

fn unwind(angle: f64, reference: f64) -> f64 {
    let turns = ((reference - angle) / TAU).round();
    angle + turns * TAU
}

/// The globe rotation that brings `location` to face the viewer.
pub fn target_rotation(location: Location) -> Vec3 {
    let phi = (90.0 - location.latitude) * (PI / 180.0);
    let theta = (location.longitude + 180.0) * (PI / 180.0);
    Vec3::new(-phi + FRAC_PI_2, -theta + FRAC_PI_2, 0.0)
}

/// The unit-sphere point (mesh-local) where `location` sits on the texture.
pub fn sphere_point(location: Location) -> Vec3 {
    let phi = (90.0 - location.latitude) * (PI / 180.0);
    let theta = (location.longitude + 180.0) * (PI / 180.0);
    Vec3::new(
        -phi.sin() * theta.cos(),
        phi.cos(),
        phi.sin() * theta.sin(),
    )
}

/// The location on the texture under a mesh-local sphere point.
///
/// The point does not need to be normalized. The zero vector maps to the
/// north pole.
pub fn location_at(point: Vec3) -> Location {
    let len = point.length();
    if len == 0.0 || !len.is_finite() {
        return Location::from_uv(0.5, 0.0);
    }
    let p = point * (1.0 / len);
    let polar = p.y.clamp(-1.0, 1.0).acos();
    let azimuth = p.z.atan2(-p.x).rem_euclid(TAU);
    Location::from_uv(azimuth / TAU, polar / PI)
}

/// Transform a mesh-local point into view space.
pub fn to_view(local: Vec3, rotation: Vec3) -> Vec3 {
    local
        .rotate_z(rotation.z)
        .rotate_y(rotation.y)
        .rotate_x(rotation.x)
}

/// Transform a view-space point back into mesh-local space.
pub fn from_view(view: Vec3, rotation: Vec3) -> Vec3 {
    view.rotate_x(-rotation.x)
        .rotate_y(-rotation.y)
        .rotate_z(-rotation.z)
}

/// Where `location` appears in view space for a globe at `rotation`.
/// Points with `z > 0` are on the visible hemisphere.
pub fn project(location: Location, rotation: Vec3) -> Vec3 {
    to_view(sphere_point(location), rotation)
}

/// The location under the view-space disk point `(x, y)` of a unit globe at
/// `rotation`, or `None` when the point is off the globe.
pub fn pick(x: f64, y: f64, rotation: Vec3) -> Option<Location> {
    let r2 = x * x + y * y;
    if r2.is_nan() || r2 > 1.0 {
        return None;
    }
    let view = Vec3::new(x, y, (1.0 - r2).sqrt());
    Some(location_at(from_view(view, rotation)))
}
