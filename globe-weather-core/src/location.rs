//! Geographic locations and the conversions between them and texture space.
//!
//! A [`Location`] is always a whole value: selecting a new point on the map
//! replaces it, it is never edited field by field.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LocationError;

/// A latitude/longitude pair in degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// Seoul, the location shown on startup.
    pub const SEOUL: Location = Location {
        latitude: 37.5665,
        longitude: 126.9780,
    };

    /// Create a location, rejecting non-finite or out-of-range coordinates.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(LocationError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Create a location by clamping latitude and wrapping longitude.
    ///
    /// Non-finite input falls back to zero on the affected axis.
    pub fn clamped(latitude: f64, longitude: f64) -> Self {
        let latitude = if latitude.is_finite() {
            latitude.clamp(-90.0, 90.0)
        } else {
            0.0
        };
        let longitude = if longitude.is_finite() {
            wrap_longitude(longitude)
        } else {
            0.0
        };
        Self {
            latitude,
            longitude,
        }
    }

    /// Move by the given number of degrees, clamping at the poles and
    /// wrapping across the antimeridian.
    pub fn offset(self, d_lat: f64, d_lng: f64) -> Self {
        Self::clamped(self.latitude + d_lat, self.longitude + d_lng)
    }

    /// Map equirectangular texture coordinates to a location.
    ///
    /// `u = 0` is longitude −180 and `u = 1` is +180; `v = 0` is the north
    /// pole and `v = 1` the south pole. Values outside `[0, 1]` are clamped.
    pub fn from_uv(u: f64, v: f64) -> Self {
        let u = u.clamp(0.0, 1.0);
        let v = v.clamp(0.0, 1.0);
        Self {
            latitude: 90.0 - v * 180.0,
            longitude: u * 360.0 - 180.0,
        }
    }

    /// Inverse of [`Location::from_uv`].
    pub fn to_uv(self) -> (f64, f64) {
        (
            (self.longitude + 180.0) / 360.0,
            (90.0 - self.latitude) / 180.0,
        )
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::SEOUL
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ns = if self.latitude >= 0.0 { 'N' } else { 'S' };
        let ew = if self.longitude >= 0.0 { 'E' } else { 'W' };
        write!(
            f,
            "{:.2}°{}, {:.2}°{}",
            self.latitude.abs(),
            ns,
            self.longitude.abs(),
            ew
        )
    }
}

/// Wrap a longitude in degrees into `[-180, 180]`.
pub fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        return longitude;
    }
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 && longitude > 0.0 {
        180.0
    } else {
        wrapped
    }
}
