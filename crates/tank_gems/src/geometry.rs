use crate::DomainError;

/// Relative slack granted to radicands and inverse sine arguments which are out of domain only
/// due to floating point round-off.
pub const DOMAIN_EPS: f64 = 1e-12;

pub fn disk_area(r: f64) -> f64 {
    r * r * core::f64::consts::PI
}

/// Half length of the chord at distance `z_height` from the center of a circle
pub fn circle_intersection(z_height: f64, radius: f64) -> Result<f64, DomainError> {
    let r2 = radius * radius;
    let radicand = r2 - z_height * z_height;
    if radicand >= 0. {
        Ok(radicand.sqrt())
    } else if radicand >= -DOMAIN_EPS * r2 {
        Ok(0.)
    } else {
        Err(DomainError::NegativeRadicand { z_height, radius })
    }
}

/// Length of the chord of a circle at height `h` measured from the bottom of the circle.
/// Defined for 0 <= h <= 2 * radius.
pub fn chord_at(h: f64, radius: f64) -> Result<f64, DomainError> {
    Ok(2. * circle_intersection(radius - h, radius)?)
}

/// Area of the circular segment cut off from a circle by a chord.
///
/// The chord must satisfy 0 <= chord <= 2 * radius. Note that the segment is always the smaller
/// of the two parts, i.e. a chord of length 2 * radius cuts the disk in half.
pub fn segment_area(radius: f64, chord: f64) -> Result<f64, DomainError> {
    if !(radius >= 0.) {
        return Err(DomainError::NegativeRadius { radius });
    }

    if radius == 0. {
        return if chord == 0. {
            Ok(0.)
        } else {
            Err(DomainError::ChordOutOfRange { chord, radius })
        };
    }

    let q = chord / (2. * radius);
    let q = if (0. ..=1.).contains(&q) {
        q
    } else if q > 1. && q <= 1. + DOMAIN_EPS {
        1.
    } else if q < 0. && q >= -DOMAIN_EPS {
        0.
    } else {
        return Err(DomainError::ChordOutOfRange { chord, radius });
    };

    let alpha = 2. * q.asin();
    Ok(0.5 * (alpha - alpha.sin()) * radius * radius)
}

/// Radius of the horizontal cross-section of a sphere at fill height `h`. The sphere center lies
/// `sphere_radius - offset` above the bottom of the tank.
pub fn effective_radius(h: f64, sphere_radius: f64, offset: f64) -> Result<f64, DomainError> {
    circle_intersection(sphere_radius - (h + offset), sphere_radius)
}

/// Wetted horizontal cross-section area of a spherical end cap at fill height `h`
///
/// The cap is cut from a sphere with radius `r1` by a plane. The base of the cap is a circle
/// with radius `r2`. At height `h` the water surface meets the sphere in a circle and the base
/// plane in a chord; the wetted area is the segment of that circle cut off by the chord.
pub fn sphere_cross_section(h: f64, r1: f64, r2: f64, offset: f64) -> Result<f64, DomainError> {
    let chord = chord_at(h, r2)?;
    let radius = effective_radius(h, r1, offset)?;
    segment_area(radius, chord)
}

/// Wetted cross-section area of a horizontal cylinder with radius `r` at fill height `h`
pub fn cylinder_cross_section(h: f64, r: f64) -> Result<f64, DomainError> {
    let segment = segment_area(r, chord_at(h, r)?)?;
    if h <= r {
        Ok(segment)
    } else {
        // past the midline the segment is the dry part above the water
        Ok(disk_area(r) - segment)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cylinder {
    pub radius: f64,
    pub length: f64,
}

impl Cylinder {
    pub fn is_non_zero(&self) -> bool {
        self.radius > 0. && self.length > 0.
    }

    pub fn cross_section_area(&self) -> f64 {
        disk_area(self.radius)
    }

    pub fn nominal_volume(&self) -> f64 {
        self.cross_section_area() * self.length
    }

    /// Wetted cross-section area when lying horizontally and filled up to height `h`
    pub fn wetted_area(&self, h: f64) -> Result<f64, DomainError> {
        cylinder_cross_section(h, self.radius)
    }

    /// Volume of liquid when lying horizontally and filled up to height `h`
    pub fn wetted_volume(&self, h: f64) -> Result<f64, DomainError> {
        Ok(self.wetted_area(h)? * self.length)
    }
}
