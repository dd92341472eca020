//! Horizontal tank with a cylindrical body closed by two spherical caps
//!
//! The volume of the cylindrical body is computed in closed form from the wetted circular
//! segment. The volume of a cap is the integral of its wetted horizontal cross-section from the
//! bottom of the tank up to the fill height.

use crate::{
    Cylinder, NewtonRootSolverError, Tolerance, TankError, chord_at, integrate,
    length_from_millimeters, newton_root_solver, sphere_cross_section,
};

/// Volume accuracy for the fill height search relative to the full tank volume
const FILL_HEIGHT_RELATIVE_ACCURACY: f64 = 1e-9;

const FILL_HEIGHT_MAX_ITERATIONS: usize = 50;

/// The tank this tool was written for
pub const TANK_GEOMETRY: TankGeometry = TankGeometry {
    sphere_radius: length_from_millimeters(2540.),
    cap_base_radius: length_from_millimeters(1800.),
    offset: length_from_millimeters(740.),
    cylinder: Cylinder {
        radius: length_from_millimeters(1800.),
        length: length_from_millimeters(19_000.),
    },
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankGeometry {
    /// Radius of the sphere the end caps are cut from (r1)
    pub sphere_radius: f64,

    /// Radius of the circle where an end cap meets the cylinder (r2)
    pub cap_base_radius: f64,

    /// Distance by which the sphere reaches below the bottom of the tank. With
    /// `sphere_radius - offset == cap_base_radius` the sphere center lies on the tank axis.
    pub offset: f64,

    pub cylinder: Cylinder,
}

/// Volume of liquid in the tank in m³
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TankVolume {
    /// Volume in one of the two end caps
    pub sphere: f64,

    /// Volume in the cylindrical body
    pub cylinder: f64,

    pub total: f64,
}

impl TankGeometry {
    pub fn validate(&self) -> Result<(), TankError> {
        let dims = [
            self.sphere_radius,
            self.cap_base_radius,
            self.offset,
            self.cylinder.radius,
            self.cylinder.length,
        ];
        if !dims.iter().all(|x| x.is_finite()) {
            return Err(TankError::InvalidGeometry("dimensions must be finite"));
        }
        if !(self.sphere_radius > 0. && self.cap_base_radius > 0. && self.cylinder.is_non_zero())
        {
            return Err(TankError::InvalidGeometry("dimensions must be positive"));
        }
        if self.offset < 0. {
            return Err(TankError::InvalidGeometry("offset must not be negative"));
        }
        if self.cap_base_radius > self.cylinder.radius {
            return Err(TankError::InvalidGeometry(
                "cap base radius exceeds cylinder radius",
            ));
        }
        if self.cap_base_radius > self.sphere_radius {
            return Err(TankError::InvalidGeometry(
                "cap base radius exceeds sphere radius",
            ));
        }
        Ok(())
    }

    /// Fill height of a completely filled tank
    pub fn max_fill_height(&self) -> f64 {
        2. * self.cylinder.radius
    }

    /// Volume of liquid when filled up to height `h` measured from the bottom of the tank
    pub fn volume(&self, h: f64) -> Result<TankVolume, TankError> {
        self.validate()?;
        self.check_fill_height(h)?;

        let sphere = self.cap_volume(h)?;

        let cylinder = self.cylinder.wetted_volume(h)?;
        log::debug!(
            "cylinder: {} at h={h}: {cylinder}",
            if h <= self.cylinder.radius {
                "segment"
            } else {
                "complement"
            }
        );

        Ok(TankVolume {
            sphere,
            cylinder,
            total: 2. * sphere + cylinder,
        })
    }

    /// Volume of a completely filled tank
    pub fn full_volume(&self) -> Result<f64, TankError> {
        Ok(self.volume(self.max_fill_height())?.total)
    }

    /// Derivative of the total volume with respect to the fill height, i.e. the area of the
    /// water surface summed over both caps and the cylinder
    pub fn volume_derivative(&self, h: f64) -> Result<f64, TankError> {
        self.check_fill_height(h)?;
        let cap = sphere_cross_section(h, self.sphere_radius, self.cap_base_radius, self.offset)?;
        // water surface in the cylinder is a rectangle spanning the waterline chord
        let cylinder = chord_at(h, self.cylinder.radius)? * self.cylinder.length;
        Ok(2. * cap + cylinder)
    }

    /// Fill height at which the tank holds the given volume
    pub fn fill_height(&self, volume: f64) -> Result<f64, TankError> {
        let full_volume = self.full_volume()?;
        if !(0. ..=full_volume).contains(&volume) {
            return Err(TankError::VolumeOutOfRange {
                volume,
                full_volume,
            });
        }

        let max_height = self.max_fill_height();
        if volume == 0. {
            return Ok(0.);
        }
        if volume == full_volume {
            return Ok(max_height);
        }

        // The volume is convex below and concave above the midline. Starting at the midline
        // keeps all iterates on the same side of the root.
        newton_root_solver(
            self.cylinder.radius,
            0.0..=max_height,
            FILL_HEIGHT_RELATIVE_ACCURACY * full_volume,
            FILL_HEIGHT_MAX_ITERATIONS,
            |h| -> Result<f64, TankError> { Ok(self.volume(h)?.total - volume) },
            |h| self.volume_derivative(h),
        )
        .map_err(|err| match err {
            NewtonRootSolverError::Objective(err) => err,
            NewtonRootSolverError::Plateau { x: best_guess, .. }
            | NewtonRootSolverError::IterationCountExceeded { x: best_guess } => {
                TankError::NoConvergence { volume, best_guess }
            }
        })
    }

    fn check_fill_height(&self, h: f64) -> Result<(), TankError> {
        let max_height = self.max_fill_height();
        if (0. ..=max_height).contains(&h) {
            Ok(())
        } else {
            Err(TankError::FillHeightOutOfRange {
                height: h,
                max_height,
            })
        }
    }

    /// Volume of liquid in one end cap
    fn cap_volume(&self, h: f64) -> Result<f64, TankError> {
        let quad = integrate(
            |x| sphere_cross_section(x, self.sphere_radius, self.cap_base_radius, self.offset),
            0.,
            h,
            Tolerance::DEFAULT,
        )?;

        log::debug!(
            "cap integral over [0, {h}]: {} (error: {:e}, evaluations: {})",
            quad.value,
            quad.error_estimate,
            quad.evaluations
        );
        if !quad.converged {
            log::warn!(
                "cap integral over [0, {h}] did not reach tolerance (error estimate: {:e})",
                quad.error_estimate
            );
        }

        Ok(quad.value)
    }
}

/// Volume of liquid in a tank with the given dimensions filled up to height `h`
pub fn total_volume(
    h: f64,
    r1: f64,
    r2: f64,
    offset: f64,
    cylinder_radius: f64,
    cylinder_length: f64,
) -> Result<TankVolume, TankError> {
    TankGeometry {
        sphere_radius: r1,
        cap_base_radius: r2,
        offset,
        cylinder: Cylinder {
            radius: cylinder_radius,
            length: cylinder_length,
        },
    }
    .volume(h)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tank_geometry() {
        approx::assert_abs_diff_eq!(TANK_GEOMETRY.sphere_radius, 2.54, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(TANK_GEOMETRY.cap_base_radius, 1.8, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(TANK_GEOMETRY.offset, 0.74, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(TANK_GEOMETRY.cylinder.radius, 1.8, epsilon = 1e-12);
        approx::assert_abs_diff_eq!(TANK_GEOMETRY.cylinder.length, 19., epsilon = 1e-12);
        assert!(TANK_GEOMETRY.validate().is_ok());
        approx::assert_abs_diff_eq!(TANK_GEOMETRY.max_fill_height(), 3.6, epsilon = 1e-12);
    }

    #[test]
    fn test_empty() {
        let actual = TANK_GEOMETRY.volume(0.).unwrap();
        assert_eq!(actual.sphere, 0.);
        approx::assert_abs_diff_eq!(actual.cylinder, 0.);
        approx::assert_abs_diff_eq!(actual.total, 0.);
    }

    #[test]
    fn test_fill_height_out_of_range() {
        for h in [-0.1, 3.7, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                TANK_GEOMETRY.volume(h),
                Err(TankError::FillHeightOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_geometry() {
        let mut geometry = TANK_GEOMETRY;
        geometry.cap_base_radius = 2.0;
        assert!(matches!(
            geometry.volume(1.0),
            Err(TankError::InvalidGeometry(_))
        ));

        let mut geometry = TANK_GEOMETRY;
        geometry.offset = -0.1;
        assert!(matches!(
            geometry.validate(),
            Err(TankError::InvalidGeometry(_))
        ));

        let mut geometry = TANK_GEOMETRY;
        geometry.cylinder.length = 0.;
        assert!(geometry.validate().is_err());

        let mut geometry = TANK_GEOMETRY;
        geometry.sphere_radius = f64::NAN;
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_volume_derivative() {
        let dh = 1e-5;
        for h in [0.1, 1.3, 1.8, 2.7, 3.5] {
            let lo = TANK_GEOMETRY.volume(h - dh).unwrap().total;
            let hi = TANK_GEOMETRY.volume(h + dh).unwrap().total;
            approx::assert_relative_eq!(
                TANK_GEOMETRY.volume_derivative(h).unwrap(),
                (hi - lo) / (2. * dh),
                max_relative = 1e-6
            );
        }
        approx::assert_abs_diff_eq!(TANK_GEOMETRY.volume_derivative(0.).unwrap(), 0.);
        approx::assert_abs_diff_eq!(
            TANK_GEOMETRY.volume_derivative(TANK_GEOMETRY.max_fill_height()).unwrap(),
            0.,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_volume_derivative_at_midline() {
        // surface spans the full cylinder diameter and the widest cap cross-section
        let r = TANK_GEOMETRY.cylinder.radius;
        let cap = sphere_cross_section(
            r,
            TANK_GEOMETRY.sphere_radius,
            TANK_GEOMETRY.cap_base_radius,
            TANK_GEOMETRY.offset,
        )
        .unwrap();
        approx::assert_relative_eq!(
            TANK_GEOMETRY.volume_derivative(r).unwrap(),
            2. * r * TANK_GEOMETRY.cylinder.length + 2. * cap,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_fill_height_bounds() {
        let full = TANK_GEOMETRY.full_volume().unwrap();
        assert_eq!(TANK_GEOMETRY.fill_height(0.).unwrap(), 0.);
        assert_eq!(
            TANK_GEOMETRY.fill_height(full).unwrap(),
            TANK_GEOMETRY.max_fill_height()
        );
        assert!(matches!(
            TANK_GEOMETRY.fill_height(-1.),
            Err(TankError::VolumeOutOfRange { .. })
        ));
        assert!(matches!(
            TANK_GEOMETRY.fill_height(full + 1.),
            Err(TankError::VolumeOutOfRange { .. })
        ));
    }
}
