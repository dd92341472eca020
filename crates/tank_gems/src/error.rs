use thiserror::Error;

/// A geometric precondition was violated, i.e. a square root of a negative number or an inverse
/// sine outside of [-1, 1] would have been taken.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum DomainError {
    #[error("height {z_height} is outside of a circle with radius {radius}")]
    NegativeRadicand { z_height: f64, radius: f64 },

    #[error("chord of length {chord} does not fit into a circle with radius {radius}")]
    ChordOutOfRange { chord: f64, radius: f64 },

    #[error("radius must not be negative: {radius}")]
    NegativeRadius { radius: f64 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TankError {
    #[error("fill height {height} m is outside of the tank [0, {max_height}] m")]
    FillHeightOutOfRange { height: f64, max_height: f64 },

    #[error("volume {volume} m³ is outside of the tank [0, {full_volume}] m³")]
    VolumeOutOfRange { volume: f64, full_volume: f64 },

    #[error("invalid tank geometry: {0}")]
    InvalidGeometry(&'static str),

    #[error("fill height search for volume {volume} m³ did not converge (best guess {best_guess} m)")]
    NoConvergence { volume: f64, best_guess: f64 },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_no_convergence_message() {
        let err = TankError::NoConvergence {
            volume: 12.5,
            best_guess: 0.25,
        };
        assert_eq!(
            err.to_string(),
            "fill height search for volume 12.5 m³ did not converge (best guess 0.25 m)"
        );
    }

    #[test]
    fn test_domain_error_is_transparent() {
        let err = TankError::from(DomainError::NegativeRadius { radius: -1. });
        assert_eq!(err.to_string(), "radius must not be negative: -1");
    }
}
