use core::ops::RangeInclusive;

/// Newton's algorithm to find the root of a function, i.e. find x s.t. f(x) = 0
///
/// Iterates are clamped to `bounds`. Both the objective and its derivative may fail, the first
/// failure aborts the search.
pub fn newton_root_solver<F, DF, E>(
    x0: f64,
    bounds: RangeInclusive<f64>,
    accuracy: f64,
    max_iterations: usize,
    mut obj_f: F,
    mut dx_f: DF,
) -> Result<f64, NewtonRootSolverError<E>>
where
    F: FnMut(f64) -> Result<f64, E>,
    DF: FnMut(f64) -> Result<f64, E>,
{
    let mut x = x0.clamp(*bounds.start(), *bounds.end());
    for i in 0..max_iterations {
        let y = obj_f(x).map_err(NewtonRootSolverError::Objective)?;

        log::trace!("newton iteration {i}: x: {x}, y: {y}");

        if y.abs() < accuracy {
            return Ok(x);
        }

        let m = dx_f(x).map_err(NewtonRootSolverError::Objective)?;

        if m.abs() < 1e-9 {
            return Err(NewtonRootSolverError::Plateau { x, y, m });
        }

        x = (x - y / m).clamp(*bounds.start(), *bounds.end());
    }
    Err(NewtonRootSolverError::IterationCountExceeded { x })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NewtonRootSolverError<E> {
    Plateau { x: f64, y: f64, m: f64 },
    IterationCountExceeded { x: f64 },
    Objective(E),
}

impl<E> NewtonRootSolverError<E> {
    pub fn best_guess(&self) -> Option<f64> {
        match *self {
            NewtonRootSolverError::Plateau { x, .. } => Some(x),
            NewtonRootSolverError::IterationCountExceeded { x } => Some(x),
            NewtonRootSolverError::Objective(_) => None,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use core::convert::Infallible;

    fn ok(x: f64) -> Result<f64, Infallible> {
        Ok(x)
    }

    #[test]
    fn test_sqrt_two() {
        let actual =
            newton_root_solver(1., 0.0..=2.0, 1e-12, 20, |x| ok(x * x - 2.), |x| ok(2. * x))
                .unwrap();
        approx::assert_abs_diff_eq!(actual, 2f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_clamped_to_bounds() {
        // the first step overshoots far beyond the upper bound
        let actual = newton_root_solver(
            0.1,
            0.0..=3.0,
            1e-12,
            50,
            |x| ok(x * x * x - 8.),
            |x| ok(3. * x * x),
        )
        .unwrap();
        approx::assert_abs_diff_eq!(actual, 2., epsilon = 1e-9);
    }

    #[test]
    fn test_plateau() {
        let err =
            newton_root_solver(0., -1.0..=1.0, 1e-12, 20, |x| ok(x * x + 1.), |x| ok(2. * x))
                .unwrap_err();
        assert_eq!(
            err,
            NewtonRootSolverError::Plateau {
                x: 0.,
                y: 1.,
                m: 0.
            }
        );
        assert_eq!(err.best_guess(), Some(0.));
    }

    #[test]
    fn test_iteration_count_exceeded() {
        let err = newton_root_solver(0.5, 0.0..=10.0, 1e-12, 3, |x| ok(x.ln()), |x| ok(1. / x))
            .unwrap_err();
        assert!(matches!(
            err,
            NewtonRootSolverError::IterationCountExceeded { .. }
        ));
        assert!(err.best_guess().is_some());
    }

    #[test]
    fn test_objective_error() {
        let err = newton_root_solver(0.5, 0.0..=1.0, 1e-12, 10, |_| Err("boom"), |_| Ok(1.))
            .unwrap_err();
        assert_eq!(err, NewtonRootSolverError::Objective("boom"));
        assert_eq!(err.best_guess(), None);
    }
}
