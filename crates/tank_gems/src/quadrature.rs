//! Adaptive Gauss-Kronrod quadrature
//!
//! Each subinterval is evaluated with the 15-point Kronrod rule. The embedded 7-point Gauss rule
//! gives an error estimate. The subinterval with the largest error is bisected until the total
//! error is within tolerance.
//!
//! Reference: https://en.wikipedia.org/wiki/Gauss%E2%80%93Kronrod_quadrature_formula

/// Maximal number of subintervals used by `integrate`
pub const MAX_SUBDIVISIONS: usize = 50;

/// Kronrod nodes on [-1, 1]; the nodes with odd index are also the Gauss nodes. Only the
/// non-negative half is listed, the last node is the center.
const XGK: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144845693013,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

/// Kronrod weights
const WGK: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

/// Gauss weights for the nodes XGK[1], XGK[3], XGK[5] and XGK[7]
const WG: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

/// Number of integrand evaluations per subinterval
const KRONROD_POINTS: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    pub absolute: f64,
    pub relative: f64,
}

impl Tolerance {
    pub const DEFAULT: Tolerance = Tolerance {
        absolute: 1.49e-8,
        relative: 1.49e-8,
    };

    fn accepts(&self, value: f64, error: f64) -> bool {
        error <= self.absolute.max(self.relative * value.abs())
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Result of a numerical integration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadrature {
    pub value: f64,

    /// Estimated absolute error of `value`
    pub error_estimate: f64,

    /// Number of integrand evaluations
    pub evaluations: usize,

    /// False if the error estimate is not within the requested tolerance
    pub converged: bool,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    low: f64,
    high: f64,
    value: f64,
    error: f64,
}

/// Integrates `f` over [low, high] with adaptive Gauss-Kronrod quadrature.
///
/// The first error returned by the integrand aborts the integration. Failing to reach the
/// tolerance is not an error, it is reported via `Quadrature::converged`. Non-finite bounds
/// yield a NaN value without evaluating the integrand.
pub fn integrate<F, E>(
    mut f: F,
    low: f64,
    high: f64,
    tolerance: Tolerance,
) -> Result<Quadrature, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    if !(low.is_finite() && high.is_finite()) {
        return Ok(Quadrature {
            value: f64::NAN,
            error_estimate: f64::INFINITY,
            evaluations: 0,
            converged: false,
        });
    }

    if low == high {
        return Ok(Quadrature {
            value: 0.,
            error_estimate: 0.,
            evaluations: 0,
            converged: true,
        });
    }

    if low > high {
        let mut out = integrate(f, high, low, tolerance)?;
        out.value = -out.value;
        return Ok(out);
    }

    let mut segments = vec![kronrod_15(&mut f, low, high)?];
    let mut evaluations = KRONROD_POINTS;

    loop {
        let value: f64 = segments.iter().map(|s| s.value).sum();
        let error: f64 = segments.iter().map(|s| s.error).sum();

        if tolerance.accepts(value, error) {
            return Ok(Quadrature {
                value,
                error_estimate: error,
                evaluations,
                converged: true,
            });
        }

        let worst = segments
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.error.total_cmp(&b.error))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let Segment { low, high, .. } = segments[worst];
        let mid = 0.5 * (low + high);

        if segments.len() >= MAX_SUBDIVISIONS || mid <= low || mid >= high {
            return Ok(Quadrature {
                value,
                error_estimate: error,
                evaluations,
                converged: false,
            });
        }

        segments[worst] = kronrod_15(&mut f, low, mid)?;
        segments.push(kronrod_15(&mut f, mid, high)?);
        evaluations += 2 * KRONROD_POINTS;
    }
}

/// 15-point Kronrod rule with error estimate from the embedded 7-point Gauss rule
fn kronrod_15<F, E>(f: &mut F, low: f64, high: f64) -> Result<Segment, E>
where
    F: FnMut(f64) -> Result<f64, E>,
{
    let center = 0.5 * (low + high);
    let half_length = 0.5 * (high - low);

    let fc = f(center)?;
    let mut result_gauss = fc * WG[3];
    let mut result_kronrod = fc * WGK[7];
    let mut result_abs = result_kronrod.abs();

    let mut samples = [(0., 0.); 7];
    for (j, sample) in samples.iter_mut().enumerate() {
        let dx = half_length * XGK[j];
        let f1 = f(center - dx)?;
        let f2 = f(center + dx)?;
        if j % 2 == 1 {
            result_gauss += WG[j / 2] * (f1 + f2);
        }
        result_kronrod += WGK[j] * (f1 + f2);
        result_abs += WGK[j] * (f1.abs() + f2.abs());
        *sample = (f1, f2);
    }

    // mean absolute deviation from the average value, used to scale the raw error
    let mean = 0.5 * result_kronrod;
    let mut result_asc = WGK[7] * (fc - mean).abs();
    for (j, (f1, f2)) in samples.iter().enumerate() {
        result_asc += WGK[j] * ((f1 - mean).abs() + (f2 - mean).abs());
    }

    let scale = half_length.abs();
    result_abs *= scale;
    result_asc *= scale;

    let mut error = ((result_kronrod - result_gauss) * half_length).abs();
    if result_asc != 0. && error != 0. {
        error = result_asc * (200. * error / result_asc).powf(1.5).min(1.);
    }
    if result_abs > f64::MIN_POSITIVE / (50. * f64::EPSILON) {
        error = error.max(50. * f64::EPSILON * result_abs);
    }

    Ok(Segment {
        low,
        high,
        value: result_kronrod * half_length,
        error,
    })
}
