/// The maximum thickness of a NACA 0012 airfoil as a fraction of the chord.
pub const DEFAULT_THICKNESS: f64 = 0.12;

// Coefficients of the NACA 4-digit half-thickness polynomial, normalized to a thickness of 0.20
const A0: f64 = 0.2969;
const A1: f64 = -0.1260;
const A2: f64 = -0.3516;
const A3: f64 = 0.2843;
const A4: f64 = -0.1015;

/// A ThicknessProfile is an entity which can compute the half-thickness of a symmetric airfoil at
/// fractions of the chord. The upper surface of the airfoil sits at +y and the lower surface at -y.
pub trait ThicknessProfile {
    /// Return the half-thickness of the airfoil at a chord fraction from 0.0 to 1.0
    fn half_thickness(&self, x: f64) -> f64;

    /// Evaluate the half-thickness at every chord fraction in `xs`, writing the results into `out`.
    /// Implementations must not allocate and must produce exactly the values `half_thickness`
    /// would produce for each element.
    ///
    /// # Panics
    ///
    /// Panics if `xs` and `out` have different lengths.
    fn half_thickness_into(&self, xs: &[f64], out: &mut [f64]) {
        assert_eq!(xs.len(), out.len(), "abscissa and ordinate buffers differ in length");
        for (y, x) in out.iter_mut().zip(xs) {
            *y = self.half_thickness(*x);
        }
    }

    /// Evaluate the half-thickness over a full set of chord fractions, allocating a single
    /// destination buffer.
    fn half_thickness_batch(&self, xs: &[f64]) -> Vec<f64> {
        let mut out = vec![0.0; xs.len()];
        self.half_thickness_into(xs, &mut out);
        out
    }
}

/// A generator for a symmetric NACA 4-digit airfoil of the form 00TT, where TT is the maximum
/// thickness of the airfoil as a fraction of the chord. For example, a NACA 0012 airfoil has a max
/// thickness which is 12% of the chord length.
///
/// The reference formula is not closed at the trailing edge: at x=1.0 the half-thickness is a
/// small positive residual (about 0.00126 for a NACA 0012).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Naca00xx {
    t: f64,
}

impl Naca00xx {
    /// Create a new symmetric NACA generator.
    ///
    /// # Arguments
    ///
    /// * `t_max` - the maximum thickness of the airfoil as a fraction of the chord length. For
    /// instance, on a NACA 0012 t_max should be 0.12. Must be positive; this is not checked.
    pub fn new(t_max: f64) -> Naca00xx {
        Naca00xx { t: t_max }
    }

    pub fn naca0012() -> Naca00xx {
        Naca00xx::new(DEFAULT_THICKNESS)
    }

    pub fn thickness_ratio(&self) -> f64 {
        self.t
    }

    fn scale(&self) -> f64 {
        5.0 * self.t
    }
}

impl Default for Naca00xx {
    fn default() -> Self {
        Naca00xx::naca0012()
    }
}

/// The integer-power part of the polynomial, nested so that it takes four multiply/add steps.
#[inline(always)]
fn horner(x: f64) -> f64 {
    (A1 + (A2 + (A3 + A4 * x) * x) * x) * x
}

impl ThicknessProfile for Naca00xx {
    fn half_thickness(&self, x: f64) -> f64 {
        let mut y = horner(x);
        y += A0 * x.sqrt();
        y * self.scale()
    }

    /// Three passes over the destination: the polynomial, the square root term accumulated on
    /// top of it, then the scale. The operation order matches `half_thickness` exactly.
    fn half_thickness_into(&self, xs: &[f64], out: &mut [f64]) {
        assert_eq!(xs.len(), out.len(), "abscissa and ordinate buffers differ in length");

        for (y, x) in out.iter_mut().zip(xs) {
            *y = horner(*x);
        }

        for (y, x) in out.iter_mut().zip(xs) {
            *y += A0 * x.sqrt();
        }

        let scale = self.scale();
        for y in out.iter_mut() {
            *y *= scale;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::prelude::*;
    use test_case::test_case;

    #[test_case(1.000000, 0.001260)]
    #[test_case(0.840000, 0.021694)]
    #[test_case(0.680000, 0.038557)]
    #[test_case(0.520000, 0.051635)]
    #[test_case(0.360000, 0.059263)]
    #[test_case(0.200000, 0.057375)]
    #[test_case(0.040000, 0.032277)]
    fn test_naca_0012_half_thickness(x: f64, e: f64) {
        let naca = Naca00xx::naca0012();
        let result = naca.half_thickness(x);
        assert_relative_eq!(e, result, epsilon = 1e-5);
    }

    #[test_case(0.06, 0.3)]
    #[test_case(0.12, 0.3)]
    #[test_case(0.24, 0.3)]
    fn test_maximum_thickness_matches_ratio(t: f64, x_max: f64) {
        // The NACA 4-digit thickness peaks at 30% chord with a full thickness of t
        let naca = Naca00xx::new(t);
        assert_relative_eq!(t, 2.0 * naca.half_thickness(x_max), epsilon = 1e-3 * t);
    }

    #[test]
    fn test_leading_edge_is_zero() {
        let naca = Naca00xx::default();
        assert_eq!(0.0, naca.half_thickness(0.0));
    }

    #[test]
    fn test_trailing_edge_residual_is_not_closed() {
        let naca = Naca00xx::default();
        let y = naca.half_thickness(1.0);
        assert!(y > 0.0);
        assert_relative_eq!(0.00126, y, epsilon = 1e-6);
    }

    #[test]
    fn test_thickness_scales_linearly() {
        let thin = Naca00xx::new(0.06);
        let thick = Naca00xx::new(0.12);
        for i in 0..=20 {
            let x = i as f64 / 20.0;
            assert_relative_eq!(
                2.0 * thin.half_thickness(x),
                thick.half_thickness(x),
                epsilon = 1e-12
            );
        }
    }

    #[test]
    fn test_scalar_and_batch_identical() {
        let mut rng = rand::thread_rng();
        let naca = Naca00xx::new(rng.gen_range(0.01..0.3));
        let xs: Vec<f64> = (0..5000).map(|_| rng.gen_range(0.0..=1.0)).collect();

        let batch = naca.half_thickness_batch(&xs);
        for (x, y) in xs.iter().zip(batch.iter()) {
            assert_eq!(naca.half_thickness(*x).to_bits(), y.to_bits());
        }
    }

    #[test]
    fn test_default_batch_matches_scalar() {
        struct Linear;
        impl ThicknessProfile for Linear {
            fn half_thickness(&self, x: f64) -> f64 {
                0.1 * x
            }
        }

        let xs = [0.0, 0.25, 0.5, 1.0];
        assert_eq!(vec![0.0, 0.025, 0.05, 0.1], Linear.half_thickness_batch(&xs));
    }

    #[test]
    #[should_panic]
    fn test_mismatched_buffers_panic() {
        let mut out = vec![0.0; 3];
        Naca00xx::default().half_thickness_into(&[0.0, 1.0], &mut out);
    }
}
