//! The embedded 7-point Gauss / 15-point Kronrod rule.
//!
//! The Kronrod extension adds 8 points to the 7-point Gauss rule. Both
//! rules share the Gauss points, so one batch of 15 evaluations yields two
//! estimates whose difference serves as an error indicator.
//!
//! The Gauss abscissae are the odd-indexed Kronrod abscissae (1, 3, ..., 13
//! when the 15 points are numbered 0..14 from left to right).

use numerus_core::{NumericValue, Real};

/// Number of evaluation points per interval.
pub const KRONROD_POINTS: usize = 15;

/// Number of Gauss points per interval.
pub const GAUSS_POINTS: usize = 7;

/// Kronrod abscissae on [-1, 1], ascending.
const XGK: [f64; KRONROD_POINTS] = [
    -0.991_455_371_120_812_639_206_854_697_526_329,
    -0.949_107_912_342_758_524_526_189_684_047_851,
    -0.864_864_423_359_769_072_789_712_788_640_926,
    -0.741_531_185_599_394_439_863_864_773_280_788,
    -0.586_087_235_467_691_130_294_144_838_258_730,
    -0.405_845_151_377_397_166_906_606_412_076_961,
    -0.207_784_955_007_898_467_600_689_403_773_245,
    0.0,
    0.207_784_955_007_898_467_600_689_403_773_245,
    0.405_845_151_377_397_166_906_606_412_076_961,
    0.586_087_235_467_691_130_294_144_838_258_730,
    0.741_531_185_599_394_439_863_864_773_280_788,
    0.864_864_423_359_769_072_789_712_788_640_926,
    0.949_107_912_342_758_524_526_189_684_047_851,
    0.991_455_371_120_812_639_206_854_697_526_329,
];

/// Kronrod weights, matching [`XGK`].
const WGK: [f64; KRONROD_POINTS] = [
    0.022_935_322_010_529_224_963_732_008_058_970,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.209_482_141_084_727_828_012_999_174_891_714,
    0.204_432_940_075_298_892_414_161_999_234_649,
    0.190_350_578_064_785_409_913_256_402_421_014,
    0.169_004_726_639_267_902_826_583_426_598_550,
    0.140_653_259_715_525_918_745_189_590_510_238,
    0.104_790_010_322_250_183_839_876_322_541_518,
    0.063_092_092_629_978_553_290_700_663_189_204,
    0.022_935_322_010_529_224_963_732_008_058_970,
];

/// Gauss weights for Kronrod points 1, 3, ..., 13.
const WG: [f64; GAUSS_POINTS] = [
    0.129_484_966_168_869_693_270_611_432_679_082,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.417_959_183_673_469_387_755_102_040_816_327,
    0.381_830_050_505_118_944_950_369_775_488_975,
    0.279_705_391_489_276_667_901_467_771_423_780,
    0.129_484_966_168_869_693_270_611_432_679_082,
];

/// The pair of estimates produced by one application of the rule.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleEstimate<V> {
    /// 15-point Kronrod estimate, the better of the two.
    pub kronrod: V,
    /// 7-point Gauss estimate.
    pub gauss: V,
}

/// The G7-K15 rule tables converted to the working precision.
#[derive(Clone, Debug)]
pub struct GaussKronrod15<S> {
    abscissae: [S; KRONROD_POINTS],
    kronrod_weights: [S; KRONROD_POINTS],
    gauss_weights: [S; GAUSS_POINTS],
}

impl<S: Real> Default for GaussKronrod15<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Real> GaussKronrod15<S> {
    /// Builds the rule tables.
    pub fn new() -> Self {
        Self {
            abscissae: XGK.map(S::lit),
            kronrod_weights: WGK.map(S::lit),
            gauss_weights: WG.map(S::lit),
        }
    }

    /// Kronrod abscissae on the reference interval [-1, 1].
    pub fn abscissae(&self) -> &[S; KRONROD_POINTS] {
        &self.abscissae
    }

    /// The 15 evaluation points mapped affinely from [-1, 1] onto
    /// `[lower, upper]`.
    pub fn scaled_points(&self, lower: S, upper: S) -> [S; KRONROD_POINTS] {
        let one = S::one();
        let half = S::lit(0.5);
        self.abscissae
            .map(|x| half * (upper * (x + one) - lower * (x - one)))
    }

    /// Appends the 15 scaled points of `[lower, upper]` to `points`.
    pub fn push_scaled_points(&self, lower: S, upper: S, points: &mut Vec<S>) {
        points.extend_from_slice(&self.scaled_points(lower, upper));
    }

    /// Applies both rules to the 15 values of one interval of length
    /// `length`, in the order of [`Self::scaled_points`].
    pub fn evaluate_rule<V>(&self, length: S, values: &[V; KRONROD_POINTS]) -> RuleEstimate<V>
    where
        V: NumericValue<Scalar = S>,
    {
        let half_length = length * S::lit(0.5);

        let kronrod = values
            .iter()
            .zip(&self.kronrod_weights)
            .fold(V::zero(), |acc, (f, &w)| acc.plus(&f.scaled(w)));

        let gauss = self
            .gauss_weights
            .iter()
            .enumerate()
            .fold(V::zero(), |acc, (i, &w)| acc.plus(&values[2 * i + 1].scaled(w)));

        RuleEstimate {
            kronrod: kronrod.scaled(half_length),
            gauss: gauss.scaled(half_length),
        }
    }

    /// Empirical error `(200 |gauss - kronrod|)^1.5`, per component.
    pub fn error_estimate<V>(&self, estimate: &RuleEstimate<V>) -> V
    where
        V: NumericValue<Scalar = S>,
    {
        let scale = S::lit(200.0);
        let exponent = S::lit(1.5);
        estimate
            .gauss
            .zip_components(&estimate.kronrod, |g, k| (scale * (g - k).abs()).powf(exponent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn apply<F: Fn(f64) -> f64>(f: F, a: f64, b: f64) -> RuleEstimate<f64> {
        let rule = GaussKronrod15::<f64>::new();
        let values = rule.scaled_points(a, b).map(f);
        rule.evaluate_rule(b - a, &values)
    }

    #[test]
    fn test_weights_sum_to_two() {
        let kronrod: f64 = WGK.iter().sum();
        let gauss: f64 = WG.iter().sum();
        assert!((kronrod - 2.0).abs() < 1e-14);
        assert!((gauss - 2.0).abs() < 1e-14);
    }

    #[test]
    fn test_gauss_points_are_odd_kronrod_points() {
        // The 7-point Gauss-Legendre nodes.
        let gauss_nodes = [
            -0.949_107_912_342_758_5,
            -0.741_531_185_599_394_4,
            -0.405_845_151_377_397_2,
            0.0,
            0.405_845_151_377_397_2,
            0.741_531_185_599_394_4,
            0.949_107_912_342_758_5,
        ];
        for (i, node) in gauss_nodes.iter().enumerate() {
            assert!((XGK[2 * i + 1] - node).abs() < 1e-15);
        }
    }

    #[test]
    fn test_scaled_points_span_interval() {
        let rule = GaussKronrod15::<f64>::new();
        let points = rule.scaled_points(2.0, 4.0);
        assert_eq!(points[7], 3.0);
        assert!(points[0] > 2.0 && points[14] < 4.0);
        assert!(points.windows(2).all(|w| w[0] < w[1]));
        assert!((points[0] - (3.0 - 0.991_455_371_120_812_6)).abs() < 1e-14);
    }

    #[test]
    fn test_polynomial_exactness() {
        // Gauss is exact to degree 13, Kronrod to degree 22.
        let est = apply(|x| x.powi(13), 0.0, 1.0);
        assert!((est.gauss - 1.0 / 14.0).abs() < 1e-14);
        assert!((est.kronrod - 1.0 / 14.0).abs() < 1e-14);

        let est = apply(|x| x.powi(20), 0.0, 1.0);
        assert!((est.kronrod - 1.0 / 21.0).abs() < 1e-14);
    }

    #[test]
    fn test_sine() {
        let est = apply(f64::sin, 0.0, PI);
        assert!((est.kronrod - 2.0).abs() < 1e-14);
    }

    #[test]
    fn test_error_estimate_formula() {
        let rule = GaussKronrod15::<f64>::new();
        let est = RuleEstimate {
            kronrod: 1.0_f64,
            gauss: 1.0 + 1e-6,
        };
        // 1 + 1e-6 is not exact, so take the difference as stored
        let expected = (200.0 * (est.gauss - est.kronrod).abs()).powf(1.5);
        assert!((rule.error_estimate(&est) - expected).abs() < 1e-12 * expected);
    }

    #[test]
    fn test_error_estimate_is_per_component() {
        let rule = GaussKronrod15::<f64>::new();
        let est = RuleEstimate {
            kronrod: [1.0, 2.0],
            gauss: [1.0, 2.0 + 1e-3],
        };
        let err = rule.error_estimate(&est);
        assert_eq!(err[0], 0.0);
        assert!((err[1] - (0.2_f64).powf(1.5)).abs() < 1e-12);
    }

    #[test]
    fn test_single_precision_rule() {
        let rule = GaussKronrod15::<f32>::new();
        let values = rule.scaled_points(0.0_f32, 1.0).map(|x| x * x);
        let est = rule.evaluate_rule(1.0, &values);
        assert!((est.kronrod - 1.0 / 3.0).abs() < 1e-6);
    }
}
