//! Coincidence counters and the full coefficient dictionary.
//!
//! A [`Counters`] record condenses an aggregate column-sum vector into the
//! five quantities every binary similarity index here is a ratio of:
//! on-bit coincidences `a`, off-bit coincidences `d`, their sum
//! `total_sim`, the mismatch mass `total_dis`, and the grand total `p`.
//! With exponent `k > 1` each per-feature term is taken to the 1/k power
//! before summing, damping the contribution of highly populated features.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SimError};
use crate::matrix::FpMatrix;

/// The 11 similarity indices derivable from a [`Counters`] record.
///
/// Only [`Rr`](Coefficient::Rr), [`Jt`](Coefficient::Jt), and
/// [`Sm`](Coefficient::Sm) admit the linear aggregate identity used by
/// clustering and complementary similarity; see [`crate::nary::NAryIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Coefficient {
    /// Austin-Colwell.
    Ac,
    /// Baroni-Urbani-Buser.
    Bub,
    /// Faith.
    Fai,
    /// Gleason.
    Gle,
    /// Jaccard.
    Ja,
    /// Jaccard-Tanimoto.
    Jt,
    /// Rogers-Tanimoto.
    Rt,
    /// Russell-Rao.
    Rr,
    /// Sokal-Michener.
    Sm,
    /// Sokal-Sneath 1.
    Ss1,
    /// Sokal-Sneath 2.
    Ss2,
}

impl Coefficient {
    /// Every coefficient, in dictionary order.
    pub const ALL: [Coefficient; 11] = [
        Coefficient::Ac,
        Coefficient::Bub,
        Coefficient::Fai,
        Coefficient::Gle,
        Coefficient::Ja,
        Coefficient::Jt,
        Coefficient::Rt,
        Coefficient::Rr,
        Coefficient::Sm,
        Coefficient::Ss1,
        Coefficient::Ss2,
    ];

    /// Canonical short name, as accepted by [`FromStr`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Coefficient::Ac => "AC",
            Coefficient::Bub => "BUB",
            Coefficient::Fai => "Fai",
            Coefficient::Gle => "Gle",
            Coefficient::Ja => "Ja",
            Coefficient::Jt => "JT",
            Coefficient::Rt => "RT",
            Coefficient::Rr => "RR",
            Coefficient::Sm => "SM",
            Coefficient::Ss1 => "SS1",
            Coefficient::Ss2 => "SS2",
        }
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Coefficient {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "AC" => Ok(Coefficient::Ac),
            "BUB" => Ok(Coefficient::Bub),
            "Fai" => Ok(Coefficient::Fai),
            "Gle" => Ok(Coefficient::Gle),
            "Ja" => Ok(Coefficient::Ja),
            "JT" => Ok(Coefficient::Jt),
            "RT" => Ok(Coefficient::Rt),
            "RR" => Ok(Coefficient::Rr),
            "SM" => Ok(Coefficient::Sm),
            "SS1" => Ok(Coefficient::Ss1),
            "SS2" => Ok(Coefficient::Ss2),
            other => Err(SimError::InvalidArgument(format!(
                "unknown coefficient name: {other:?}"
            ))),
        }
    }
}

/// Coincidence / dissimilarity counters for a set of binary fingerprints,
/// derived from the column-sum aggregate alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Counters {
    /// Weighted on-bit coincidences: Σ (s·(s−1)/2)^(1/k).
    pub a: f64,
    /// Weighted off-bit coincidences, same form over the complement counts.
    pub d: f64,
    /// a + d.
    pub total_sim: f64,
    /// Weighted mismatches: Σ (s·(n−s))^(1/k).
    pub total_dis: f64,
    /// total_sim + total_dis.
    pub p: f64,
}

impl Counters {
    /// Build the record from an aggregate column sum over `n_objects` rows.
    ///
    /// `k = 1` is the ordinary case; larger `k` applies the power-mean
    /// damping per feature. Fails with `InvalidArgument` iff
    /// `n_objects < 1`.
    pub fn from_col_sum(col_sum: &[f64], n_objects: usize, k: u32) -> Result<Self> {
        if n_objects < 1 {
            return Err(SimError::InvalidArgument(
                "counters need at least one object".into(),
            ));
        }
        let n = n_objects as f64;
        let exp = 1.0 / k as f64;
        let mut a = 0.0;
        let mut d = 0.0;
        let mut total_dis = 0.0;
        for &s in col_sum {
            let off = n - s;
            a += (s * (s - 1.0) / 2.0).powf(exp);
            d += (off * (off - 1.0) / 2.0).powf(exp);
            total_dis += (s * off).powf(exp);
        }
        let total_sim = a + d;
        Ok(Self {
            a,
            d,
            total_sim,
            total_dis,
            p: total_sim + total_dis,
        })
    }

    /// Build the record from a full matrix, summing the columns first.
    pub fn from_matrix(fps: &FpMatrix<'_>, k: u32) -> Result<Self> {
        Self::from_col_sum(&fps.col_sum(), fps.n_rows(), k)
    }

    /// Evaluate one coefficient from this record.
    ///
    /// A zero-variance aggregate can make a ratio 0/0; the resulting NaN
    /// is returned as-is rather than clamped.
    pub fn coefficient(&self, index: Coefficient) -> f64 {
        let Counters {
            a,
            d,
            total_sim,
            total_dis,
            p,
        } = *self;
        match index {
            Coefficient::Ac => (2.0 / PI) * (total_sim / p).sqrt().asin(),
            Coefficient::Bub => {
                let root = (a * d).sqrt();
                (root + a) / (root + a + total_dis)
            }
            Coefficient::Fai => (a + 0.5 * d) / p,
            Coefficient::Gle => 2.0 * a / (2.0 * a + total_dis),
            Coefficient::Ja => 3.0 * a / (3.0 * a + total_dis),
            Coefficient::Jt => a / (a + total_dis),
            Coefficient::Rt => total_sim / (p + total_dis),
            Coefficient::Rr => a / p,
            Coefficient::Sm => total_sim / p,
            Coefficient::Ss1 => a / (a + 2.0 * total_dis),
            Coefficient::Ss2 => 2.0 * total_sim / (p + total_sim),
        }
    }

    /// All 11 coefficients, in [`Coefficient::ALL`] order.
    pub fn sim_dict(&self) -> [(Coefficient, f64); 11] {
        Coefficient::ALL.map(|c| (c, self.coefficient(c)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Rows [1,0,1], [1,1,0], [0,0,1], [1,1,1]: col_sum = [3,2,3].
    const FIXTURE: [f32; 12] = [
        1.0, 0.0, 1.0, //
        1.0, 1.0, 0.0, //
        0.0, 0.0, 1.0, //
        1.0, 1.0, 1.0,
    ];

    fn fixture_counters() -> Counters {
        let fps = FpMatrix::new(&FIXTURE, 3).unwrap();
        Counters::from_matrix(&fps, 1).unwrap()
    }

    #[test]
    fn test_counters_fixture() {
        let c = fixture_counters();
        assert!((c.a - 7.0).abs() < 1e-12);
        assert!((c.d - 1.0).abs() < 1e-12);
        assert!((c.total_sim - 8.0).abs() < 1e-12);
        assert!((c.total_dis - 10.0).abs() < 1e-12);
        assert!((c.p - 18.0).abs() < 1e-12);
    }

    #[test]
    fn test_counters_reject_zero_objects() {
        assert!(Counters::from_col_sum(&[1.0, 2.0], 0, 1).is_err());
    }

    #[test]
    fn test_linear_coefficients_fixture() {
        let c = fixture_counters();
        assert!((c.coefficient(Coefficient::Rr) - 7.0 / 18.0).abs() < 1e-12);
        assert!((c.coefficient(Coefficient::Sm) - 8.0 / 18.0).abs() < 1e-12);
        assert!((c.coefficient(Coefficient::Jt) - 7.0 / 17.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_dictionary_fixture() {
        let c = fixture_counters();
        let expected = [
            (Coefficient::Ac, 0.464_559_0),
            (Coefficient::Bub, 0.490_984_1),
            (Coefficient::Fai, 7.5 / 18.0),
            (Coefficient::Gle, 14.0 / 24.0),
            (Coefficient::Ja, 21.0 / 31.0),
            (Coefficient::Jt, 7.0 / 17.0),
            (Coefficient::Rt, 8.0 / 28.0),
            (Coefficient::Rr, 7.0 / 18.0),
            (Coefficient::Sm, 8.0 / 18.0),
            (Coefficient::Ss1, 7.0 / 27.0),
            (Coefficient::Ss2, 16.0 / 26.0),
        ];
        for (index, want) in expected {
            let got = c.coefficient(index);
            assert!(
                (got - want).abs() < 1e-6,
                "{index}: got {got}, want {want}"
            );
        }
    }

    #[test]
    fn test_sim_dict_order_matches_all() {
        let c = fixture_counters();
        let dict = c.sim_dict();
        for (slot, index) in dict.iter().zip(Coefficient::ALL) {
            assert_eq!(slot.0, index);
        }
    }

    #[test]
    fn test_power_damping() {
        // col_sum [4,1] over 4 objects: a_terms = [6, 0].
        let k1 = Counters::from_col_sum(&[4.0, 1.0], 4, 1).unwrap();
        let k2 = Counters::from_col_sum(&[4.0, 1.0], 4, 2).unwrap();
        assert!((k1.a - 6.0).abs() < 1e-12);
        assert!((k2.a - 6.0f64.sqrt()).abs() < 1e-12);
        assert!(k2.a < k1.a);
    }

    #[test]
    fn test_name_round_trip() {
        for index in Coefficient::ALL {
            assert_eq!(index.as_str().parse::<Coefficient>().unwrap(), index);
        }
    }

    #[test]
    fn test_unknown_name_rejected() {
        let err = "Tanimoto".parse::<Coefficient>().unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument(_)));
    }
}
