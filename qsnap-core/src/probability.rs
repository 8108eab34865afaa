//! Redução de amplitudes complexas a probabilidades (|a|²)

use std::collections::BTreeMap;

use num_complex::Complex64;

use crate::ket::{Ket, ProbabilityKet};
use crate::vector::StateVector;

/// Converte amplitudes em probabilidades na base Z
pub trait Probabilities {
    type Output;

    fn probabilities(&self) -> Self::Output;
}

impl Probabilities for Complex64 {
    type Output = f64;

    #[inline]
    fn probabilities(&self) -> f64 {
        self.norm_sqr()
    }
}

impl Probabilities for [Complex64] {
    type Output = Vec<f64>;

    fn probabilities(&self) -> Vec<f64> {
        self.iter().map(Complex64::probabilities).collect()
    }
}

impl Probabilities for Vec<Complex64> {
    type Output = Vec<f64>;

    fn probabilities(&self) -> Vec<f64> {
        self.as_slice().probabilities()
    }
}

impl Probabilities for StateVector {
    type Output = Vec<f64>;

    fn probabilities(&self) -> Vec<f64> {
        self.amplitudes().probabilities()
    }
}

impl Probabilities for Ket {
    type Output = ProbabilityKet;

    fn probabilities(&self) -> ProbabilityKet {
        self.iter()
            .map(|(label, amp)| (label.clone(), amp.probabilities()))
            .collect::<BTreeMap<_, _>>()
    }
}
