//! Truncamento de valores pequenos ("chop")
//!
//! Valores (ou componentes real/imaginária) com magnitude abaixo de ε viram
//! zero exato. É uma etapa de apresentação: as somas acumuladas nunca são
//! truncadas, só as cópias normalizadas na exportação e os produtos internos.

use std::collections::BTreeMap;

use num_complex::Complex64;

use crate::vector::CMatrix;

/// Valor default de ε
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Tipos que podem ser truncados in-place
pub trait Chop {
    fn chop(&mut self, epsilon: f64);

    /// Versão por valor
    fn chopped(mut self, epsilon: f64) -> Self
    where
        Self: Sized,
    {
        self.chop(epsilon);
        self
    }
}

impl Chop for f64 {
    #[inline]
    fn chop(&mut self, epsilon: f64) {
        if self.abs() < epsilon {
            *self = 0.0;
        }
    }
}

impl Chop for Complex64 {
    #[inline]
    fn chop(&mut self, epsilon: f64) {
        self.re.chop(epsilon);
        self.im.chop(epsilon);
    }
}

impl<T: Chop> Chop for Vec<T> {
    fn chop(&mut self, epsilon: f64) {
        for v in self.iter_mut() {
            v.chop(epsilon);
        }
    }
}

impl Chop for CMatrix {
    fn chop(&mut self, epsilon: f64) {
        for e in self.elements_mut() {
            e.chop(epsilon);
        }
    }
}

/// Ket de probabilidades: entradas truncadas a zero são removidas
impl Chop for BTreeMap<String, f64> {
    fn chop(&mut self, epsilon: f64) {
        self.retain(|_, p| {
            p.chop(epsilon);
            *p != 0.0
        });
    }
}
