//! Álgebra vetorial complexa mínima
//!
//! Vetores de estado densos e matrizes quadradas complexas em ordem row-major.
//! O motor só lê os vetores capturados; a evolução do estado fica no backend.

use std::ops::Index;

use num_complex::Complex64;
use serde::ser::{Serialize, Serializer};
use serde::Deserialize;

/// Vetor de estado denso (amplitudes complexas)
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateVector {
    amplitudes: Vec<Complex64>,
}

impl StateVector {
    /// Cria vetor a partir das amplitudes
    pub fn new(amplitudes: Vec<Complex64>) -> Self {
        Self { amplitudes }
    }

    /// Cria vetor com amplitudes reais
    pub fn from_real(values: &[f64]) -> Self {
        Self::new(values.iter().map(|&v| Complex64::new(v, 0.0)).collect())
    }

    /// Estado da base computacional |index⟩ com `len` amplitudes
    pub fn basis(len: usize, index: usize) -> Self {
        let mut amplitudes = vec![Complex64::new(0.0, 0.0); len];
        if let Some(a) = amplitudes.get_mut(index) {
            *a = Complex64::new(1.0, 0.0);
        }
        Self::new(amplitudes)
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Amplitudes em ordem de índice
    pub fn amplitudes(&self) -> &[Complex64] {
        &self.amplitudes
    }

    pub fn get(&self, index: usize) -> Option<Complex64> {
        self.amplitudes.get(index).copied()
    }

    /// Soma de |a_i|²
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    pub fn norm(&self) -> f64 {
        self.norm_sqr().sqrt()
    }

    /// Multiplica todas as amplitudes por `factor` (in-place)
    pub fn scale(&mut self, factor: Complex64) {
        for a in &mut self.amplitudes {
            *a *= factor;
        }
    }

    /// Normaliza para norma unitária. Vetor nulo permanece inalterado.
    pub fn renormalize(&mut self) {
        let norm = self.norm();
        if norm > 0.0 {
            self.scale(Complex64::new(1.0 / norm, 0.0));
        }
    }

    /// Produto interno ⟨self|other⟩ = Σ conj(self_i) · other_i
    ///
    /// Vetores de tamanhos diferentes são truncados ao menor; quem chama
    /// deve validar as dimensões antes.
    pub fn inner_product(&self, other: &StateVector) -> Complex64 {
        self.amplitudes
            .iter()
            .zip(&other.amplitudes)
            .map(|(a, b)| a.conj() * b)
            .sum()
    }

    /// Produto externo |self⟩⟨self|
    pub fn outer_product(&self) -> CMatrix {
        CMatrix::outer(&self.amplitudes, &self.amplitudes)
    }
}

impl From<Vec<Complex64>> for StateVector {
    fn from(amplitudes: Vec<Complex64>) -> Self {
        Self::new(amplitudes)
    }
}

impl Index<usize> for StateVector {
    type Output = Complex64;

    fn index(&self, index: usize) -> &Complex64 {
        &self.amplitudes[index]
    }
}

/// Matriz complexa quadrada (row-major)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CMatrix {
    dim: usize,
    elements: Vec<Complex64>,
}

impl CMatrix {
    /// Matriz nula dim × dim
    pub fn zeros(dim: usize) -> Self {
        Self {
            dim,
            elements: vec![Complex64::new(0.0, 0.0); dim * dim],
        }
    }

    /// Produto externo |a⟩⟨b|: m[i][j] = a_i · conj(b_j)
    ///
    /// Usa o menor dos dois comprimentos como dimensão.
    pub fn outer(a: &[Complex64], b: &[Complex64]) -> Self {
        let dim = a.len().min(b.len());
        let mut elements = Vec::with_capacity(dim * dim);
        for ai in &a[..dim] {
            for bj in &b[..dim] {
                elements.push(ai * bj.conj());
            }
        }
        Self { dim, elements }
    }

    /// Constrói a partir de linhas. Retorna `None` se não for quadrada.
    pub fn from_rows(rows: Vec<Vec<Complex64>>) -> Option<Self> {
        let dim = rows.len();
        if rows.iter().any(|r| r.len() != dim) {
            return None;
        }
        Some(Self {
            dim,
            elements: rows.into_iter().flatten().collect(),
        })
    }

    /// Número de linhas (= colunas)
    pub fn dim(&self) -> usize {
        self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.dim == 0
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Complex64> {
        if row < self.dim && col < self.dim {
            Some(self.elements[row * self.dim + col])
        } else {
            None
        }
    }

    pub fn elements(&self) -> &[Complex64] {
        &self.elements
    }

    pub fn elements_mut(&mut self) -> &mut [Complex64] {
        &mut self.elements
    }

    /// Linhas da matriz
    pub fn rows(&self) -> impl Iterator<Item = &[Complex64]> {
        // chunks(0) entra em pânico
        self.elements.chunks(self.dim.max(1))
    }

    /// Traço
    pub fn trace(&self) -> Complex64 {
        (0..self.dim).map(|i| self.elements[i * self.dim + i]).sum()
    }

    /// Multiplica todos os elementos por um real (in-place)
    pub fn scale(&mut self, factor: f64) {
        for e in &mut self.elements {
            *e *= factor;
        }
    }

    /// Aumenta a dimensão preenchendo com zeros. Nunca reduz.
    pub fn grow_to(&mut self, dim: usize) {
        if dim <= self.dim {
            return;
        }
        let mut grown = Self::zeros(dim);
        for (r, row) in self.rows().enumerate().take(self.dim) {
            grown.elements[r * dim..r * dim + self.dim].copy_from_slice(row);
        }
        *self = grown;
    }
}

impl Serialize for CMatrix {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.dim == 0 {
            return serializer.collect_seq(std::iter::empty::<Vec<Complex64>>());
        }
        serializer.collect_seq(self.rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: f64, im: f64) -> Complex64 {
        Complex64::new(re, im)
    }

    #[test]
    fn test_inner_product_conjugates_left() {
        let a = StateVector::new(vec![c(0.0, 1.0), c(0.0, 0.0)]);
        let b = StateVector::new(vec![c(1.0, 0.0), c(0.0, 0.0)]);
        assert_eq!(a.inner_product(&b), c(0.0, -1.0));
        assert_eq!(b.inner_product(&a), c(0.0, 1.0));
    }

    #[test]
    fn test_outer_product_is_hermitian() {
        let v = StateVector::new(vec![c(0.6, 0.0), c(0.0, 0.8)]);
        let rho = v.outer_product();
        assert_eq!(rho.dim(), 2);
        assert_eq!(rho.get(0, 1).unwrap(), rho.get(1, 0).unwrap().conj());
        assert!((rho.trace().re - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_renormalize_zero_vector_unchanged() {
        let mut v = StateVector::from_real(&[0.0, 0.0]);
        v.renormalize();
        assert_eq!(v, StateVector::from_real(&[0.0, 0.0]));

        let mut w = StateVector::from_real(&[3.0, 4.0]);
        w.renormalize();
        assert!((w.norm() - 1.0).abs() < 1e-12);
        assert!((w[0].re - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_grow_to_keeps_entries() {
        let mut m = CMatrix::from_rows(vec![vec![c(1.0, 0.0), c(2.0, 0.0)], vec![c(3.0, 0.0), c(4.0, 0.0)]]).unwrap();
        m.grow_to(3);
        assert_eq!(m.dim(), 3);
        assert_eq!(m.get(1, 0), Some(c(3.0, 0.0)));
        assert_eq!(m.get(2, 2), Some(c(0.0, 0.0)));
    }

    #[test]
    fn test_matrix_serializes_as_rows() {
        let m = CMatrix::from_rows(vec![vec![c(1.0, 0.5)]]).unwrap();
        let json = serde_json::to_string(&m).unwrap();
        assert_eq!(json, "[[[1.0,0.5]]]");
        assert_eq!(serde_json::to_string(&CMatrix::default()).unwrap(), "[]");
    }
}
