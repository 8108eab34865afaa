//! Codificação de vetores densos em kets esparsos
//!
//! Cada amplitude com |a|² > ε vira uma entrada `rótulo → amplitude`, onde o
//! rótulo é o índice da base escrito com um dígito por qudit (radix =
//! dimensão do qudit), dígito mais significativo primeiro. Entradas abaixo
//! do limiar são omitidas, não zeradas.
//!
//! ```text
//! [0.707, 0, 0, 0.707]  (radix 2)  →  { "00": 0.707, "11": 0.707 }
//! mesmo vetor, grupos [1, 1]       →  { "0 0": 0.707, "1 1": 0.707 }
//! ```

use std::collections::BTreeMap;

use num_complex::Complex64;

/// Ket esparso: rótulo da base → amplitude
pub type Ket = BTreeMap<String, Complex64>;

/// Ket de probabilidades: rótulo da base → probabilidade
pub type ProbabilityKet = BTreeMap<String, f64>;

/// Maior radix com um caractere por dígito (0-9, a-z)
const MAX_CHAR_RADIX: u64 = 36;

/// Número de qudits necessário para indexar `len` amplitudes
///
/// Menor `n` com radix^n ≥ len (mínimo 1).
pub fn qudit_count(len: usize, radix: u64) -> usize {
    let radix = radix.max(2) as u128;
    let len = len as u128;
    let mut n = 1;
    let mut span = radix;
    while span < len {
        span *= radix;
        n += 1;
    }
    n
}

/// Dígitos de `index` na base `radix`, mais significativo primeiro
fn digits(mut index: u64, radix: u64, width: usize) -> Vec<u64> {
    let mut out = vec![0; width];
    for slot in out.iter_mut().rev() {
        *slot = index % radix;
        index /= radix;
    }
    out
}

fn render_digits(digits: &[u64], radix: u64) -> String {
    if radix <= MAX_CHAR_RADIX {
        digits
            .iter()
            .filter_map(|&d| char::from_digit(d as u32, radix as u32))
            .collect()
    } else {
        digits
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Rótulo da base para `index`
///
/// `groups` são os tamanhos dos registradores na ordem do rótulo; os grupos
/// são separados por um espaço. Dígitos que sobram após os grupos declarados
/// formam um último grupo.
pub fn basis_label(index: u64, radix: u64, width: usize, groups: &[usize]) -> String {
    let radix = radix.max(2);
    let all = digits(index, radix, width);
    if groups.is_empty() {
        return render_digits(&all, radix);
    }

    let mut parts = Vec::with_capacity(groups.len() + 1);
    let mut rest = all.as_slice();
    for &size in groups {
        if rest.is_empty() {
            break;
        }
        if size == 0 {
            continue;
        }
        let (head, tail) = rest.split_at(size.min(rest.len()));
        parts.push(render_digits(head, radix));
        rest = tail;
    }
    if !rest.is_empty() {
        parts.push(render_digits(rest, radix));
    }
    parts.join(" ")
}

/// Converte um vetor denso em ket esparso
///
/// Mantém apenas amplitudes com |a|² > `epsilon`.
pub fn vec_to_ket(amplitudes: &[Complex64], radix: u64, epsilon: f64, groups: &[usize]) -> Ket {
    let width = qudit_count(amplitudes.len(), radix);
    amplitudes
        .iter()
        .enumerate()
        .filter(|(_, a)| a.norm_sqr() > epsilon)
        .map(|(k, a)| (basis_label(k as u64, radix, width, groups), *a))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qudit_count() {
        assert_eq!(qudit_count(1, 2), 1);
        assert_eq!(qudit_count(2, 2), 1);
        assert_eq!(qudit_count(8, 2), 3);
        assert_eq!(qudit_count(9, 3), 2);
        assert_eq!(qudit_count(10, 3), 3);
    }

    #[test]
    fn test_labels_most_significant_first() {
        assert_eq!(basis_label(1, 2, 3, &[]), "001");
        assert_eq!(basis_label(6, 2, 3, &[]), "110");
        assert_eq!(basis_label(5, 3, 2, &[]), "12");
        assert_eq!(basis_label(35, 36, 1, &[]), "z");
        assert_eq!(basis_label(41, 40, 2, &[]), "1,1");
    }

    #[test]
    fn test_labels_grouped_by_register() {
        assert_eq!(basis_label(6, 2, 3, &[1, 2]), "1 10");
        assert_eq!(basis_label(6, 2, 3, &[2]), "11 0");
        assert_eq!(basis_label(6, 2, 3, &[2, 4]), "11 0");
    }

    #[test]
    fn test_sub_threshold_entries_omitted() {
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let amps = vec![
            Complex64::new(h, 0.0),
            Complex64::new(1e-4, 0.0),
            Complex64::new(0.0, 0.0),
            Complex64::new(0.0, h),
        ];
        let ket = vec_to_ket(&amps, 2, 1e-10, &[]);
        assert_eq!(ket.len(), 3);
        assert!(!ket.contains_key("10"));
        assert_eq!(ket["11"], Complex64::new(0.0, h));

        let coarse = vec_to_ket(&amps, 2, 1e-6, &[]);
        assert_eq!(coarse.keys().collect::<Vec<_>>(), vec!["00", "11"]);
    }
}
