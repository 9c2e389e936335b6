//! Números de registro (CAS).
//!
//! El inventario guarda el CAS como texto libre; aquí sólo se normaliza y se
//! ofrece la verificación del dígito de control para diagnósticos. Un número
//! que no pasa la verificación NO se descarta: el store puede contener
//! identificadores que no son CAS.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistryNumber(String);

impl RegistryNumber {
    /// Normaliza (recorta espacios). Un valor vacío o el literal `NULL`
    /// producido por exportaciones antiguas se tratan como ausentes.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("null") {
            return None;
        }
        Some(RegistryNumber(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Verifica forma `NNNNNNN-NN-N` y el dígito de control CAS:
    /// suma ponderada de los dígitos (de derecha a izquierda, sin el de
    /// control) módulo 10.
    pub fn is_valid_cas(&self) -> bool {
        let parts: Vec<&str> = self.0.split('-').collect();
        if parts.len() != 3 {
            return false;
        }
        let (head, mid, check) = (parts[0], parts[1], parts[2]);
        if head.is_empty() || head.len() > 7 || mid.len() != 2 || check.len() != 1 {
            return false;
        }
        if !parts.iter().all(|p| p.chars().all(|c| c.is_ascii_digit())) {
            return false;
        }
        let digits: Vec<u32> = head.chars().chain(mid.chars()).filter_map(|c| c.to_digit(10)).collect();
        let sum: u32 = digits.iter().rev().enumerate().map(|(i, d)| (i as u32 + 1) * d).sum();
        check.chars().next().and_then(|c| c.to_digit(10)) == Some(sum % 10)
    }
}

impl fmt::Display for RegistryNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
