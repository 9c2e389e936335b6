//! Módulo de hashing (fingerprints de codificaciones en el log de eventos).

pub mod hash;

pub use hash::{hash_bytes, hash_str};
