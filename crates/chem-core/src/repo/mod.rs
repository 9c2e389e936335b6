pub mod types;
pub use types::{CompoundStore, InMemoryCompoundStore};
