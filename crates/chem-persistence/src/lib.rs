//! chem-persistence
//!
//! Implementación Postgres (Diesel + r2d2) del `CompoundStore` del core
//! sobre la tabla de inventario `inv_compounds`.
//!
//! Módulos:
//! - `pg`: store, pool y proveedor de conexiones.
//! - `config`: carga de configuración desde .env y parámetros de conexión.
//! - `schema`: tabla Diesel declarada para compilar queries.

pub mod config;
pub mod error;
pub mod pg;
pub mod schema;

pub use config::{init_dotenv, ConfigError, ConnectionParams, DbConfig};
pub use error::PersistenceError;
pub use pg::{build_pool, connect, connect_from_env, ConnectionProvider, PgCompoundStore, PgPool, PoolProvider};
