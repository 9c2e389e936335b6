//! Implementación Postgres (Diesel) del `CompoundStore` del core.
//!
//! - Lectura: `sql_query` con el patrón centinela como parámetro enlazado.
//!   Se leen todos los registros seleccionados de una vez, en el orden
//!   natural del store.
//! - Escritura: `UPDATE` de una fila por `compound_id` con el DSL de Diesel.
//!   Sin transacciones que abarquen más de una escritura.
//! - Ningún valor de registro se interpola en el texto SQL.

use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{self, ConnectionManager};
use diesel::sql_types::Text;

use chem_core::{CompoundStore, PipelineError};
use chem_domain::{CompoundId, CompoundRecord, StructureEncoding, ENRICHED_SENTINEL};
use log::{debug, error, info, warn};

use crate::config::DbConfig;
use crate::error::PersistenceError;
use crate::schema::inv_compounds;

/// Alias de tipo para el pool r2d2 de conexiones Postgres.
pub type PgPool = r2d2::Pool<ConnectionManager<PgConnection>>;

/// Proveedor abstracto de conexiones.
///
/// Permite inyectar un pool real o uno construido por el test sin acoplar
/// el store a r2d2.
pub trait ConnectionProvider: Send + Sync + 'static {
    fn connection(&self) -> Result<r2d2::PooledConnection<ConnectionManager<PgConnection>>, PersistenceError>;
}

/// Implementación concreta de `ConnectionProvider` respaldada por un `PgPool`.
pub struct PoolProvider {
    pub pool: PgPool,
}
impl ConnectionProvider for PoolProvider {
    fn connection(&self) -> Result<r2d2::PooledConnection<ConnectionManager<PgConnection>>, PersistenceError> {
        self.pool
            .get()
            .map_err(|e| PersistenceError::TransientIo(format!("pool error: {e}")))
    }
}

/// Consulta de selección: registros sin codificación o cuya codificación no
/// empieza con el centinela. `$1` = patrón `LIKE` del centinela.
pub const SELECT_UNENRICHED_SQL: &str = "SELECT compound_id, cas, substance_name, base64_cdx FROM inv_compounds \
                                         WHERE base64_cdx IS NULL OR base64_cdx NOT LIKE $1";

/// Fila mapeada de `inv_compounds` para lecturas vía `sql_query`.
#[derive(QueryableByName, Debug)]
#[diesel(table_name = inv_compounds)]
pub struct CompoundRow {
    pub compound_id: i32,
    pub cas: Option<String>,
    pub substance_name: Option<String>,
    pub base64_cdx: Option<String>,
}

impl From<CompoundRow> for CompoundRecord {
    fn from(row: CompoundRow) -> Self {
        CompoundRecord { compound_id: CompoundId(row.compound_id),
                         registry_number: row.cas.unwrap_or_default(),
                         substance_name: row.substance_name.unwrap_or_default(),
                         structure_encoding: row.base64_cdx }
    }
}

/// Store de compuestos sobre Postgres.
pub struct PgCompoundStore<P: ConnectionProvider> {
    provider: P,
}

impl<P: ConnectionProvider> PgCompoundStore<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    fn load_unenriched(&self) -> Result<Vec<CompoundRow>, PersistenceError> {
        let mut conn = self.provider.connection()?;
        let pattern = format!("{ENRICHED_SENTINEL}%");
        let rows = diesel::sql_query(SELECT_UNENRICHED_SQL).bind::<Text, _>(pattern)
                                                           .load::<CompoundRow>(&mut conn)?;
        Ok(rows)
    }

    fn update_encoding(&self, id: CompoundId, text: &str) -> Result<usize, PersistenceError> {
        let mut conn = self.provider.connection()?;
        let n = diesel::update(inv_compounds::table.filter(inv_compounds::compound_id.eq(id.0)))
            .set(inv_compounds::base64_cdx.eq(text))
            .execute(&mut conn)?;
        Ok(n)
    }
}

impl<P: ConnectionProvider> CompoundStore for PgCompoundStore<P> {
    fn select_unenriched(&self) -> Result<Vec<CompoundRecord>, PipelineError> {
        debug!("select_unenriched:start");
        let rows = self.load_unenriched().map_err(|e| {
                                             error!("select_unenriched:error err={e}");
                                             PipelineError::StoreQuery(e.to_string())
                                         })?;
        debug!("select_unenriched:done count={}", rows.len());
        Ok(rows.into_iter().map(CompoundRecord::from).collect())
    }

    fn write_encoding(&mut self, compound_id: CompoundId, encoding: &StructureEncoding) -> Result<(), PipelineError> {
        debug!("write_encoding:start compound={compound_id} bytes={}", encoding.len());
        let fail = |reason: String| PipelineError::StoreWrite { compound_id, reason };
        let text = encoding.as_text().map_err(|e| fail(e.to_string()))?;
        match self.update_encoding(compound_id, text) {
            Ok(0) => {
                warn!("write_encoding:no row matched compound={compound_id}");
                Err(fail("no row matched".into()))
            }
            Ok(n) => {
                debug!("write_encoding:done compound={compound_id} rows={n}");
                Ok(())
            }
            Err(e) => Err(fail(e.to_string())),
        }
    }
}

/// Construye un pool r2d2. El pipeline usa una sola conexión (1x1).
pub fn build_pool(database_url: &str, min_size: u32, max_size: u32) -> Result<PgPool, PersistenceError> {
    let validated_max = max_size.max(1);
    let final_min = min_size.max(1).min(validated_max);
    if min_size > validated_max {
        warn!("build_pool: min_size > max_size ({min_size} > {validated_max}), ajustando min=max");
    }
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    let pool = r2d2::Pool::builder().min_idle(Some(final_min))
                                    .max_size(validated_max)
                                    .connection_timeout(Duration::from_secs(10))
                                    .build(manager)
                                    .map_err(|e| PersistenceError::TransientIo(format!("pool build: {e}")))?;
    Ok(pool)
}

/// Abre el store con la configuración dada y verifica la conexión.
pub fn connect(cfg: &DbConfig) -> Result<PgCompoundStore<PoolProvider>, PersistenceError> {
    let pool = build_pool(&cfg.url, cfg.min_connections, cfg.max_connections)?;
    let provider = PoolProvider { pool };
    drop(provider.connection()?);
    info!("connect:ok pool_max={}", cfg.max_connections);
    Ok(PgCompoundStore::new(provider))
}

/// Helper: carga `.env`, lee `DATABASE_URL` y abre el store.
pub fn connect_from_env() -> Result<PgCompoundStore<PoolProvider>, PersistenceError> {
    let cfg = DbConfig::from_env()?;
    connect(&cfg)
}
