//! Configuración de los endpoints de búsqueda.

use std::time::Duration;

/// Página HTML de búsqueda por término (número de registro).
pub const DEFAULT_SEARCH_URL: &str = "https://www.ncbi.nlm.nih.gov/pccompound?term={registry}";
/// Documento PUG-View JSON de un compuesto.
pub const DEFAULT_COMPOUND_URL: &str = "https://pubchem.ncbi.nlm.nih.gov/rest/pug_view/data/compound/{cid}/JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    /// Plantilla con placeholder `{registry}`.
    pub search_url_template: String,
    /// Plantilla con placeholder `{cid}`.
    pub compound_url_template: String,
    /// Timeout de conexión/lectura/escritura por request.
    pub timeout: Duration,
    pub user_agent: String,
    /// Límite de lectura del cuerpo de respuesta.
    pub max_body_bytes: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig { search_url_template: DEFAULT_SEARCH_URL.to_string(),
                         compound_url_template: DEFAULT_COMPOUND_URL.to_string(),
                         timeout: Duration::from_secs(30),
                         user_agent: concat!("chem-enrich/", env!("CARGO_PKG_VERSION")).to_string(),
                         max_body_bytes: 64 * 1024 * 1024 }
    }
}
