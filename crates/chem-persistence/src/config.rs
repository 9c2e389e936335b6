//! Carga de configuración de conexión desde variables de entorno.
//! Usa convención `DATABASE_URL` y parámetros opcionales de pool; sin URL,
//! la conexión se arma a partir de `ConnectionParams` (host, puerto,
//! usuario, contraseña, base).

use std::env;
use std::fmt;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use thiserror::Error;
use url::Url;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("variable de entorno {0} no definida")]
    MissingVar(&'static str),
    #[error("puerto inválido: {0:?}")]
    InvalidPort(String),
    #[error("host inválido: {0:?}")]
    InvalidHost(String),
}

#[derive(Debug, Clone)]
pub struct DbConfig {
    pub url: String,
    pub min_connections: u32,
    pub max_connections: u32,
}

impl DbConfig {
    /// Lee `DATABASE_URL` (y tamaños de pool opcionales). El pipeline usa una
    /// única conexión, por lo que el pool por defecto es 1x1.
    pub fn from_env() -> Result<Self, ConfigError> {
        init_dotenv();
        let url = env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        Ok(Self::from_url(&url).with_pool_sizes_from_env())
    }

    pub fn from_url(url: &str) -> Self {
        DbConfig { url: url.to_string(),
                   min_connections: 1,
                   max_connections: 1 }
    }

    fn with_pool_sizes_from_env(mut self) -> Self {
        if let Some(min) = env::var("DATABASE_MIN_CONNECTIONS").ok().and_then(|v| v.parse().ok()) {
            self.min_connections = min;
        }
        if let Some(max) = env::var("DATABASE_MAX_CONNECTIONS").ok().and_then(|v| v.parse().ok()) {
            self.max_connections = max;
        }
        self
    }
}

/// Parámetros de conexión individuales (los que el operador confirma al
/// iniciar).
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionParams {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for ConnectionParams {
    fn default() -> Self {
        ConnectionParams { host: "localhost".into(),
                           port: 5432,
                           user: "invadmin".into(),
                           password: "invadmin".into(),
                           database: "CHEMINVDB2".into() }
    }
}

// La contraseña nunca aparece en logs.
impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
         .field("host", &self.host)
         .field("port", &self.port)
         .field("user", &self.user)
         .field("password", &"***")
         .field("database", &self.database)
         .finish()
    }
}

impl ConnectionParams {
    pub fn parse_port(raw: &str) -> Result<u16, ConfigError> {
        match raw.trim().parse::<u16>() {
            Ok(p) if p > 0 => Ok(p),
            _ => Err(ConfigError::InvalidPort(raw.trim().to_string())),
        }
    }

    /// URL `postgres://` con usuario, contraseña y base codificados.
    pub fn to_url(&self) -> Result<String, ConfigError> {
        Ok(self.build_url(&self.password)?.into())
    }

    /// URL apta para logs (contraseña oculta).
    pub fn redacted_url(&self) -> Result<String, ConfigError> {
        Ok(self.build_url("***")?.into())
    }

    fn build_url(&self, password: &str) -> Result<Url, ConfigError> {
        let invalid_host = || ConfigError::InvalidHost(self.host.clone());
        let mut url = Url::parse(&format!("postgres://{}:{}/", self.host, self.port)).map_err(|_| invalid_host())?;
        url.set_username(&self.user).map_err(|_| invalid_host())?;
        url.set_password(Some(password)).map_err(|_| invalid_host())?;
        url.path_segments_mut().map_err(|_| invalid_host())?.clear().push(&self.database);
        Ok(url)
    }
}
