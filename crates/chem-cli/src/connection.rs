//! Parámetros de conexión al inventario.
//!
//! Orden: `DATABASE_URL` (entorno o .env) -> prompts interactivos con
//! valores por defecto -> valores por defecto (`--no-prompt`).

use std::io::{self, BufRead, Write};

use chem_persistence::{init_dotenv, ConfigError, ConnectionParams, DbConfig};
use log::info;

use crate::CliError;

/// Escribe `label:<shown>>` y lee una línea; vacía o EOF => `default`.
pub fn prompt_with_default<R: BufRead, W: Write>(input: &mut R,
                                                 output: &mut W,
                                                 label: &str,
                                                 shown: &str,
                                                 default: &str)
                                                 -> io::Result<String> {
    write!(output, "{label}:{shown}>")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(output)?;
    }
    let line = line.trim();
    Ok(if line.is_empty() { default.to_string() } else { line.to_string() })
}

/// Pide cada parámetro mostrando el valor por defecto (la contraseña oculta).
pub fn prompt_params<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<ConnectionParams, CliError> {
    let d = ConnectionParams::default();
    let io_err = |e: io::Error| CliError::Config(format!("lectura de parámetros de conexión: {e}"));
    let host = prompt_with_default(input, output, "INVENTORY SQL ADDRESS", &d.host, &d.host).map_err(io_err)?;
    let port_raw = prompt_with_default(input, output, "INVENTORY SQL Port", &d.port.to_string(), &d.port.to_string()).map_err(io_err)?;
    let port = ConnectionParams::parse_port(&port_raw)?;
    let user = prompt_with_default(input, output, "INVENTORY Username", &d.user, &d.user).map_err(io_err)?;
    let password = prompt_with_default(input, output, "INVENTORY password", "***", &d.password).map_err(io_err)?;
    let database = prompt_with_default(input, output, "INVENTORY database name", &d.database, &d.database).map_err(io_err)?;
    Ok(ConnectionParams { host,
                          port,
                          user,
                          password,
                          database })
}

pub fn resolve_db_config(no_prompt: bool) -> Result<DbConfig, CliError> {
    init_dotenv();
    match DbConfig::from_env() {
        Ok(cfg) => {
            info!("connection:using DATABASE_URL");
            return Ok(cfg);
        }
        Err(ConfigError::MissingVar(_)) => {}
        Err(e) => return Err(e.into()),
    }
    let params = if no_prompt {
        ConnectionParams::default()
    } else {
        let stdin = io::stdin();
        prompt_params(&mut stdin.lock(), &mut io::stdout())?
    };
    info!("connection:{}", params.redacted_url()?);
    Ok(DbConfig::from_url(&params.to_url()?))
}
