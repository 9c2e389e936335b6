use std::path::PathBuf;

use chem_policies::OverridePolicy;
use chem_providers::config::{DEFAULT_COMPOUND_URL, DEFAULT_SEARCH_URL};
use clap::{ArgAction, Parser};

/// Enriquece el inventario de compuestos con su estructura (CDX base64)
/// resolviendo CAS -> PubChem CID -> SMILES canónico -> conversor externo.
#[derive(Parser, Debug)]
#[command(name = "chem-enrich", version, long_about = None)]
pub struct Cli {
    /// Plantilla de búsqueda por número de registro (`{registry}`).
    #[arg(long, env = "CHEM_SEARCH_URL", default_value = DEFAULT_SEARCH_URL)]
    pub search_url: String,

    /// Plantilla del documento de compuesto (`{cid}`).
    #[arg(long, env = "CHEM_COMPOUND_URL", default_value = DEFAULT_COMPOUND_URL)]
    pub compound_url: String,

    #[arg(long, env = "CHEM_HTTP_TIMEOUT_SECS", default_value_t = 30)]
    pub http_timeout_secs: u64,

    /// Ejecutable del conversor SMILES -> CDX.
    #[arg(long, env = "CHEM_CONVERTER", default_value = "convert.exe")]
    pub converter: PathBuf,

    /// Directorio de los archivos de intercambio del conversor.
    #[arg(long, env = "CHEM_WORKDIR", default_value = ".")]
    pub workdir: PathBuf,

    #[arg(long, env = "CHEM_CONVERTER_TIMEOUT_SECS", default_value_t = 120)]
    pub converter_timeout_secs: u64,

    /// Cuándo consultar al operador por la notación: auto, interactive, forced.
    #[arg(long = "override", env = "CHEM_OVERRIDE", default_value = "interactive")]
    pub override_policy: OverridePolicy,

    /// Invoca el conversor aun con notación vacía (por defecto se omite el registro).
    #[arg(long)]
    pub convert_empty: bool,

    /// Aborta la corrida ante el primer fallo de escritura.
    #[arg(long)]
    pub abort_on_write_error: bool,

    /// Procesa como máximo N registros.
    #[arg(long)]
    pub limit: Option<usize>,

    /// No pide parámetros de conexión; usa los valores por defecto.
    #[arg(long)]
    pub no_prompt: bool,

    /// Vuelca el log de eventos de la corrida como JSON.
    #[arg(long)]
    pub events_json: Option<PathBuf>,

    /// Verbosidad (-v, -vv).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_prompt_interactively() {
        let cli = Cli::try_parse_from(["chem-enrich"]).unwrap();
        assert_eq!(cli.override_policy, OverridePolicy::Interactive);
        assert_eq!(cli.converter, PathBuf::from("convert.exe"));
        assert!(!cli.convert_empty && !cli.abort_on_write_error && !cli.no_prompt);
        assert_eq!(cli.limit, None);
    }

    #[test]
    fn parses_flags() {
        let cli = Cli::try_parse_from(["chem-enrich",
                                       "--override",
                                       "auto",
                                       "--limit",
                                       "5",
                                       "--convert-empty",
                                       "-vv",
                                       "--events-json",
                                       "ev.json"]).unwrap();
        assert_eq!(cli.override_policy, OverridePolicy::Auto);
        assert_eq!(cli.limit, Some(5));
        assert!(cli.convert_empty);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.events_json, Some(PathBuf::from("ev.json")));
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(Cli::try_parse_from(["chem-enrich", "--override", "sometimes"]).is_err());
    }
}
