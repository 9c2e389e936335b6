mod args;
mod connection;

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chem_core::{EmptyNotationPolicy, EnrichmentPipeline, PipelineError, PipelineOptions, RunSummary, WriteFailurePolicy};
use chem_persistence::{ConfigError, PersistenceError};
use chem_policies::OverrideGate;
use chem_providers::{ProviderConfig, PubChemIdentifierResolver, PubChemNotationResolver, UreqTransport};
use chemengine::{ConverterConfig, ProcessConverter};
use clap::Parser;
use log::{error, info, warn};
use thiserror::Error;

use crate::args::Cli;

/// Errores del binario, con su código de salida.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuración inválida: {0}")]
    Config(String),
    #[error("no se pudo conectar al inventario: {0}")]
    Connection(#[from] PersistenceError),
    #[error("corrida abortada: {0}")]
    Pipeline(#[from] PipelineError),
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Config(_) => 2,
            CliError::Pipeline(_) => 4,
            CliError::Connection(_) => 5,
        }
    }
}

fn init_tracing(verbose: u8) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    // stderr: stdout queda para los prompts del operador.
    fmt().with_env_filter(env_filter)
         .with_writer(std::io::stderr)
         .init();
}

fn provider_config(cli: &Cli) -> Result<ProviderConfig, CliError> {
    if !cli.search_url.contains("{registry}") {
        return Err(CliError::Config(format!("--search-url sin placeholder {{registry}}: {}", cli.search_url)));
    }
    if !cli.compound_url.contains("{cid}") {
        return Err(CliError::Config(format!("--compound-url sin placeholder {{cid}}: {}", cli.compound_url)));
    }
    if cli.http_timeout_secs == 0 {
        return Err(CliError::Config("--http-timeout-secs debe ser mayor que 0".into()));
    }
    Ok(ProviderConfig { search_url_template: cli.search_url.clone(),
                        compound_url_template: cli.compound_url.clone(),
                        timeout: Duration::from_secs(cli.http_timeout_secs),
                        ..Default::default() })
}

/// Un ejecutable relativo existente se fija contra el directorio actual,
/// porque el conversor corre con otro directorio de trabajo.
fn resolve_executable(path: &Path) -> PathBuf {
    if path.is_relative() && path.exists() {
        std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
    } else {
        path.to_path_buf()
    }
}

fn converter_config(cli: &Cli) -> Result<ConverterConfig, CliError> {
    if !cli.workdir.is_dir() {
        return Err(CliError::Config(format!("--workdir no es un directorio: {}", cli.workdir.display())));
    }
    if cli.converter_timeout_secs == 0 {
        return Err(CliError::Config("--converter-timeout-secs debe ser mayor que 0".into()));
    }
    Ok(ConverterConfig { executable: resolve_executable(&cli.converter),
                         timeout: Duration::from_secs(cli.converter_timeout_secs),
                         ..Default::default() }.with_workdir(&cli.workdir))
}

fn pipeline_options(cli: &Cli) -> PipelineOptions {
    PipelineOptions { empty_notation: if cli.convert_empty { EmptyNotationPolicy::Convert } else { EmptyNotationPolicy::Skip },
                      write_failure: if cli.abort_on_write_error { WriteFailurePolicy::Abort } else { WriteFailurePolicy::Continue },
                      limit: cli.limit }
}

fn dump_events(path: &Path, events: &[chem_core::PipelineEvent]) -> Result<(), String> {
    let file = File::create(path).map_err(|e| e.to_string())?;
    serde_json::to_writer_pretty(BufWriter::new(file), events).map_err(|e| e.to_string())
}

fn run(cli: &Cli) -> Result<RunSummary, CliError> {
    let providers = provider_config(cli)?;
    let converter = converter_config(cli)?;
    let options = pipeline_options(cli);
    let db = connection::resolve_db_config(cli.no_prompt)?;
    let store = chem_persistence::connect(&db)?;

    let transport = UreqTransport::new(&providers);
    let mut pipeline = EnrichmentPipeline::builder(store)
        .identifier_resolver(PubChemIdentifierResolver::new(transport.clone(), &providers))
        .notation_resolver(PubChemNotationResolver::new(transport, &providers))
        .gate(OverrideGate::stdio(cli.override_policy))
        .converter(ProcessConverter::new(converter))
        .options(options)
        .build()?;

    info!("run:config override={} convert_empty={} abort_on_write_error={} limit={:?}",
          cli.override_policy,
          cli.convert_empty,
          cli.abort_on_write_error,
          cli.limit);
    let result = pipeline.run();

    if let Some(path) = &cli.events_json {
        match dump_events(path, &pipeline.events()) {
            Ok(()) => info!("events:written path={}", path.display()),
            Err(e) => warn!("events:write failed path={} err={e}", path.display()),
        }
    }
    Ok(result?)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match run(&cli) {
        Ok(summary) => {
            println!("selected={} persisted={} skipped={} write_failures={}",
                     summary.selected,
                     summary.persisted,
                     summary.skipped,
                     summary.write_failures.len());
            for f in &summary.write_failures {
                eprintln!("write failed: compound={} {}", f.compound_id, f.error);
            }
        }
        Err(e) => {
            error!("{e}");
            eprintln!("[chem-enrich] {e}");
            std::process::exit(e.exit_code());
        }
    }
}
