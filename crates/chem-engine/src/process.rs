use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use chem_core::{PipelineError, StructureConverter};
use chem_domain::StructureEncoding;
use log::{debug, info, warn};

use crate::config::ConverterConfig;
use crate::ConverterError;

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Conversor por proceso externo y archivos de intercambio fijos.
/// No es seguro para uso concurrente sobre el mismo `workdir`.
#[derive(Debug, Clone)]
pub struct ProcessConverter {
    config: ConverterConfig,
}

impl ProcessConverter {
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Ejecuta una conversión completa: entrada -> proceso -> salida.
    pub fn run(&self, notation: &str) -> Result<StructureEncoding, ConverterError> {
        let input = self.config.input_path();
        let output = self.config.output_path();
        fs::write(&input, notation).map_err(|e| handoff(&input, e))?;
        // Una salida previa nunca debe leerse como resultado de esta conversión.
        match fs::remove_file(&output) {
            Ok(()) => debug!("convert:removed stale output path={}", output.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(handoff(&output, e)),
        }

        let executable = self.config.executable.display().to_string();
        debug!("convert:start exe={executable} workdir={}", self.config.workdir.display());
        let mut child = Command::new(&self.config.executable).args(&self.config.args)
                                                             .current_dir(&self.config.workdir)
                                                             .stdin(Stdio::null())
                                                             .spawn()
                                                             .map_err(|e| ConverterError::Spawn { executable: executable.clone(),
                                                                                                  reason: e.to_string() })?;
        let status = wait_with_timeout(&mut child, self.config.timeout)?;
        if !status.success() {
            return Err(ConverterError::ExitStatus(status.to_string()));
        }

        let bytes = fs::read(&output).map_err(|e| ConverterError::MissingOutput { path: output.display().to_string(),
                                                                                 reason: e.to_string() })?;
        if bytes.is_empty() {
            return Err(ConverterError::EmptyOutput(output.display().to_string()));
        }
        info!("convert:done bytes={}", bytes.len());
        Ok(StructureEncoding::new(bytes))
    }
}

fn handoff(path: &Path, e: std::io::Error) -> ConverterError {
    ConverterError::Handoff { path: path.display().to_string(),
                              reason: e.to_string() }
}

/// Espera acotada: al vencer el plazo se mata el proceso.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> Result<ExitStatus, ConverterError> {
    let started = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if started.elapsed() >= timeout => {
                warn!("convert:timeout after {timeout:?}, killing pid={}", child.id());
                let _ = child.kill();
                let _ = child.wait();
                return Err(ConverterError::Timeout(timeout));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => return Err(ConverterError::ExitStatus(format!("wait failed: {e}"))),
        }
    }
}

impl StructureConverter for ProcessConverter {
    fn convert(&self, notation: &str) -> Result<StructureEncoding, PipelineError> {
        Ok(self.run(notation)?)
    }
}
