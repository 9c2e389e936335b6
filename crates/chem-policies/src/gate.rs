//! Gate de consola.
//!
//! Formato de prompt: `SMILES:<default>>`. Una línea vacía acepta el
//! default; una línea no vacía (recortada) lo reemplaza.

use std::io::{self, BufRead, Stdin, StdinLock, Stdout, Write};

use chem_core::{NotationGate, PipelineError};
use chem_domain::CompoundRecord;
use log::{debug, info};

use crate::OverridePolicy;

pub const RECORD_SEPARATOR: &str = "----------";

pub struct OverrideGate<R, W> {
    policy: OverridePolicy,
    input: R,
    output: W,
}

impl OverrideGate<StdinLock<'static>, Stdout> {
    /// Gate sobre la consola del proceso.
    pub fn stdio(policy: OverridePolicy) -> Self {
        let stdin: Stdin = io::stdin();
        OverrideGate::new(policy, stdin.lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> OverrideGate<R, W> {
    pub fn new(policy: OverridePolicy, input: R, output: W) -> Self {
        OverrideGate { policy, input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    /// Escribe el prompt y lee una línea. `None` en EOF.
    fn prompt(&mut self, default: &str) -> Result<Option<String>, PipelineError> {
        write!(self.output, "SMILES:{default}>").and_then(|_| self.output.flush())
                                                 .map_err(io_error)?;
        let mut line = String::new();
        let n = self.input.read_line(&mut line).map_err(io_error)?;
        if n == 0 {
            // Sin salto de línea previo, la siguiente salida quedaría pegada al prompt.
            writeln!(self.output).map_err(io_error)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn io_error(e: io::Error) -> PipelineError {
    PipelineError::OperatorInput(e.to_string())
}

impl<R: BufRead, W: Write> NotationGate for OverrideGate<R, W> {
    fn announce(&mut self, record: &CompoundRecord) -> Result<(), PipelineError> {
        writeln!(self.output,
                 "{RECORD_SEPARATOR}\nCOMPOUND ID:{}\nCAS:{}\nSUBSTANCE NAME:{}",
                 record.compound_id, record.registry_number, record.substance_name).map_err(io_error)
    }

    fn confirm_or_override(&mut self, resolved: Option<&str>) -> Result<String, PipelineError> {
        let default = resolved.unwrap_or("");
        match self.policy {
            OverridePolicy::Auto => Ok(default.to_string()),
            OverridePolicy::Interactive => match self.prompt(default)? {
                None => {
                    debug!("gate:eof accepting default");
                    Ok(default.to_string())
                }
                Some(line) if line.is_empty() => Ok(default.to_string()),
                Some(line) => {
                    info!("gate:override {default:?} -> {line:?}");
                    Ok(line)
                }
            },
            OverridePolicy::Forced => loop {
                match self.prompt(default)? {
                    None => return Err(PipelineError::OperatorInput("end of input while a notation was required".into())),
                    Some(line) if line.is_empty() => continue,
                    Some(line) => {
                        if line != default {
                            info!("gate:override {default:?} -> {line:?}");
                        }
                        return Ok(line);
                    }
                }
            },
        }
    }
}
