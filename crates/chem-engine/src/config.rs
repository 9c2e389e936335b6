use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_EXECUTABLE: &str = "convert.exe";
pub const INPUT_FILE: &str = "smiles.input";
pub const OUTPUT_FILE: &str = "cdx.output";

/// Configuración del conversor.
///
/// `executable` relativo se resuelve según la plataforma (PATH); el CLI lo
/// convierte en absoluto antes de construir el conversor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterConfig {
    pub executable: PathBuf,
    /// Argumentos extra. Vacío por defecto: el conversor no recibe argumentos.
    pub args: Vec<String>,
    /// Directorio de trabajo del conversor y de los archivos de intercambio.
    pub workdir: PathBuf,
    pub input_file: String,
    pub output_file: String,
    pub timeout: Duration,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        ConverterConfig { executable: PathBuf::from(DEFAULT_EXECUTABLE),
                          args: Vec::new(),
                          workdir: PathBuf::from("."),
                          input_file: INPUT_FILE.to_string(),
                          output_file: OUTPUT_FILE.to_string(),
                          timeout: Duration::from_secs(120) }
    }
}

impl ConverterConfig {
    pub fn input_path(&self) -> PathBuf {
        self.workdir.join(&self.input_file)
    }
    pub fn output_path(&self) -> PathBuf {
        self.workdir.join(&self.output_file)
    }
    pub fn with_workdir(mut self, workdir: impl AsRef<Path>) -> Self {
        self.workdir = workdir.as_ref().to_path_buf();
        self
    }
}
