//! Configuração do joblog carregada a partir de `joblog.toml`.
//!
//! A struct [`JoblogConfig`] contém os limites de duração, a política de
//! virada de meia-noite e os parâmetros do servidor HTTP.
//! Valores não presentes no arquivo usam defaults sensíveis.
//! A variável de ambiente `JOBLOG_BIND` tem precedência sobre o arquivo.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

use crate::error::JoblogError;
use crate::pipeline::{Classifier, Pipeline, RolloverPolicy, ThresholdPolicy};

/// Nome do arquivo de configuração procurado no diretório atual.
pub const CONFIG_FILE: &str = "joblog.toml";

/// Configuração de nível superior carregada de `joblog.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct JoblogConfig {
    /// Segundos a partir dos quais um job recebe WARNING.
    #[serde(default = "default_warning_after_secs")]
    pub warning_after_secs: i64,

    /// Segundos a partir dos quais um job recebe ERROR.
    #[serde(default = "default_error_after_secs")]
    pub error_after_secs: i64,

    /// O que fazer quando o END é anterior ao START no relógio.
    #[serde(default)]
    pub rollover: RolloverPolicy,

    /// Endereço em que o servidor HTTP escuta.
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Diretório onde os relatórios gerados são gravados.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

// Valor padrão para WARNING: 5 minutos.
fn default_warning_after_secs() -> i64 {
    300
}

// Valor padrão para ERROR: 10 minutos.
fn default_error_after_secs() -> i64 {
    600
}

fn default_bind() -> String {
    "127.0.0.1:8000".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

impl Default for JoblogConfig {
    fn default() -> Self {
        Self {
            warning_after_secs: default_warning_after_secs(),
            error_after_secs: default_error_after_secs(),
            rollover: RolloverPolicy::default(),
            bind: default_bind(),
            output_dir: default_output_dir(),
        }
    }
}

impl JoblogConfig {
    /// Carrega a configuração de `joblog.toml` no diretório atual.
    /// Usa valores padrão se o arquivo não existir.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    /// Carrega a configuração de um caminho explícito.
    pub fn load_from(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            toml::from_str::<JoblogConfig>(&contents)?
        } else {
            Self::default()
        };

        // Variável de ambiente tem precedência sobre o arquivo de configuração para o endereço.
        if let Ok(bind) = std::env::var("JOBLOG_BIND")
            && !bind.is_empty()
        {
            config.bind = bind;
        }

        config.validate()?;
        Ok(config)
    }

    /// Garante limites positivos, representáveis como `TimeDelta`, e WARNING
    /// não maior que ERROR.
    pub fn validate(&self) -> Result<(), JoblogError> {
        if self.warning_after_secs < 0 || self.error_after_secs < 0 {
            return Err(JoblogError::Config(
                "thresholds must not be negative".to_string(),
            ));
        }
        if self.warning_after_secs > self.error_after_secs {
            return Err(JoblogError::Config(format!(
                "warning_after_secs ({}) exceeds error_after_secs ({})",
                self.warning_after_secs, self.error_after_secs
            )));
        }
        self.thresholds().map(|_| ())
    }

    pub fn thresholds(&self) -> Result<ThresholdPolicy, JoblogError> {
        ThresholdPolicy::from_secs(self.warning_after_secs, self.error_after_secs).ok_or_else(
            || {
                JoblogError::Config(format!(
                    "thresholds out of range: warning_after_secs = {}, error_after_secs = {}",
                    self.warning_after_secs, self.error_after_secs
                ))
            },
        )
    }

    /// Monta o pipeline com a política configurada.
    pub fn pipeline(&self) -> Result<Pipeline, JoblogError> {
        Ok(Pipeline::new(Classifier::new(
            self.thresholds()?,
            self.rollover,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = JoblogConfig::default();
        assert_eq!(config.warning_after_secs, 300);
        assert_eq!(config.error_after_secs, 600);
        assert_eq!(config.rollover, RolloverPolicy::Wrap);
        assert_eq!(config.bind, "127.0.0.1:8000");
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.thresholds().unwrap(), ThresholdPolicy::default());
    }

    #[test]
    fn deserialize_partial_toml() {
        let toml_str = r#"
            error_after_secs = 900
            rollover = "preserve"
        "#;
        let config: JoblogConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.error_after_secs, 900);
        assert_eq!(config.rollover, RolloverPolicy::Preserve);
        assert_eq!(config.warning_after_secs, 300);
        assert_eq!(config.bind, "127.0.0.1:8000");
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let config = JoblogConfig {
            warning_after_secs: 700,
            ..JoblogConfig::default()
        };
        assert!(matches!(config.validate(), Err(JoblogError::Config(_))));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "warning_after_secs = 60\nerror_after_secs = 120\n").unwrap();

        let config = JoblogConfig::load_from(&path).unwrap();
        assert_eq!(
            Some(config.thresholds().unwrap()),
            ThresholdPolicy::from_secs(60, 120)
        );
    }

    #[test]
    fn load_rejects_thresholds_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "warning_after_secs = 9223372036854775000\nerror_after_secs = 9223372036854775807\n",
        )
        .unwrap();

        let err = JoblogConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("out of range"), "{err}");
    }

    #[test]
    fn pipeline_from_out_of_range_config_is_an_error() {
        let config = JoblogConfig {
            warning_after_secs: i64::MAX - 1,
            error_after_secs: i64::MAX,
            ..JoblogConfig::default()
        };
        assert!(matches!(config.pipeline(), Err(JoblogError::Config(_))));
    }

    #[test]
    fn load_from_missing_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = JoblogConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.warning_after_secs, 300);
    }

    #[test]
    fn load_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "warning_after_secs = 900\n").unwrap();
        assert!(JoblogConfig::load_from(&path).is_err());
    }
}
