//! Interface de linha de comando do joblog baseada em clap.
//!
//! Define a struct [`Cli`] com subcomandos [`Command`] (report, serve)
//! e flags globais (--config, --rollover, --verbose).

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::pipeline::RolloverPolicy;

/// joblog — reconcilia registros START/END e sinaliza jobs demorados.
#[derive(Debug, Parser)]
#[command(name = "joblog", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Caminho para o arquivo de configuração (padrão: `joblog.toml`).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Política para jobs que atravessam a meia-noite.
    #[arg(long, global = true)]
    pub rollover: Option<RolloverArg>,

    /// Aumenta o nível de log (-v, -vv, -vvv).
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Argumento de virada aceito pela CLI, mapeado para [`RolloverPolicy`] internamente.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RolloverArg {
    /// Soma 24 horas quando o END vem antes do START.
    Wrap,
    /// Mantém a duração negativa.
    Preserve,
}

impl From<RolloverArg> for RolloverPolicy {
    fn from(arg: RolloverArg) -> Self {
        match arg {
            RolloverArg::Wrap => RolloverPolicy::Wrap,
            RolloverArg::Preserve => RolloverPolicy::Preserve,
        }
    }
}

/// Formato do relatório gerado.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Uma linha legível por job.
    #[default]
    Text,
    /// Array JSON com duração em segundos e indicador.
    Json,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Json => "json",
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Processa um arquivo de log e grava o relatório.
    Report {
        /// Arquivo de log com linhas `HH:MM:SS, descrição, START|END, pid`.
        file: PathBuf,

        /// Diretório de saída (sobrepõe `output_dir` da configuração).
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Formato do relatório.
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,

        /// Imprime o relatório na saída padrão em vez de gravar um arquivo.
        #[arg(long, default_value_t = false)]
        stdout: bool,
    },

    /// Inicia o servidor HTTP de upload de logs.
    Serve {
        /// Endereço de escuta (sobrepõe `bind` da configuração).
        #[arg(long)]
        bind: Option<String>,
    },
}
