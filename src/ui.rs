//! Saída de terminal do joblog — resumo colorido do relatório.
//!
//! Usa a crate `console` para estilização com cores. O [`SummaryPrinter`]
//! mostra quantos jobs ficaram normais, em WARNING, em ERROR ou incompletos.

use std::path::Path;

use console::Style;

use crate::pipeline::Summary;

/// Imprime o resumo de um relatório com cores por indicador.
pub struct SummaryPrinter {
    // Verde para jobs normais.
    green: Style,
    // Amarelo para WARNING e jobs incompletos.
    yellow: Style,
    // Vermelho para ERROR.
    red: Style,
    dim: Style,
}

impl Default for SummaryPrinter {
    fn default() -> Self {
        Self {
            green: Style::new().green().bold(),
            yellow: Style::new().yellow(),
            red: Style::new().red().bold(),
            dim: Style::new().dim(),
        }
    }
}

impl SummaryPrinter {
    /// Monta as linhas do resumo sem imprimir.
    pub fn lines(&self, summary: &Summary) -> Vec<String> {
        let mut lines = vec![format!("{} jobs reconciled", summary.total)];
        lines.push(format!("  {} {} normal", self.green.apply_to("✓"), summary.normal));
        if summary.warnings > 0 {
            lines.push(format!(
                "  {} {} over warning threshold",
                self.yellow.apply_to("!"),
                summary.warnings
            ));
        }
        if summary.errors > 0 {
            lines.push(format!(
                "  {} {} over error threshold",
                self.red.apply_to("✗"),
                summary.errors
            ));
        }
        if summary.partial > 0 {
            lines.push(format!(
                "  {} {} missing START or END",
                self.yellow.apply_to("?"),
                summary.partial
            ));
        }
        lines
    }

    /// Imprime o resumo em stderr, com o destino do relatório quando houver.
    pub fn print(&self, summary: &Summary, destination: Option<&Path>) {
        for line in self.lines(summary) {
            eprintln!("{line}");
        }
        if let Some(path) = destination {
            eprintln!("{}", self.dim.apply_to(format!("report written to {}", path.display())));
        }
    }
}
