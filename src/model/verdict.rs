use std::fmt::Display;

/// Outcome of a print job. `Display` renders the response line sent back
/// to the client.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Printed { filename: String, remaining: f64 },
    OutOfInk { filename: String, remaining: f64 },
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Printed { filename, remaining } => write!(
                f,
                "Impresión de {} completada. Tinta restante: {:.1}%",
                filename, remaining
            ),
            Verdict::OutOfInk { filename, remaining } => write!(
                f,
                "No hay suficiente tinta para imprimir {}. Tinta restante: {:.1}%",
                filename, remaining
            ),
        }
    }
}
