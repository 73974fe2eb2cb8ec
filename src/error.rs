use std::io;
use thiserror::Error;
use tokio_util::codec::LinesCodecError;

/// Everything that can stop the client from getting a verdict.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("El nombre del archivo no puede estar vacío.")]
    EmptyPath,

    #[error("El archivo {0} no existe o no es un archivo válido.")]
    NotAFile(String),

    #[error("No se pudo leer el archivo {path}: {source}")]
    Unreadable { path: String, source: io::Error },

    #[error("failed to connect to {addr}: {source}")]
    Connect { addr: String, source: io::Error },

    #[error("connection closed before the server answered")]
    NoResponse,

    #[error(transparent)]
    Io(#[from] LinesCodecError),
}

impl ClientError {
    /// Problems with what the user typed, detected before any connection.
    pub fn is_input(&self) -> bool {
        matches!(
            self,
            ClientError::EmptyPath | ClientError::NotAFile(_) | ClientError::Unreadable { .. }
        )
    }
}
