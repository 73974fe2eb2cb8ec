use crate::{
    error::ClientError,
    model::job::PrintJob,
};
use futures::SinkExt;
use log::debug;
use std::path::Path;
use tokio::net::TcpStream;
use tokio_stream::StreamExt;
use tokio_util::codec::{
    Framed,
    LinesCodec,
};

pub const DEFAULT_SERVER: &str = "localhost";
pub const DEFAULT_PORT: u16 = 12345;
pub const PROMPT: &str = "Ingrese la ruta del archivo a imprimir : ";

/// Reads the file named by `input` into a job. Fails before touching the
/// network if the path is blank, missing, a directory or not readable text.
pub async fn load_job(input: &str) -> Result<PrintJob, ClientError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ClientError::EmptyPath);
    }

    let path = Path::new(input);
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {}
        _ => return Err(ClientError::NotAFile(input.to_string())),
    }

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| ClientError::NotAFile(input.to_string()))?;

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ClientError::Unreadable {
            path: input.to_string(),
            source,
        })?;

    Ok(PrintJob::new(filename, content))
}

/// Sends `job` to the printer at `host:port` and returns its answer.
pub async fn submit(host: &str, port: u16, job: &PrintJob) -> Result<String, ClientError> {
    let stream = TcpStream::connect((host, port))
        .await
        .map_err(|source| ClientError::Connect {
            addr: format!("{}:{}", host, port),
            source,
        })?;
    debug!("Connected to {}:{}", host, port);

    let mut framed = Framed::new(stream, LinesCodec::new());
    for line in job.wire_lines() {
        framed.feed(line).await?;
    }
    SinkExt::<&str>::flush(&mut framed).await?;
    debug!("Sent {}", job);

    let response = framed.next().await.ok_or(ClientError::NoResponse)??;

    Ok(response)
}

pub async fn run(host: &str, port: u16, input: &str) -> Result<String, ClientError> {
    let job = load_job(input).await?;
    submit(host, port, &job).await
}

/// The line to show the user. Input errors are shown and end the run
/// normally; anything else is handed back to the caller.
pub fn outcome(result: Result<String, ClientError>) -> Result<String, ClientError> {
    match result {
        Ok(response) => Ok(response),
        Err(e) if e.is_input() => Ok(format!("Error: {}", e)),
        Err(e) => Err(e),
    }
}
