use crate::print::Printer;
use anyhow::Result;
use clap::ValueEnum;
use log::{
    error,
    info,
};
use std::{
    net::SocketAddr,
    sync::Arc,
};
use tokio::net::{
    TcpListener,
    TcpStream,
};

/// How accepted connections are scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Concurrency {
    /// Finish each job before accepting the next connection.
    #[default]
    Sequential,
    /// Handle every connection on its own task.
    Concurrent,
}

async fn handle(printer: &Printer, stream: TcpStream, peer_addr: SocketAddr) {
    if let Err(e) = printer.process(stream).await {
        error!("failed to process connection from {}; error = {}", peer_addr, e);
    }
}

/// Accepts connections forever. Neither a failed accept nor a failed job
/// stops the loop.
pub async fn serve(listener: TcpListener, printer: Arc<Printer>, concurrency: Concurrency) {
    loop {
        let (stream, peer_addr) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                error!("failed to accept connection; error = {}", e);
                continue;
            }
        };
        info!("Client connected: {}", peer_addr);

        match concurrency {
            Concurrency::Sequential => handle(&printer, stream, peer_addr).await,
            Concurrency::Concurrent => {
                let printer = printer.clone();
                tokio::spawn(async move {
                    handle(&printer, stream, peer_addr).await;
                });
            }
        }
    }
}

pub async fn run(addr: SocketAddr, printer: Arc<Printer>, concurrency: Concurrency) -> Result<()> {
    let listener = TcpListener::bind(&addr).await?;
    info!("Listening on {} [concurrency={:?}]", listener.local_addr()?, concurrency);

    serve(listener, printer, concurrency).await;

    Ok(())
}
