use anyhow::Result;
use clap::Parser;
use inkprint::{
    ink::InkTank,
    print::{
        Printer,
        DEFAULT_MAX_JOB_SIZE,
    },
    server::{
        self,
        Concurrency,
    },
};
use log::info;
use std::{
    net::{
        Ipv4Addr,
        SocketAddr,
        SocketAddrV4,
    },
    sync::Arc,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// A printer that charges ink for every text file sent to it
struct Cli {
    /// What address to bind to
    #[clap(short, long, default_value = "0.0.0.0", env = "INKPRINT_ADDRESS")]
    address: Ipv4Addr,
    /// What port to bind to
    #[clap(short, long, default_value = "12345", env = "INKPRINT_PORT")]
    port: u16,
    /// Ink level to start with, in percent
    #[clap(short, long, default_value_t = InkTank::FULL, env = "INKPRINT_INK")]
    ink: f64,
    /// Maximum content size to accept for a single job in bytes
    #[clap(short, long, default_value_t = DEFAULT_MAX_JOB_SIZE, env = "INKPRINT_MAX_JOB_SIZE")]
    max_job_size: usize,
    /// Whether to finish each job before accepting the next connection
    #[clap(short, long, value_enum, default_value_t = Concurrency::Sequential, env = "INKPRINT_CONCURRENCY")]
    concurrency: Concurrency,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::parse();
    let addr = SocketAddr::V4(SocketAddrV4::new(args.address, args.port));

    let printer = Arc::new(Printer::new(InkTank::new(args.ink), args.max_job_size));
    info!("Starting inkprint on {} with {}% ink", addr, printer.ink_level().await);

    server::run(addr, printer, args.concurrency).await
}
