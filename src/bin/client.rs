use anyhow::Result;
use clap::Parser;
use inkprint::client::{
    self,
    DEFAULT_PORT,
    DEFAULT_SERVER,
    PROMPT,
};
use log::error;
use tokio::io::{
    AsyncBufReadExt,
    AsyncWriteExt,
    BufReader,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
/// Sends a text file to an inkprint server and shows its verdict
struct Cli {
    /// Server to print on
    #[clap(short, long, default_value = DEFAULT_SERVER, env = "INKPRINT_SERVER")]
    server: String,
    /// Server port
    #[clap(short, long, default_value_t = DEFAULT_PORT, env = "INKPRINT_PORT")]
    port: u16,
    /// File to print; asked for interactively when omitted
    path: Option<String>,
}

async fn prompt() -> Result<String> {
    let mut stdout = tokio::io::stdout();
    stdout.write_all(PROMPT.as_bytes()).await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(line)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Cli::parse();

    let input = match args.path {
        Some(path) => path,
        None => prompt().await?,
    };

    match client::outcome(client::run(&args.server, args.port, &input).await) {
        Ok(line) => println!("{}", line),
        Err(e) => {
            error!("failed to print; error = {}", e);
            return Err(e.into());
        }
    }

    Ok(())
}
