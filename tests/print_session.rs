//! End-to-end tests: a real server on an ephemeral port, driven by the client.

use inkprint::{
    client,
    error::ClientError,
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
use std::{
    io::Write,
    sync::Arc,
    time::Duration,
};
use tempfile::TempDir;
use tokio::{
    io::{
        AsyncBufReadExt,
        AsyncWriteExt,
        BufReader,
    },
    net::{
        TcpListener,
        TcpStream,
    },
};

async fn start_server(printer: Arc<Printer>, concurrency: Concurrency) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    tokio::spawn(server::serve(listener, printer, concurrency));
    port
}

fn write_file(dir: &TempDir, name: &str, content: &str) -> String {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create");
    file.write_all(content.as_bytes()).expect("write");
    path.to_str().expect("utf-8 path").to_string()
}

#[tokio::test]
async fn test_three_jobs_drain_shared_tank() {
    let printer = Arc::new(Printer::default());
    let port = start_server(printer.clone(), Concurrency::Sequential).await;
    let dir = tempfile::tempdir().expect("tempdir");

    let short = write_file(&dir, "corto.txt", "hola\n");
    let medium = write_file(&dir, "medio.txt", &format!("{}\n", "m".repeat(60)));
    let long = write_file(&dir, "largo.txt", &format!("{}\n{}\n", "l".repeat(60), "l".repeat(60)));

    let first = client::run("127.0.0.1", port, &short).await.expect("first job");
    assert_eq!(first, "Impresión de corto.txt completada. Tinta restante: 99.5%");

    let second = client::run("127.0.0.1", port, &medium).await.expect("second job");
    assert_eq!(second, "Impresión de medio.txt completada. Tinta restante: 98.8%");

    let third = client::run("127.0.0.1", port, &long).await.expect("third job");
    assert_eq!(third, "Impresión de largo.txt completada. Tinta restante: 97.8%");

    assert!((printer.ink_level().await - 97.8).abs() < 1e-9);
}

#[tokio::test]
async fn test_out_of_ink_is_reported() {
    let printer = Arc::new(Printer::new(InkTank::new(0.3), DEFAULT_MAX_JOB_SIZE));
    let port = start_server(printer.clone(), Concurrency::Sequential).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "nota.txt", "sin tinta\n");

    let response = client::run("127.0.0.1", port, &path).await.expect("job");
    assert_eq!(
        response,
        "No hay suficiente tinta para imprimir nota.txt. Tinta restante: 0.3%"
    );
    assert!((printer.ink_level().await - 0.3).abs() < 1e-9);
}

#[tokio::test]
async fn test_missing_file_never_connects() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("fantasma.txt");

    let err = client::run("127.0.0.1", port, missing.to_str().expect("utf-8 path"))
        .await
        .expect_err("missing file");
    assert!(matches!(err, ClientError::NotAFile(_)));

    let accepted = tokio::time::timeout(Duration::from_millis(200), listener.accept()).await;
    assert!(accepted.is_err(), "client connected despite a missing file");
}

#[tokio::test]
async fn test_server_rebuilds_content_line_by_line() {
    let printer = Arc::new(Printer::default());
    let port = start_server(printer.clone(), Concurrency::Sequential).await;

    // 49 characters including the line breaks: the cheapest band.
    let lines = ["a".repeat(20), "b".repeat(20), "c".repeat(6)];
    let mut stream = TcpStream::connect(("127.0.0.1", port)).await.expect("connect");
    let mut request = String::from("lineas.txt\n");
    for line in &lines {
        request.push_str(line);
        request.push('\n');
    }
    request.push_str("<FIN>\n");
    stream.write_all(request.as_bytes()).await.expect("write");

    let mut response = String::new();
    BufReader::new(stream).read_line(&mut response).await.expect("read");
    assert_eq!(
        response,
        "Impresión de lineas.txt completada. Tinta restante: 99.5%\n"
    );
}

#[tokio::test]
async fn test_server_survives_broken_connections() {
    let printer = Arc::new(Printer::default());
    let port = start_server(printer.clone(), Concurrency::Sequential).await;

    // Connects and leaves without sending anything.
    drop(TcpStream::connect(("127.0.0.1", port)).await.expect("connect"));

    // Sends a filename and hangs up mid-content.
    let mut partial = TcpStream::connect(("127.0.0.1", port)).await.expect("connect");
    partial.write_all(b"medio.txt\nuna linea").await.expect("write");
    partial.shutdown().await.expect("shutdown");
    let mut response = String::new();
    BufReader::new(partial).read_line(&mut response).await.expect("read");
    assert!(response.starts_with("Impresión de medio.txt completada."));

    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "despues.txt", "ok\n");
    let after = client::run("127.0.0.1", port, &path).await.expect("job after failures");
    assert_eq!(after, "Impresión de despues.txt completada. Tinta restante: 99.0%");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_policy_shares_one_tank() {
    let printer = Arc::new(Printer::new(InkTank::new(5.0), DEFAULT_MAX_JOB_SIZE));
    let port = start_server(printer.clone(), Concurrency::Concurrent).await;
    let dir = tempfile::tempdir().expect("tempdir");
    let path = write_file(&dir, "rafaga.txt", "x\n");

    let jobs: Vec<_> = (0..16)
        .map(|_| {
            let path = path.clone();
            tokio::spawn(async move { client::run("127.0.0.1", port, &path).await })
        })
        .collect();

    let mut printed = 0;
    for job in jobs {
        let response = job.await.expect("join").expect("job");
        if response.starts_with("Impresión") {
            printed += 1;
        }
    }

    assert_eq!(printed, 10);
    assert_eq!(printer.ink_level().await, 0.0);
}
