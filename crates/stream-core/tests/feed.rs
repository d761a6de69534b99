// File: crates/stream-core/tests/feed.rs
// Purpose: Feed loading from a local HTTP listener and from disk.

use stream_core::feed::{fetch_records, read_records};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const CSV: &str = "location,date,vaccine,total_vaccinations\nJapan,2021-02-17,Pfizer/BioNTech,125\nJapan,2021-02-18,Pfizer/BioNTech,\n";

/// Serve one HTTP response with `status` and `body`, then stop.
async fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut sock, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = sock.read(&mut buf).await;
        let resp = format!(
            "HTTP/1.1 {status}\r\ncontent-type: text/csv\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        sock.write_all(resp.as_bytes()).await.unwrap();
        sock.shutdown().await.unwrap();
    });
    format!("http://{addr}/vaccinations-by-manufacturer.csv")
}

#[tokio::test]
async fn fetches_and_parses_feed() {
    let url = serve_once("200 OK", CSV).await;
    let records = fetch_records(&reqwest::Client::new(), &url).await.expect("fetch");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].total_vaccinations, 125);
    assert_eq!(records[1].total_vaccinations, 0);
}

#[tokio::test]
async fn error_status_is_an_error() {
    let url = serve_once("404 Not Found", "gone").await;
    let err = fetch_records(&reqwest::Client::new(), &url).await.unwrap_err();
    assert!(format!("{err:#}").contains("non-success status"), "{err:#}");
}

#[test]
fn reads_csv_from_disk() {
    let path = std::path::PathBuf::from("target/test_out/feed.csv");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, CSV).unwrap();
    let records = read_records(&path).expect("read");
    assert_eq!(records.len(), 2);
    assert!(read_records("target/test_out/does-not-exist.csv").is_err());
}
