use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use skiff::server::listener::serve;

static ROOT_COUNTER: AtomicU32 = AtomicU32::new(0);

fn temp_root(tag: &str) -> PathBuf {
    let n = ROOT_COUNTER.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("skiff-srv-{tag}-{}-{n}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

async fn start_server(root: PathBuf) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(serve(listener, root));
    addr
}

/// Sends one request and reads until the server closes the connection.
async fn exchange(addr: SocketAddr, request: &[u8]) -> Vec<u8> {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request).await.unwrap();

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();
    reply
}

fn split_response(reply: &[u8]) -> (&[u8], &[u8]) {
    let end = reply
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("reply has no header terminator");
    reply.split_at(end + 4)
}

#[tokio::test]
async fn test_get_existing_file_round_trip() {
    let root = temp_root("get");
    std::fs::write(root.join("index.html"), b"0123456789").unwrap();
    let addr = start_server(root).await;

    let reply = exchange(addr, b"GET /index.html HTTP/1.1\r\n\r\n").await;
    let (header, body) = split_response(&reply);

    assert_eq!(
        header,
        b"HTTP/1.0 200 OK\r\nContent-Length: 10\r\nContent-Type: text/html\r\n\r\n"
    );
    assert_eq!(body, b"0123456789");
}

#[tokio::test]
async fn test_content_length_matches_body() {
    let root = temp_root("clen");
    let content: Vec<u8> = (0..300_000u32).map(|i| (i % 251) as u8).collect();
    std::fs::write(root.join("blob.bin"), &content).unwrap();
    let addr = start_server(root).await;

    let reply = exchange(addr, b"GET /blob.bin HTTP/1.0\r\n\r\n").await;
    let (header, body) = split_response(&reply);

    let header_text = std::str::from_utf8(header).unwrap();
    let advertised: usize = header_text
        .lines()
        .find_map(|line| line.strip_prefix("Content-Length: "))
        .unwrap()
        .parse()
        .unwrap();

    assert_eq!(advertised, body.len());
    assert_eq!(body, content);
}

#[tokio::test]
async fn test_fragmented_request_line() {
    let root = temp_root("frag");
    std::fs::write(root.join("x.js"), b"console.log(1);\n").unwrap();
    let addr = start_server(root).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET /x.js").await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;
    stream.write_all(b" HTTP/1.1\r\n").await.unwrap();

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();
    let (header, body) = split_response(&reply);

    assert_eq!(
        header,
        b"HTTP/1.0 200 OK\r\nContent-Length: 16\r\nContent-Type: text/javascript\r\n\r\n"
    );
    assert_eq!(body, b"console.log(1);\n");
}

#[tokio::test]
async fn test_traversal_is_rejected_with_404() {
    let root = temp_root("traversal");
    let addr = start_server(root).await;

    let reply = exchange(addr, b"GET /a/../../etc/passwd HTTP/1.0\r\n\r\n").await;

    assert_eq!(
        reply,
        b"HTTP/1.0 404 Not Found\r\nContent-Length: 0\r\n\r\n"
    );
}

#[tokio::test]
async fn test_missing_file_is_404() {
    let root = temp_root("missing");
    let addr = start_server(root).await;

    let reply = exchange(addr, b"GET /gone.html HTTP/1.1\r\n\r\n").await;

    assert_eq!(
        reply,
        b"HTTP/1.0 404 Not Found\r\nContent-Length: 0\r\n\r\n"
    );
}

#[tokio::test]
async fn test_post_is_rejected_with_400() {
    let root = temp_root("post");
    let addr = start_server(root).await;

    let reply = exchange(addr, b"POST / HTTP/1.0\r\n\r\n").await;

    assert_eq!(
        reply,
        b"HTTP/1.0 400 Bad Request\r\nContent-Length: 0\r\n\r\n"
    );
}

#[tokio::test]
async fn test_peer_close_before_completion_gets_400() {
    let root = temp_root("close");
    let addr = start_server(root).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(b"GET /half").await.unwrap();
    stream.shutdown().await.unwrap();

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();

    assert_eq!(
        reply,
        b"HTTP/1.0 400 Bad Request\r\nContent-Length: 0\r\n\r\n"
    );
}

// Paused clock: the runtime advances time past the receive timeout as soon
// as every task is blocked, so this does not really wait ten seconds.
#[tokio::test(start_paused = true)]
async fn test_silent_connection_times_out_without_response() {
    let root = temp_root("timeout");
    let addr = start_server(root).await;

    let mut stream = TcpStream::connect(addr).await.unwrap();

    let mut reply = Vec::new();
    stream.read_to_end(&mut reply).await.unwrap();

    assert!(reply.is_empty());
}

#[tokio::test]
async fn test_connections_are_independent() {
    let root = temp_root("parallel");
    std::fs::write(root.join("a.css"), b"body{}").unwrap();
    let addr = start_server(root).await;

    // A bad request on one connection must not disturb a good one.
    let bad = tokio::spawn(exchange(addr, b"POST / HTTP/1.0\r\n\r\n"));
    let good = tokio::spawn(exchange(addr, b"GET /a.css HTTP/1.1\r\n\r\n"));

    let bad_reply = bad.await.unwrap();
    let good_reply = good.await.unwrap();

    assert!(bad_reply.starts_with(b"HTTP/1.0 400"));
    let (header, body) = split_response(&good_reply);
    assert_eq!(
        header,
        b"HTTP/1.0 200 OK\r\nContent-Length: 6\r\nContent-Type: text/css\r\n\r\n"
    );
    assert_eq!(body, b"body{}");
}
