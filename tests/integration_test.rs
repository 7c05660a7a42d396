//! Tests de integración para el servidor HTTP
//! tests/integration_test.rs
//!
//! Cada test levanta su propio servidor en `127.0.0.1:0` dentro de un thread
//! y le habla por TCP, así que no hace falta tener nada corriendo.

use pooled_http_server::cache::ResponseCache;
use pooled_http_server::config::Config;
use pooled_http_server::metrics::MetricsCollector;
use pooled_http_server::router::Router;
use pooled_http_server::server::{ConnectionQueue, Server};
use std::io::{Read, Write};
use std::net::{SocketAddr, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

const HOME: &[u8] = b"<html><body><h1>Pooled server</h1></body></html>";

fn config(workers: usize, queue_capacity: usize) -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        workers,
        queue_capacity,
        ..Config::default()
    }
}

struct Running {
    addr: SocketAddr,
    metrics: MetricsCollector,
    queue: Arc<ConnectionQueue<TcpStream>>,
}

fn start(server: Server) -> Running {
    let running = Running {
        addr: server.local_addr().unwrap(),
        metrics: server.metrics(),
        queue: server.queue(),
    };
    thread::spawn(move || server.run());
    running
}

fn start_with_home(workers: usize, queue_capacity: usize) -> Running {
    let router = Router::new(ResponseCache::from_body("text/html", HOME.to_vec()));
    start(Server::bind(config(workers, queue_capacity), router).unwrap())
}

fn connect(addr: SocketAddr) -> TcpStream {
    let stream = TcpStream::connect(addr).unwrap();
    stream.set_read_timeout(Some(Duration::from_secs(5))).unwrap();
    stream.set_write_timeout(Some(Duration::from_secs(5))).unwrap();
    stream
}

/// Helper: envía un request y retorna la response completa
fn send_request(addr: SocketAddr, raw: &[u8]) -> Vec<u8> {
    let mut stream = connect(addr);
    stream.write_all(raw).unwrap();
    read_all(&mut stream)
}

fn read_all(stream: &mut TcpStream) -> Vec<u8> {
    let mut response = Vec::new();
    stream.read_to_end(&mut response).unwrap();
    response
}

/// Helper: separa headers y body
fn split_response(response: &[u8]) -> (String, Vec<u8>) {
    let pos = response
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response without header terminator");
    (
        String::from_utf8(response[..pos].to_vec()).unwrap(),
        response[pos + 4..].to_vec(),
    )
}

fn wait_until(what: &str, mut condition: impl FnMut() -> bool) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !condition() {
        assert!(Instant::now() < deadline, "timed out waiting for {}", what);
        thread::sleep(Duration::from_millis(5));
    }
}

#[test]
fn test_home_route() {
    let server = start_with_home(4, 16);
    let response = send_request(server.addr, b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");

    let (head, body) = split_response(&response);
    assert_eq!(
        head,
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: {}",
            HOME.len()
        )
    );
    assert_eq!(body, HOME);
}

#[test]
fn test_not_found_and_bad_request() {
    let server = start_with_home(2, 16);

    let response = send_request(server.addr, b"GET /index.html HTTP/1.1\r\n\r\n");
    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\r\nNot Found");

    let response = send_request(server.addr, b"POST / HTTP/1.1\r\nContent-Length: 0\r\n\r\n");
    assert_eq!(response, b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\r\nNot Found");

    let response = send_request(server.addr, b"NOSPACES\r\n\r\n");
    assert_eq!(response, b"HTTP/1.1 400 Bad Request\r\nContent-Length: 11\r\n\r\nBad Request");
}

#[test]
fn test_cache_file_loaded_at_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    std::fs::write(&path, b"<p>from disk</p>").unwrap();

    let mut config = config(2, 16);
    config.cache_file = path.clone();
    let server = start(Server::from_config(config).unwrap());

    // Cambiar el archivo después de arrancar no afecta lo que se sirve
    std::fs::write(&path, b"<p>changed</p>").unwrap();

    let (head, body) = split_response(&send_request(server.addr, b"GET / HTTP/1.1\r\n\r\n"));
    assert!(head.ends_with("Content-Length: 16"));
    assert_eq!(body, b"<p>from disk</p>");
}

#[test]
fn test_missing_cache_file_serves_consistent_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(2, 16);
    config.cache_file = dir.path().join("missing.html");
    let server = start(Server::from_config(config).unwrap());

    let (head, body) = split_response(&send_request(server.addr, b"GET / HTTP/1.1\r\n\r\n"));
    let declared: usize = head
        .lines()
        .find_map(|line| line.strip_prefix("Content-Length: "))
        .unwrap()
        .parse()
        .unwrap();

    assert_eq!(declared, body.len());
    assert_eq!(body, b"Hello World");
}

#[test]
fn test_concurrent_clients() {
    const CLIENTS: usize = 64;
    let server = start_with_home(8, 256);
    let addr = server.addr;

    let clients: Vec<_> = (0..CLIENTS)
        .map(|i| {
            thread::spawn(move || {
                let raw: &[u8] = if i % 4 == 0 {
                    b"GET /other HTTP/1.1\r\n\r\n"
                } else {
                    b"GET / HTTP/1.1\r\n\r\n"
                };
                (i, send_request(addr, raw))
            })
        })
        .collect();

    for client in clients {
        let (i, response) = client.join().unwrap();
        if i % 4 == 0 {
            assert!(response.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
        } else {
            assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"));
            assert!(response.ends_with(HOME));
        }
    }

    let snap = server.metrics.snapshot();
    assert_eq!(snap.accepted, CLIENTS as u64);
    assert_eq!(snap.shed, 0);
}

#[test]
fn test_overload_sheds_connections_beyond_capacity() {
    // Un worker y una cola de un solo lugar
    let server = start_with_home(1, 1);
    let metrics = &server.metrics;

    // A: el worker lo toma y queda bloqueado leyendo (no hay timeouts)
    let mut a = connect(server.addr);
    // accepted se cuenta antes de encolar: hay que esperar a que el worker lo saque
    wait_until("A to be dequeued", || {
        metrics.snapshot().picked_up == 1 && server.queue.is_empty()
    });

    // B: ocupa el único lugar de la cola
    let mut b = connect(server.addr);
    wait_until("B to be queued", || {
        metrics.snapshot().accepted == 2 && server.queue.len() == 1
    });

    // C: la cola está llena, se cierra sin pasar por ningún worker
    let mut c = connect(server.addr);
    wait_until("C to be shed", || metrics.snapshot().shed == 1);

    let mut buf = [0u8; 64];
    match c.read(&mut buf) {
        Ok(n) => assert_eq!(n, 0, "shed connection must not receive a response"),
        Err(e) => assert_ne!(e.kind(), std::io::ErrorKind::WouldBlock),
    }

    // A y B se atienden normalmente una vez que A manda su request
    a.write_all(b"GET / HTTP/1.1\r\n\r\n").unwrap();
    assert!(read_all(&mut a).starts_with(b"HTTP/1.1 200 OK\r\n"));

    b.write_all(b"GET /b HTTP/1.1\r\n\r\n").unwrap();
    assert!(read_all(&mut b).starts_with(b"HTTP/1.1 404 Not Found\r\n"));

    wait_until("A and B to finish", || metrics.snapshot().finished() == 2);
    let snap = metrics.snapshot();
    assert_eq!(snap.accepted, 3);
    assert_eq!(snap.picked_up, 2);
    assert_eq!(snap.shed, 1);
    assert_eq!(snap.served_ok, 1);
    assert_eq!(snap.not_found, 1);
    assert_eq!(snap.in_flight(), 0);
}

#[test]
fn test_server_survives_misbehaving_peers() {
    let server = start_with_home(2, 16);

    // Peer que conecta y cierra sin mandar nada
    drop(connect(server.addr));
    // Peer que manda basura binaria
    send_request(server.addr, b"\x00\x01\x02\x03");

    wait_until("misbehaving peers to be handled", || {
        server.metrics.snapshot().finished() == 2
    });

    let response = send_request(server.addr, b"GET / HTTP/1.1\r\n\r\n");
    assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"));
}
