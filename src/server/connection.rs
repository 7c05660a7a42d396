//! # Atención de una Conexión
//! src/server/connection.rs
//!
//! Lo que hace un worker con cada conexión que desencola:
//!
//! 1. Una sola lectura de hasta `buffer.len()` bytes
//! 2. Parsing del request line y headers
//! 3. Routing (o 400 si el parsing falla)
//! 4. Una sola escritura con la respuesta completa
//!
//! Cerrar la conexión le toca al llamador (basta con soltarla). Ningún
//! fallo sale de aquí como error: todo termina en un [`ConnectionOutcome`].
//! No hay timeouts, un peer que no manda nada ocupa al worker hasta que
//! cierre.

use crate::http::{Request, StatusCode};
use crate::router::Router;
use std::io::{self, Read, Write};
use tracing::debug;

/// Cómo terminó la atención de una conexión
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionOutcome {
    /// Se envió la respuesta completa
    Responded(StatusCode),
    /// El peer cerró sin mandar datos
    PeerClosed,
    /// Falló la lectura
    ReceiveFailed(io::ErrorKind),
    /// Falló la escritura de esta respuesta
    SendFailed(StatusCode, io::ErrorKind),
}

/// Atiende un request sobre `stream` usando `buffer` como espacio de lectura
pub fn serve_connection<S: Read + Write>(
    stream: &mut S,
    router: &Router,
    buffer: &mut [u8],
) -> ConnectionOutcome {
    let received = match read_once(stream, buffer) {
        Ok(0) => return ConnectionOutcome::PeerClosed,
        Ok(n) => n,
        Err(e) => return ConnectionOutcome::ReceiveFailed(e.kind()),
    };

    let response = match Request::parse(&buffer[..received]) {
        Ok(request) => {
            debug!(
                method = request.method(),
                path = request.path(),
                host = request.host().unwrap_or("-"),
                "Request parsed"
            );
            router.route(&request)
        }
        Err(e) => {
            debug!(error = %e, bytes = received, "Unparseable request");
            router.bad_request()
        }
    };

    match stream.write_all(response.bytes).and_then(|()| stream.flush()) {
        Ok(()) => ConnectionOutcome::Responded(response.status),
        Err(e) => ConnectionOutcome::SendFailed(response.status, e.kind()),
    }
}

fn read_once<S: Read>(stream: &mut S, buffer: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(buffer) {
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            result => return result,
        }
    }
}
