//! # Construcción de Respuestas HTTP
//!
//! API para construir respuestas HTTP/1.1 y convertirlas a bytes.
//! En este servidor el builder solo se usa durante el arranque: el blob de
//! la página principal y las respuestas fijas (404, 400) se construyen una
//! vez y después se envían como slices sin volver a formatear nada.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 404 Not Found\r\n
//! Content-Length: 9\r\n
//! \r\n
//! Not Found
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use pooled_http_server::http::{Response, StatusCode};
//!
//! let bytes = Response::new(StatusCode::NotFound)
//!     .with_body(b"Not Found")
//!     .to_bytes();
//!
//! assert_eq!(bytes, b"HTTP/1.1 404 Not Found\r\nContent-Length: 9\r\n\r\nNot Found");
//! ```

use super::StatusCode;

/// Versión que se escribe en el status line
pub const HTTP_VERSION: &str = "HTTP/1.1";

/// Representa una respuesta HTTP/1.1 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP
    status: StatusCode,

    /// Headers en orden de inserción. El orden importa porque los bytes
    /// generados deben ser exactos.
    headers: Vec<(String, String)>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta sin headers ni body
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta
    ///
    /// Si el header ya existe, se sobrescribe conservando su posición.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.set_header(name, value);
        self
    }

    /// Establece el cuerpo de la respuesta
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body(mut self, body: &[u8]) -> Self {
        self.body = body.to_vec();
        let len = self.body.len().to_string();
        self.set_header("Content-Length", &len);
        self
    }

    /// Igual que [`Response::with_body`] pero tomando ownership del buffer
    ///
    /// Útil para el archivo cacheado: evita copiarlo dos veces.
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        let len = self.body.len().to_string();
        self.set_header("Content-Length", &len);
        self
    }

    fn set_header(&mut self, name: &str, value: &str) {
        match self.headers.iter_mut().find(|(n, _)| n == name) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.headers.push((name.to_string(), value.to_string())),
        }
    }

    /// Serializa solo el status line y los headers (incluye la línea vacía final)
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut head = format!("{} {}\r\n", HTTP_VERSION, self.status);
        for (name, value) in &self.headers {
            head.push_str(name);
            head.push_str(": ");
            head.push_str(value);
            head.push_str("\r\n");
        }
        head.push_str("\r\n");
        head.into_bytes()
    }

    /// Convierte la respuesta a un único buffer contiguo (headers + body)
    ///
    /// Un solo buffer permite enviarla con una sola escritura al socket.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = self.head_bytes();
        result.reserve_exact(self.body.len());
        result.extend_from_slice(&self.body);
        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Obtiene un header por nombre exacto
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}
