//! # Parsing de Requests HTTP
//! src/http/request.rs
//!
//! Parser mínimo sobre slices de bytes con búsqueda de delimitadores
//! verificada por límites. No asume terminación en `\0` ni offsets sin chequear.
//!
//! ## Formato aceptado
//!
//! ```text
//! GET / HTTP/1.1\r\n
//! Host: localhost:8080\r\n
//! Content-Length: 0\r\n
//! \r\n
//! ```
//!
//! 1. **Request Line**: `METHOD SP PATH SP VERSION CRLF`. Si falta alguno de
//!    los dos espacios o el CRLF, el request es inválido.
//! 2. **Headers**: solo se reconocen `Host` y `Content-Length`, con
//!    comparación exacta (sensible a mayúsculas). El resto se ignora.
//! 3. **Fin de headers**: una línea vacía, una línea sin `:` o el final del
//!    buffer. En los tres casos el request sigue siendo válido.
//!
//! El body nunca se lee, aunque venga `Content-Length`.

use thiserror::Error;

const CRLF: &[u8] = b"\r\n";

/// Errores que pueden ocurrir durante el parsing del request line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No hay `\r\n` que cierre el request line
    #[error("request line is not terminated by CRLF")]
    MissingLineEnd,

    /// No hay espacio entre método y path
    #[error("missing space after method")]
    MissingMethodDelimiter,

    /// No hay espacio entre path y versión
    #[error("missing space after path")]
    MissingPathDelimiter,
}

/// Request HTTP parseado
///
/// Vive lo que dura una iteración de un worker; nunca se comparte entre threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    path: String,
    version: String,
    /// Valor del header `Host`, copiado tal cual
    host: Option<String>,
    /// `None` cuando el header no vino (o no era un entero no negativo)
    content_length: Option<u64>,
}

impl Request {
    /// Parsea un request desde el buffer recibido del socket
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use pooled_http_server::http::Request;
    ///
    /// let request = Request::parse(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();
    ///
    /// assert_eq!(request.method(), "GET");
    /// assert_eq!(request.path(), "/");
    /// assert_eq!(request.version(), "HTTP/1.1");
    /// assert_eq!(request.host(), Some("x"));
    /// assert_eq!(request.content_length(), None);
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        let line_end = find(buffer, CRLF).ok_or(ParseError::MissingLineEnd)?;
        let (method, path, version) = Self::parse_request_line(&buffer[..line_end])?;

        let mut request = Request {
            method,
            path,
            version,
            host: None,
            content_length: None,
        };
        request.parse_headers(&buffer[line_end + CRLF.len()..]);

        Ok(request)
    }

    /// Divide `METHOD SP PATH SP VERSION` en los dos primeros espacios
    fn parse_request_line(line: &[u8]) -> Result<(String, String, String), ParseError> {
        let space1 = position(line, b' ').ok_or(ParseError::MissingMethodDelimiter)?;
        let rest = &line[space1 + 1..];
        let space2 = position(rest, b' ').ok_or(ParseError::MissingPathDelimiter)?;

        let method = lossy(&line[..space1]);
        let path = lossy(&rest[..space2]);
        let version = lossy(&rest[space2 + 1..]);

        Ok((method, path, version))
    }

    /// Recorre las líneas de headers hasta la línea vacía
    ///
    /// Una línea sin `:` o sin `\r\n` termina el recorrido igual que la
    /// línea vacía: los headers que vengan después se ignoran.
    fn parse_headers(&mut self, mut remaining: &[u8]) {
        loop {
            if remaining.starts_with(CRLF) {
                break;
            }

            let Some(line_end) = find(remaining, CRLF) else {
                break;
            };
            let line = &remaining[..line_end];

            let Some(colon) = position(line, b':') else {
                break;
            };

            let name = &line[..colon];
            let value = skip_spaces(&line[colon + 1..]);

            match name {
                b"Host" => self.host = Some(lossy(value)),
                b"Content-Length" => self.content_length = parse_content_length(value),
                _ => {}
            }

            remaining = &remaining[line_end + CRLF.len()..];
        }
    }

    // === Métodos públicos para acceder a los campos ===

    /// Método HTTP tal como vino (`GET`, `POST`, ...)
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Path sin normalizar
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Versión HTTP tal como vino
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn content_length(&self) -> Option<u64> {
        self.content_length
    }
}

/// Busca `needle` dentro de `haystack` y retorna el offset de inicio
fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

fn position(haystack: &[u8], byte: u8) -> Option<usize> {
    haystack.iter().position(|&b| b == byte)
}

fn skip_spaces(value: &[u8]) -> &[u8] {
    let start = value.iter().take_while(|&&b| b == b' ').count();
    &value[start..]
}

// Un byte inválido se vuelve U+FFFD, así que nunca coincide con "GET" ni "/"
fn lossy(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn parse_content_length(value: &[u8]) -> Option<u64> {
    std::str::from_utf8(value).ok()?.trim_end().parse().ok()
}
