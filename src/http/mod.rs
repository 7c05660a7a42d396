//! # Módulo HTTP
//!
//! Subconjunto mínimo de HTTP/1.1 implementado a mano:
//!
//! - Parsing del request line y de dos headers (`Host`, `Content-Length`)
//! - Construcción de responses a bytes exactos
//! - Códigos de estado 200, 400 y 404
//!
//! No hay conexiones persistentes, ni chunked encoding, ni lectura de body.
//!
//! ### Formato de Request
//!
//! ```text
//! GET / HTTP/1.1\r\n
//! Host: localhost\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <h1>Hola</h1>
//! ```

pub mod request;   // Parsing de HTTP requests
pub mod response;  // Construcción de HTTP responses
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{ParseError, Request};
pub use response::Response;
pub use status::StatusCode;
