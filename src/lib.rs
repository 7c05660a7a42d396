//! # Pooled HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo: un thread acepta conexiones y las entrega a un
//! pool fijo de workers a través de una cola acotada. Cada worker lee un
//! request, lo parsea y responde con la página principal cacheada o con un
//! 404 fijo.
//!
//! ## Arquitectura
//!
//! - `http`: parsing de requests, construcción de responses, status codes
//! - `cache`: la respuesta de `GET /` precalculada al arrancar
//! - `router`: elige qué bytes enviar para cada request
//! - `server`: acceptor, cola acotada, pool de workers
//! - `metrics`: contadores de conexiones
//! - `config`: parámetros de arranque (CLI / variables de entorno)
//! - `error`: errores fatales de arranque
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use pooled_http_server::config::Config;
//! use pooled_http_server::server::Server;
//!
//! let server = Server::from_config(Config::default()).expect("startup failed");
//! server.run().expect("worker pool failed");
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod router;
pub mod server;
