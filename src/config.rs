//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración leída una sola vez al arrancar, desde argumentos CLI o
//! variables de entorno. Los valores por defecto son los límites fijos del
//! servidor; nada se reconfigura mientras está corriendo.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./pooled_http_server --port 8080 \
//!   --workers 16 \
//!   --queue-capacity 5000 \
//!   --cache-file index.html
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 WORKERS=8 ./pooled_http_server
//! ```

use crate::error::ServerError;
use clap::Parser;
use std::path::PathBuf;

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "pooled_http_server")]
#[command(about = "Servidor HTTP/1.1 minimo con pool fijo de workers")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "8080", env = "HTTP_PORT")]
    pub port: u16,

    // === Pool y cola ===

    /// Número de workers del pool (fijo durante toda la vida del proceso)
    #[arg(short, long, default_value = "16", env = "WORKERS")]
    pub workers: usize,

    /// Conexiones pendientes que caben en la cola antes de descartar
    #[arg(long = "queue-capacity", default_value = "5000", env = "QUEUE_CAPACITY")]
    pub queue_capacity: usize,

    /// Bytes leídos del socket por request (una sola lectura)
    #[arg(long = "recv-buffer", default_value = "1024", env = "RECV_BUFFER")]
    pub recv_buffer: usize,

    // === Cache ===

    /// Archivo servido en `GET /`
    #[arg(long = "cache-file", default_value = "index.html", env = "CACHE_FILE")]
    pub cache_file: PathBuf,

    /// Abortar el arranque si el archivo no se puede leer (sin fallback)
    #[arg(long = "strict-cache", env = "STRICT_CACHE")]
    pub strict_cache: bool,

    // === Socket ===

    /// Desactivar Nagle en cada conexión aceptada
    #[arg(
        long,
        default_value = "true",
        env = "TCP_NODELAY",
        action = clap::ArgAction::Set
    )]
    pub nodelay: bool,

    /// Backlog pasado a listen()
    #[arg(long, default_value = "1024", env = "LISTEN_BACKLOG")]
    pub backlog: i32,

    // === Logging ===

    /// Nivel de log cuando RUST_LOG no está definido
    #[arg(long = "log-level", default_value = "info", env = "LOG_LEVEL")]
    pub log_level: String,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use pooled_http_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Un error aquí es fatal: el servidor no llega a escuchar.
    pub fn validate(&self) -> Result<(), ServerError> {
        if self.workers == 0 {
            return Err(ServerError::InvalidConfig("workers must be >= 1".to_string()));
        }
        if self.queue_capacity == 0 {
            return Err(ServerError::InvalidConfig(
                "queue capacity must be >= 1".to_string(),
            ));
        }
        if self.recv_buffer == 0 {
            return Err(ServerError::InvalidConfig(
                "receive buffer must be >= 1 byte".to_string(),
            ));
        }
        if self.backlog <= 0 {
            return Err(ServerError::InvalidConfig("backlog must be >= 1".to_string()));
        }

        Ok(())
    }
}

impl Default for Config {
    /// Mismos valores que los defaults del CLI
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: 16,
            queue_capacity: 5000,
            recv_buffer: 1024,
            cache_file: PathBuf::from("index.html"),
            strict_cache: false,
            nodelay: true,
            backlog: 1024,
            log_level: "info".to_string(),
        }
    }
}
