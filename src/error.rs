//! # Errores fatales de arranque
//! src/error.rs
//!
//! Solo los errores que impiden empezar a aceptar conexiones llegan hasta
//! `main`. Los fallos de una conexión individual se resuelven dentro del
//! worker o del acceptor que los observa y nunca se propagan.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// La configuración no pasó la validación
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// No se pudo crear, enlazar o poner a escuchar el socket
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// El archivo de la página principal no se pudo leer y no se permite fallback
    #[error("failed to load cache file {}: {source}", path.display())]
    CacheLoad {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// El sistema operativo no dejó crear un thread del pool
    #[error("failed to spawn worker thread: {0}")]
    SpawnWorker(#[source] io::Error),
}
