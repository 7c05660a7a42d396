//! # Cache de la Página Principal
//! src/cache.rs
//!
//! Se lee el archivo una sola vez al arrancar y se arma un único buffer con
//! headers + body. Los workers lo envían con una sola escritura y nunca lo
//! modifican, así que se comparte por `Arc` sin ningún lock.

use crate::error::ServerError;
use crate::http::{Response, StatusCode};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// Body usado cuando el archivo no se puede leer
pub const FALLBACK_BODY: &[u8] = b"Hello World";

const FALLBACK_CONTENT_TYPE: &str = "text/plain";
const HTML_CONTENT_TYPE: &str = "text/html";

/// De dónde salió el contenido de la cache
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheSource {
    /// Leído desde este archivo
    File(PathBuf),
    /// El archivo no se pudo leer; se sirve [`FALLBACK_BODY`]
    Fallback,
    /// Construido desde un buffer en memoria
    Memory,
}

/// Respuesta completa precalculada para `GET /`
#[derive(Debug, Clone)]
pub struct ResponseCache {
    blob: Arc<[u8]>,
    body_len: usize,
    source: CacheSource,
}

impl ResponseCache {
    /// Carga el archivo; si no se puede leer usa el body de fallback
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::read_file(path) {
            Ok(cache) => cache,
            Err(e) => {
                warn!(
                    path = %path.display(),
                    error = %e,
                    "Cache file unreadable, serving fallback body"
                );
                Self::fallback()
            }
        }
    }

    /// Igual que [`ResponseCache::load`] pero sin fallback
    pub fn load_strict(path: impl AsRef<Path>) -> Result<Self, ServerError> {
        let path = path.as_ref();
        Self::read_file(path).map_err(|source| ServerError::CacheLoad {
            path: path.to_path_buf(),
            source,
        })
    }

    fn read_file(path: &Path) -> io::Result<Self> {
        let body = fs::read(path)?;
        let cache = Self::build(HTML_CONTENT_TYPE, body, CacheSource::File(path.to_path_buf()));

        info!(
            path = %path.display(),
            body_bytes = cache.body_len,
            total_bytes = cache.len(),
            "Cache loaded"
        );
        Ok(cache)
    }

    /// Respuesta `Hello World` con un `Content-Length` que coincide con el body
    pub fn fallback() -> Self {
        Self::build(FALLBACK_CONTENT_TYPE, FALLBACK_BODY.to_vec(), CacheSource::Fallback)
    }

    /// Arma el blob `200 OK` a partir de un body en memoria
    pub fn from_body(content_type: &str, body: Vec<u8>) -> Self {
        Self::build(content_type, body, CacheSource::Memory)
    }

    fn build(content_type: &str, body: Vec<u8>, source: CacheSource) -> Self {
        let body_len = body.len();
        let blob = Response::new(StatusCode::Ok)
            .with_header("Content-Type", content_type)
            .with_body_bytes(body)
            .to_bytes();

        Self {
            blob: Arc::from(blob),
            body_len,
            source,
        }
    }

    /// Headers + body listos para el socket
    pub fn bytes(&self) -> &[u8] {
        &self.blob
    }

    /// Tamaño total del blob (headers incluidos)
    pub fn len(&self) -> usize {
        self.blob.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blob.is_empty()
    }

    /// Tamaño del body, el valor declarado en `Content-Length`
    pub fn body_len(&self) -> usize {
        self.body_len
    }

    pub fn source(&self) -> &CacheSource {
        &self.source
    }
}
