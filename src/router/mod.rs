//! # Routing
//! src/router/mod.rs
//!
//! Mapea un request parseado a los bytes que hay que enviar.
//!
//! ```text
//! Request → Router → RouteResponse (status + bytes)
//! ```
//!
//! Solo existe una ruta: `GET /` (match exacto, sin normalizar la barra
//! final) devuelve la cache. Cualquier otra combinación devuelve 404.
//! Todas las respuestas se construyen una vez en [`Router::new`].

use crate::cache::ResponseCache;
use crate::http::{Request, Response, StatusCode};

/// Body de la respuesta 404
pub const NOT_FOUND_BODY: &[u8] = b"Not Found";

/// Body de la respuesta 400
pub const BAD_REQUEST_BODY: &[u8] = b"Bad Request";

/// Respuesta elegida por el router
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteResponse<'a> {
    pub status: StatusCode,
    /// Respuesta completa (headers + body), se envía con una sola escritura
    pub bytes: &'a [u8],
}

/// Router con las respuestas precalculadas
#[derive(Debug, Clone)]
pub struct Router {
    cache: ResponseCache,
    not_found: Vec<u8>,
    bad_request: Vec<u8>,
}

impl Router {
    /// Crea el router a partir de la cache de la página principal
    pub fn new(cache: ResponseCache) -> Self {
        Self {
            cache,
            not_found: Response::new(StatusCode::NotFound)
                .with_body(NOT_FOUND_BODY)
                .to_bytes(),
            bad_request: Response::new(StatusCode::BadRequest)
                .with_body(BAD_REQUEST_BODY)
                .to_bytes(),
        }
    }

    /// Elige la respuesta para un request
    ///
    /// # Ejemplo
    /// ```
    /// use pooled_http_server::cache::ResponseCache;
    /// use pooled_http_server::http::{Request, StatusCode};
    /// use pooled_http_server::router::Router;
    ///
    /// let router = Router::new(ResponseCache::fallback());
    ///
    /// let request = Request::parse(b"GET /missing HTTP/1.1\r\n\r\n").unwrap();
    /// assert_eq!(router.route(&request).status, StatusCode::NotFound);
    /// ```
    pub fn route(&self, request: &Request) -> RouteResponse<'_> {
        if request.method() == "GET" && request.path() == "/" {
            RouteResponse {
                status: StatusCode::Ok,
                bytes: self.cache.bytes(),
            }
        } else {
            RouteResponse {
                status: StatusCode::NotFound,
                bytes: &self.not_found,
            }
        }
    }

    /// Respuesta fija para requests que no se pudieron parsear
    pub fn bad_request(&self) -> RouteResponse<'_> {
        RouteResponse {
            status: StatusCode::BadRequest,
            bytes: &self.bad_request,
        }
    }

    pub fn cache(&self) -> &ResponseCache {
        &self.cache
    }
}
