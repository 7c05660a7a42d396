//! # Servidor TCP con Pool de Workers
//! src/server/tcp.rs
//!
//! El thread que llama a [`Server::run`] es el acceptor: el único productor
//! de la cola. Solo se bloquea en `accept()` y, brevemente, en el lock de la
//! cola. Nunca atiende requests.
//!
//! ```text
//! accept() → ConnectionQueue::enqueue → worker → parse → route → send → close
//!                     │
//!                     └── cola llena: se cierra la conexión ahí mismo
//! ```

use crate::cache::ResponseCache;
use crate::config::Config;
use crate::error::ServerError;
use crate::metrics::MetricsCollector;
use crate::router::Router;
use crate::server::queue::ConnectionQueue;
use crate::server::worker::WorkerPool;
use std::io;
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Servidor HTTP con acceptor único y pool fijo de workers
pub struct Server {
    config: Config,
    listener: TcpListener,
    router: Arc<Router>,
    queue: Arc<ConnectionQueue<TcpStream>>,
    metrics: MetricsCollector,
}

impl Server {
    /// Carga la cache según la configuración y enlaza el socket
    ///
    /// Todo lo que puede fallar de forma fatal pasa aquí, antes de aceptar
    /// la primera conexión.
    pub fn from_config(config: Config) -> Result<Self, ServerError> {
        config.validate()?;

        let cache = if config.strict_cache {
            ResponseCache::load_strict(&config.cache_file)?
        } else {
            ResponseCache::load(&config.cache_file)
        };

        Self::bind(config, Router::new(cache))
    }

    /// Enlaza el socket con un router ya construido
    pub fn bind(config: Config, router: Router) -> Result<Self, ServerError> {
        config.validate()?;

        let address = config.address();
        let listener = resolve(&address)
            .and_then(|addr| create_listener(addr, config.backlog))
            .map_err(|source| ServerError::Bind {
                addr: address.clone(),
                source,
            })?;

        Ok(Self {
            queue: Arc::new(ConnectionQueue::new(config.queue_capacity)),
            router: Arc::new(router),
            metrics: MetricsCollector::new(),
            listener,
            config,
        })
    }

    /// Dirección real en la que quedó escuchando (útil con puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Handle a los contadores del servidor
    pub fn metrics(&self) -> MetricsCollector {
        self.metrics.clone()
    }

    /// Handle a la cola de conexiones pendientes
    pub fn queue(&self) -> Arc<ConnectionQueue<TcpStream>> {
        Arc::clone(&self.queue)
    }

    /// Arranca el pool y entra al loop de accept
    ///
    /// Solo retorna si no se pudo crear el pool; el loop no termina nunca.
    pub fn run(self) -> Result<(), ServerError> {
        let pool = WorkerPool::spawn(
            self.config.workers,
            Arc::clone(&self.queue),
            Arc::clone(&self.router),
            self.metrics.clone(),
            self.config.recv_buffer,
        )?;

        let addr = self
            .local_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| self.config.address());

        info!(
            addr = %addr,
            workers = pool.size(),
            queue_capacity = self.config.queue_capacity,
            cache_bytes = self.router.cache().len(),
            "Accepting connections"
        );

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => self.dispatch(stream),
                Err(e) => {
                    self.metrics.record_accept_failure();
                    warn!(error = %e, "Failed to accept connection");
                }
            }
        }

        Ok(())
    }

    /// Entrega una conexión recién aceptada a la cola
    fn dispatch(&self, stream: TcpStream) {
        self.metrics.record_accepted();

        if self.config.nodelay {
            if let Err(e) = stream.set_nodelay(true) {
                debug!(error = %e, "Failed to set TCP_NODELAY");
            }
        }

        if let Err(rejected) = self.queue.enqueue(stream) {
            let shed = self.metrics.record_shed();
            let peer = rejected
                .peer_addr()
                .map(|addr| addr.to_string())
                .unwrap_or_else(|_| "unknown".to_string());
            warn!(
                peer = %peer,
                queue_capacity = self.config.queue_capacity,
                total_shed = shed,
                "Queue full, dropping connection"
            );
            // Cerrar la conexión rechazada
            drop(rejected);
        }
    }
}

fn resolve(address: &str) -> io::Result<SocketAddr> {
    address.to_socket_addrs()?.next().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("address {} did not resolve", address),
        )
    })
}

/// Crea el socket de escucha con SO_REUSEADDR y el backlog pedido
fn create_listener(addr: SocketAddr, backlog: i32) -> io::Result<TcpListener> {
    let socket = socket2::Socket::new(
        match addr {
            SocketAddr::V4(_) => socket2::Domain::IPV4,
            SocketAddr::V6(_) => socket2::Domain::IPV6,
        },
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.bind(&addr.into())?;
    socket.listen(backlog)?;

    Ok(socket.into())
}
