//! # Pool de Workers
//! src/server/worker.rs
//!
//! N threads creados una sola vez al arrancar. Cada uno repite para siempre:
//! esperar en la cola (Idle), atender una conexión (Active), cerrarla.
//! El pool no se redimensiona ni se detiene; el proceso terminando es el
//! único teardown.

use crate::error::ServerError;
use crate::metrics::MetricsCollector;
use crate::router::Router;
use crate::server::connection::{serve_connection, ConnectionOutcome};
use crate::server::queue::ConnectionQueue;
use std::io::{Read, Write};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::debug;

/// Pool fijo de threads consumidores de la cola
pub struct WorkerPool {
    /// Nunca se hace join; se guardan solo para saber cuántos hay
    handles: Vec<JoinHandle<()>>,
}

impl WorkerPool {
    /// Crea `size` workers que consumen `queue`
    ///
    /// Si el sistema no deja crear alguno de los threads el error es fatal.
    pub fn spawn<S>(
        size: usize,
        queue: Arc<ConnectionQueue<S>>,
        router: Arc<Router>,
        metrics: MetricsCollector,
        recv_buffer: usize,
    ) -> Result<Self, ServerError>
    where
        S: Read + Write + Send + 'static,
    {
        let mut handles = Vec::with_capacity(size);

        for id in 0..size {
            let queue = Arc::clone(&queue);
            let router = Arc::clone(&router);
            let metrics = metrics.clone();

            let handle = thread::Builder::new()
                .name(format!("worker-{}", id))
                .spawn(move || Self::worker_loop(id, &queue, &router, &metrics, recv_buffer))
                .map_err(ServerError::SpawnWorker)?;

            handles.push(handle);
        }

        Ok(Self { handles })
    }

    /// Número de workers en el pool
    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Loop principal del worker
    fn worker_loop<S: Read + Write>(
        id: usize,
        queue: &ConnectionQueue<S>,
        router: &Router,
        metrics: &MetricsCollector,
        recv_buffer: usize,
    ) {
        debug!(worker = id, "Worker started");
        let mut buffer = vec![0u8; recv_buffer];

        loop {
            let mut stream = queue.dequeue_blocking();
            metrics.record_picked_up();
            let outcome = serve_connection(&mut stream, router, &mut buffer);
            // Cerrar la conexión
            drop(stream);

            record(metrics, outcome);
            debug!(worker = id, ?outcome, "Connection closed");
        }
    }
}

fn record(metrics: &MetricsCollector, outcome: ConnectionOutcome) {
    match outcome {
        ConnectionOutcome::Responded(status) => metrics.record_response(status),
        ConnectionOutcome::PeerClosed => metrics.record_empty_read(),
        ConnectionOutcome::ReceiveFailed(_) => metrics.record_receive_failure(),
        ConnectionOutcome::SendFailed(..) => metrics.record_send_failure(),
    }
}
