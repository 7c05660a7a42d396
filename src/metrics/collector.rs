//! # Collector de Métricas
//! src/metrics/collector.rs
//!
//! Contadores compartidos entre el acceptor y los workers. Son atómicos para
//! no agregar un segundo lock en el camino de cada conexión; solo informan,
//! nunca deciden nada.

use crate::http::StatusCode;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Collector de métricas thread-safe
#[derive(Debug, Clone, Default)]
pub struct MetricsCollector {
    inner: Arc<Counters>,
}

#[derive(Debug, Default)]
struct Counters {
    accepted: AtomicU64,
    shed: AtomicU64,
    accept_failures: AtomicU64,
    picked_up: AtomicU64,
    served_ok: AtomicU64,
    not_found: AtomicU64,
    bad_request: AtomicU64,
    empty_reads: AtomicU64,
    receive_failures: AtomicU64,
    send_failures: AtomicU64,
}

/// Copia de los contadores en un instante dado
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Conexiones que devolvió accept()
    pub accepted: u64,
    /// Conexiones cerradas porque la cola estaba llena
    pub shed: u64,
    pub accept_failures: u64,
    /// Conexiones que algún worker sacó de la cola
    pub picked_up: u64,
    pub served_ok: u64,
    pub not_found: u64,
    pub bad_request: u64,
    /// Peer cerró sin mandar nada
    pub empty_reads: u64,
    pub receive_failures: u64,
    pub send_failures: u64,
}

impl MetricsSnapshot {
    /// Conexiones que ya terminaron en un worker, con o sin éxito
    pub fn finished(&self) -> u64 {
        self.served_ok
            + self.not_found
            + self.bad_request
            + self.empty_reads
            + self.receive_failures
            + self.send_failures
    }

    /// Conexiones encoladas o siendo atendidas en este momento
    pub fn in_flight(&self) -> u64 {
        self.accepted
            .saturating_sub(self.shed)
            .saturating_sub(self.finished())
    }
}

impl MetricsCollector {
    /// Crea un nuevo collector de métricas
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_accepted(&self) {
        self.inner.accepted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_shed(&self) -> u64 {
        self.inner.shed.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn record_accept_failure(&self) {
        self.inner.accept_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_picked_up(&self) {
        self.inner.picked_up.fetch_add(1, Ordering::Relaxed);
    }

    /// Registra la respuesta que se llegó a enviar
    pub fn record_response(&self, status: StatusCode) {
        let counter = match status {
            StatusCode::Ok => &self.inner.served_ok,
            StatusCode::NotFound => &self.inner.not_found,
            StatusCode::BadRequest => &self.inner.bad_request,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_empty_read(&self) {
        self.inner.empty_reads.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_receive_failure(&self) {
        self.inner.receive_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_send_failure(&self) {
        self.inner.send_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Obtiene las métricas actuales
    pub fn snapshot(&self) -> MetricsSnapshot {
        let c = &self.inner;
        MetricsSnapshot {
            accepted: c.accepted.load(Ordering::Relaxed),
            shed: c.shed.load(Ordering::Relaxed),
            accept_failures: c.accept_failures.load(Ordering::Relaxed),
            picked_up: c.picked_up.load(Ordering::Relaxed),
            served_ok: c.served_ok.load(Ordering::Relaxed),
            not_found: c.not_found.load(Ordering::Relaxed),
            bad_request: c.bad_request.load(Ordering::Relaxed),
            empty_reads: c.empty_reads.load(Ordering::Relaxed),
            receive_failures: c.receive_failures.load(Ordering::Relaxed),
            send_failures: c.send_failures.load(Ordering::Relaxed),
        }
    }
}
