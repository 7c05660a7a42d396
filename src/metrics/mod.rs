//! # Sistema de Métricas
//! src/metrics/mod.rs
//!
//! Contadores de conexiones aceptadas, descartadas y atendidas.

pub mod collector;

pub use collector::{MetricsCollector, MetricsSnapshot};
