//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! 1. `tcp`: escucha en un puerto y acepta conexiones (acceptor)
//! 2. `queue`: cola acotada entre el acceptor y los workers
//! 3. `worker`: pool fijo de threads que consumen la cola
//! 4. `connection`: lectura, parsing, routing y envío de una conexión

pub mod connection;
pub mod queue;
pub mod tcp;
pub mod worker;

// Re-exportar para facilitar el uso
pub use connection::{serve_connection, ConnectionOutcome};
pub use queue::ConnectionQueue;
pub use tcp::Server;
pub use worker::WorkerPool;
