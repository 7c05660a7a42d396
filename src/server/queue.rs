//! # Cola Acotada de Conexiones
//! src/server/queue.rs
//!
//! Ring buffer de capacidad fija protegido por un `Mutex` y un `Condvar`.
//! El acceptor es el único productor; los workers son los consumidores.
//!
//! - `enqueue` nunca bloquea esperando espacio: si la cola está llena
//!   devuelve la conexión al llamador para que la cierre (descarte de carga).
//! - `dequeue_blocking` duerme mientras la cola esté vacía y re-chequea la
//!   condición al despertar (spurious wakeups, o que otro worker se haya
//!   llevado el elemento primero).
//!
//! La conexión se mueve por valor: cuando sale de la cola solo el worker que
//! la desencoló la tiene, así que nunca dos threads ven el mismo socket.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

/// Estado interno del ring buffer
///
/// Invariantes: `count <= slots.len()`, `head < slots.len()`,
/// `tail < slots.len()`, y los slots ocupados son exactamente los `count`
/// que van desde `head` (con wrap).
struct Ring<T> {
    slots: Box<[Option<T>]>,
    head: usize,
    tail: usize,
    count: usize,
}

impl<T> Ring<T> {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: (0..capacity).map(|_| None).collect(),
            head: 0,
            tail: 0,
            count: 0,
        }
    }

    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn push_back(&mut self, handle: T) -> Result<(), T> {
        if self.count == self.capacity() {
            return Err(handle);
        }

        self.slots[self.tail] = Some(handle);
        self.tail = (self.tail + 1) % self.capacity();
        self.count += 1;
        Ok(())
    }

    fn pop_front(&mut self) -> Option<T> {
        if self.count == 0 {
            return None;
        }

        let handle = self.slots[self.head].take();
        self.head = (self.head + 1) % self.capacity();
        self.count -= 1;
        handle
    }
}

/// Cola FIFO acotada y thread-safe de conexiones pendientes
pub struct ConnectionQueue<T> {
    ring: Mutex<Ring<T>>,
    /// Se señala una vez por cada elemento encolado
    available: Condvar,
}

impl<T> ConnectionQueue<T> {
    /// Crea una cola con capacidad fija
    ///
    /// # Panics
    ///
    /// Si `capacity` es 0. La configuración lo valida antes.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be >= 1");
        Self {
            ring: Mutex::new(Ring::with_capacity(capacity)),
            available: Condvar::new(),
        }
    }

    // Un panic con el lock tomado no puede dejar el ring a medio actualizar:
    // ninguna operación entre lock y unlock puede entrar en pánico.
    fn lock(&self) -> MutexGuard<'_, Ring<T>> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Encola una conexión
    ///
    /// Retorna `Err(handle)` si la cola está llena; el llamador es dueño de
    /// la conexión rechazada y debe cerrarla.
    ///
    /// # Ejemplo
    /// ```
    /// use pooled_http_server::server::ConnectionQueue;
    ///
    /// let queue = ConnectionQueue::new(1);
    /// assert!(queue.enqueue("a").is_ok());
    /// assert_eq!(queue.enqueue("b"), Err("b"));
    /// ```
    pub fn enqueue(&self, handle: T) -> Result<(), T> {
        let mut ring = self.lock();
        ring.push_back(handle)?;

        // Llegó un solo elemento: despertar a un solo worker
        self.available.notify_one();
        Ok(())
    }

    /// Desencola la conexión más antigua, bloqueando mientras no haya ninguna
    pub fn dequeue_blocking(&self) -> T {
        let mut ring = self.lock();

        loop {
            if let Some(handle) = ring.pop_front() {
                return handle;
            }

            // Esperar a que haya conexiones
            ring = self
                .available
                .wait(ring)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Intenta desencolar sin bloquear
    pub fn try_dequeue(&self) -> Option<T> {
        self.lock().pop_front()
    }

    /// Retorna el número de conexiones pendientes
    pub fn len(&self) -> usize {
        self.lock().count
    }

    /// Verifica si la cola está vacía
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Verifica si la cola está llena
    pub fn is_full(&self) -> bool {
        let ring = self.lock();
        ring.count == ring.capacity()
    }

    /// Retorna la capacidad máxima
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }
}
