//! Web API registration list
//!
//! A registration represents an async operation (timer or promise) that has
//! been initiated but whose callback has not yet been queued.  Registrations
//! are created when an async-initiating statement executes and removed when
//! the drain pass hands the callback to the callback queue.

/// The host facility backing a registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebApiKind {
    SetTimeout,
    SetInterval,
    Dom,
    Xhr,
    Other,
}

/// A timer or promise "in flight" outside the call stack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebApiRegistration {
    pub id: usize,
    pub name: String,
    pub kind: WebApiKind,
    pub time_remaining: Option<u64>,
    pub line_number: Option<usize>,
}

/// The list of live Web API registrations
#[derive(Debug, Clone, Default)]
pub struct WebApiList {
    registrations: Vec<WebApiRegistration>,
}

impl WebApiList {
    pub fn new() -> Self {
        WebApiList {
            registrations: Vec::new(),
        }
    }

    /// Register a new async operation
    pub fn register(&mut self, registration: WebApiRegistration) {
        self.registrations.push(registration);
    }

    /// Remove a registration by id when its callback is handed to the queue
    pub fn remove(&mut self, id: usize) -> Option<WebApiRegistration> {
        let pos = self.registrations.iter().position(|r| r.id == id)?;
        Some(self.registrations.remove(pos))
    }

    /// Get all live registrations
    pub fn registrations(&self) -> &[WebApiRegistration] {
        &self.registrations
    }

    /// Number of live registrations
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    /// Check if there are no live registrations
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}
