use super::StorageBackend;
use crate::error::{DexError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since mortydex is single-threaded,
/// which lets the trait take `&self` everywhere.
#[derive(Default)]
pub struct MemBackend {
    values: RefCell<HashMap<String, String>>,
    simulate_read_error: Cell<bool>,
    simulate_write_error: Cell<bool>,
    write_budget: Cell<Option<usize>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `read` fail with an IO error.
    pub fn set_simulate_read_error(&self, simulate: bool) {
        self.simulate_read_error.set(simulate);
    }

    /// Make every subsequent `write` fail with an IO error.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Let the next `writes` writes succeed, then fail every later one.
    /// `None` lifts the limit.
    pub fn set_write_budget(&self, writes: Option<usize>) {
        self.write_budget.set(writes);
    }

    /// Stored keys, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

fn simulated(op: &str) -> DexError {
    DexError::Io(std::io::Error::other(format!("simulated {} error", op)))
}

impl StorageBackend for MemBackend {
    fn read(&self, key: &str) -> Result<Option<String>> {
        if self.simulate_read_error.get() {
            return Err(simulated("read"));
        }
        Ok(self.values.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(simulated("write"));
        }
        match self.write_budget.get() {
            Some(0) => return Err(simulated("write")),
            Some(left) => self.write_budget.set(Some(left - 1)),
            None => {}
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(simulated("write"));
        }
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
