//! Shared register access for multiple callers.
//!
//! A single `RegisterAccess` is not safe against two callers interleaving their
//! read-modify-write sequences on the same bus word. `SharedRegisterAccess` holds the
//! layer behind a mutex and keeps the lock for the whole sequence, so a second caller's
//! read can never land between another caller's read and write.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::common::error::Result;
use crate::soc::traits::RawTransport;

use super::access::RegisterAccess;
use super::descriptor::RegisterDescriptor;

/// Cloneable handle serializing register accesses from several owners.
#[derive(Debug)]
pub struct SharedRegisterAccess<T> {
    inner: Arc<Mutex<RegisterAccess<T>>>,
}

impl<T> Clone for SharedRegisterAccess<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: RawTransport> SharedRegisterAccess<T> {
    /// Wraps an access layer for sharing.
    pub fn new(access: RegisterAccess<T>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(access)),
        }
    }

    /// Reads a register under the lock.
    ///
    /// # Errors
    ///
    /// As [`RegisterAccess::read`].
    pub fn read(&self, reg: &RegisterDescriptor) -> Result<u32> {
        self.lock().read(reg)
    }

    /// Writes a register under the lock.
    ///
    /// # Errors
    ///
    /// As [`RegisterAccess::write`].
    pub fn write(&self, reg: &RegisterDescriptor, value: u32) -> Result<()> {
        self.lock().write(reg, value)
    }

    /// Writes the truncated value of a register under the lock.
    ///
    /// # Errors
    ///
    /// As [`RegisterAccess::write_masked`].
    pub fn write_masked(&self, reg: &RegisterDescriptor, value: u32) -> Result<()> {
        self.lock().write_masked(reg, value)
    }

    /// Runs a single read-modify-write under the lock.
    ///
    /// # Errors
    ///
    /// As [`RegisterAccess::modify`].
    pub fn modify<F>(&self, reg: &RegisterDescriptor, update: F) -> Result<u32>
    where
        F: FnOnce(u32) -> Result<u32>,
    {
        self.lock().modify(reg, update)
    }

    /// Runs a multi-access sequence without letting other owners in between.
    pub fn with<R>(&self, f: impl FnOnce(&mut RegisterAccess<T>) -> R) -> R {
        f(&mut self.lock())
    }

    /// Acquires the layer, recovering the guard if another owner panicked.
    fn lock(&self) -> MutexGuard<'_, RegisterAccess<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
