//! Shareable handle to a headless Bevy `App` for rspec environments.

use bevy::prelude::App;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// `App` behind a mutex so rspec can clone the environment between examples.
#[derive(Debug, Clone)]
pub struct SharedApp(Arc<Mutex<LockedApp>>);

#[derive(Debug)]
pub struct LockedApp(pub App);

// SAFETY: suites run through `run_serial`, so the app only ever lives on the
// test thread, and every access goes through the mutex.
unsafe impl Send for LockedApp {}
unsafe impl Sync for LockedApp {}

impl SharedApp {
    pub fn new(app: App) -> Self {
        Self(Arc::new(Mutex::new(LockedApp(app))))
    }

    /// Locks the app, recovering from a poisoned mutex left by a failed
    /// example.
    pub fn lock(&self) -> MutexGuard<'_, LockedApp> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn update(&self) {
        self.lock().0.update();
    }
}
