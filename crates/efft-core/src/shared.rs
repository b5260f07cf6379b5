//! Thread-Safe Engine Handle
//!
//! [`SharedEventFft`] lets one or more producer threads feed stimuli while
//! consumer threads read the spectrum. Updates are serialized by a mutex
//! around the engine. After every update that changes the spectrum, a fresh
//! copy is published behind an `RwLock<Arc<Spectrum>>`, so
//! [`snapshot`](SharedEventFft::snapshot) always returns the state between two
//! complete updates and never waits for an update in progress.
//!
//! ```text
//!   producers ──update──▶ Mutex<EventFft> ──publish──▶ RwLock<Arc<Spectrum>>
//!                                                          │
//!   consumers ◀──────────────── snapshot() (Arc clone) ◀───┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use crate::engine::{EventFft, UpdateInput};
use crate::frame_size::FrameSize;
use crate::observe::EngineMetrics;
use crate::spectrum::Spectrum;
use crate::types::EfftResult;

struct Inner {
    size: FrameSize,
    engine: Mutex<EventFft>,
    published: RwLock<Arc<Spectrum>>,
    metrics: Arc<EngineMetrics>,
}

/// Cloneable handle to an engine shared between threads
#[derive(Clone)]
pub struct SharedEventFft {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SharedEventFft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedEventFft")
            .field("size", &self.inner.size)
            .finish()
    }
}

impl SharedEventFft {
    pub fn new(engine: EventFft) -> Self {
        let published = RwLock::new(Arc::new(engine.get_fft()));
        Self {
            inner: Arc::new(Inner {
                size: engine.frame_size(),
                metrics: Arc::clone(engine.metrics()),
                engine: Mutex::new(engine),
                published,
            }),
        }
    }

    pub fn framesize(&self) -> usize {
        self.inner.size.value()
    }

    // Poisoned locks are recovered: a snapshot is only published after an
    // update has completed.
    fn engine(&self) -> MutexGuard<'_, EventFft> {
        self.inner.engine.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, engine: &EventFft) {
        let spectrum = Arc::new(engine.get_fft());
        *self
            .inner
            .published
            .write()
            .unwrap_or_else(PoisonError::into_inner) = spectrum;
    }

    /// Reset to an empty frame and publish the zero spectrum
    pub fn initialize(&self) {
        let mut engine = self.engine();
        engine.initialize();
        self.publish(&engine);
    }

    /// Apply one stimulus or a batch; see [`EventFft::update`]
    pub fn update<I: UpdateInput + ?Sized>(&self, input: &I) -> EfftResult<bool> {
        let mut engine = self.engine();
        let changed = engine.update(input)?;
        if changed {
            self.publish(&engine);
        }
        Ok(changed)
    }

    /// Latest fully applied spectrum
    pub fn snapshot(&self) -> Arc<Spectrum> {
        Arc::clone(
            &self
                .inner
                .published
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Run `f` with exclusive access to the engine
    pub fn with_engine<R>(&self, f: impl FnOnce(&EventFft) -> R) -> R {
        f(&self.engine())
    }

    pub fn metrics(&self) -> &Arc<EngineMetrics> {
        &self.inner.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stimulus::Stimulus;
    use std::thread;

    #[test]
    fn test_snapshot_follows_updates() {
        let shared = SharedEventFft::new(EventFft::new(8).unwrap());
        assert!(shared.snapshot().is_zero());

        assert!(shared.update(&Stimulus::at(2, 3)).unwrap());
        let snap = shared.snapshot();
        assert!((snap[(0, 0)].re - 1.0).abs() < 1e-12);

        assert!(!shared.update(&Stimulus::at(2, 3)).unwrap());
        assert!(Arc::ptr_eq(&snap, &shared.snapshot()));

        shared.initialize();
        assert!(shared.snapshot().is_zero());
        assert_eq!(shared.with_engine(|e| e.grid().active_count()), 0);
    }

    #[test]
    fn test_errors_do_not_publish() {
        let shared = SharedEventFft::new(EventFft::new(4).unwrap());
        let before = shared.snapshot();
        assert!(shared.update(&vec![Stimulus::at(0, 0), Stimulus::at(4, 4)]).is_err());
        assert!(Arc::ptr_eq(&before, &shared.snapshot()));
    }

    #[test]
    fn test_readers_never_see_partial_updates() {
        // Cell (0, 0) transforms to all ones, so every published spectrum must
        // be uniformly 0 or uniformly 1.
        let shared = SharedEventFft::new(EventFft::new(64).unwrap());

        let writer = {
            let shared = shared.clone();
            thread::spawn(move || {
                let mut s = Stimulus::at(0, 0);
                for _ in 0..200 {
                    shared.update(&s).unwrap();
                    s.toggle();
                }
            })
        };

        let readers: Vec<_> = (0..3)
            .map(|_| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for _ in 0..200 {
                        let snap = shared.snapshot();
                        let first = snap[(0, 0)];
                        assert!(snap.as_slice().iter().all(|c| (c - first).norm() < 1e-9));
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(shared.metrics().snapshot().cells_changed, 200);
    }
}
