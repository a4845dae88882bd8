//! Lifecycle controller for module instances.
//!
//! A [`ModuleInstance`] wraps one [`Module`] value and drives the sequence
//! mount → load → render → (poll loop) → unmount on its behalf. Instances
//! are created once at application start (normally by the registry) and
//! survive unmount for later remounts.
//!
//! # Concurrency
//!
//! All I/O is asynchronous; loads are not serialized against each other. If
//! a user-triggered refresh overlaps a timer-triggered one, whichever
//! response arrives last determines the rendered state (last-response-wins).
//! Renders are guarded by a mount epoch: once `unmount` runs, in-flight
//! loads may still complete and store data, but they can no longer touch the
//! detached surface.

use crate::client::{DataSource, FetchError};
use crate::modules::{self, styles, Module, SharedSurface, SurfacePhase};
use crate::ModuleDescriptor;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Mount bracket state: the lent surface and the epoch it belongs to.
///
/// The epoch increments on every mount and unmount, so an async continuation
/// holding an old epoch can detect that its bracket has ended.
#[derive(Default)]
struct MountState {
    surface: Option<SharedSurface>,
    epoch: u64,
}

struct Inner {
    /// Descriptor copied from the module at construction.
    descriptor: ModuleDescriptor,
    /// The module's hooks; locked only for synchronous hook calls.
    module: Mutex<Box<dyn Module>>,
    /// Last successfully fetched payload; survives unmount.
    data: Mutex<Option<Value>>,
    /// Message of the last failed load, cleared by the next success.
    last_error: Mutex<Option<String>>,
    mount: Mutex<MountState>,
    /// Poll task handle. Invariant: `Some` only while mounted.
    poll: Mutex<Option<JoinHandle<()>>>,
    source: Arc<dyn DataSource>,
}

/// Cheaply cloneable handle to one live module instance.
///
/// Clones share the same underlying state; the registry hands out clones on
/// every lookup, so identity is stable across lookups
/// (see [`ModuleInstance::same_instance`]).
#[derive(Clone)]
pub struct ModuleInstance {
    inner: Arc<Inner>,
}

impl ModuleInstance {
    /// Creates an instance for `module`, fetching through `source`.
    pub fn new(module: Box<dyn Module>, source: Arc<dyn DataSource>) -> Self {
        let descriptor = module.descriptor();
        Self {
            inner: Arc::new(Inner {
                descriptor,
                module: Mutex::new(module),
                data: Mutex::new(None),
                last_error: Mutex::new(None),
                mount: Mutex::new(MountState::default()),
                poll: Mutex::new(None),
                source,
            }),
        }
    }

    /// Descriptor this instance was constructed with.
    pub fn descriptor(&self) -> &ModuleDescriptor {
        &self.inner.descriptor
    }

    /// Last successfully fetched payload, if any.
    pub fn data(&self) -> Option<Value> {
        self.inner.data.lock().expect("data lock poisoned").clone()
    }

    /// Whether a surface is currently lent to this instance.
    pub fn is_mounted(&self) -> bool {
        self.inner
            .mount
            .lock()
            .expect("mount lock poisoned")
            .surface
            .is_some()
    }

    /// Whether the poll task is currently running.
    pub fn is_polling(&self) -> bool {
        self.inner
            .poll
            .lock()
            .expect("poll lock poisoned")
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Whether `other` is a handle to this same instance.
    pub fn same_instance(&self, other: &ModuleInstance) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Mounts the instance onto `surface`.
    ///
    /// In order: attaches the module's style (once per id, process-wide),
    /// performs the initial load, renders, and, when the descriptor's
    /// refresh interval is positive, starts the poll loop. Returns once the
    /// initial render has completed; a failed load still completes the mount
    /// and renders the inline error state instead.
    ///
    /// Mounting an already-mounted instance unmounts it first, so the
    /// previous surface is never left with a live poll task.
    pub async fn mount(&self, surface: SharedSurface) {
        self.unmount();

        styles::attach(&self.inner.descriptor);

        let epoch = {
            let mut mount = self.inner.mount.lock().expect("mount lock poisoned");
            mount.epoch += 1;
            mount.surface = Some(surface);
            mount.epoch
        };

        self.load_and_render(epoch).await;

        let period = Duration::from_millis(self.inner.descriptor.refresh_interval_ms);
        if !period.is_zero() {
            // Start the poll loop only if this mount bracket is still the
            // current one; an unmount during the initial load wins.
            let mount = self.inner.mount.lock().expect("mount lock poisoned");
            if mount.epoch == epoch && mount.surface.is_some() {
                let instance = self.clone();
                let handle =
                    tokio::spawn(async move { instance.poll_loop(epoch, period).await });
                *self.inner.poll.lock().expect("poll lock poisoned") = Some(handle);
            }
        }
    }

    /// Unmounts the instance: cancels the poll task, clears the surface, and
    /// releases the surface handle.
    ///
    /// Idempotent: a second call, or a call on a never-mounted instance, is
    /// a no-op.
    pub fn unmount(&self) {
        let mut mount = self.inner.mount.lock().expect("mount lock poisoned");
        if let Some(handle) = self.inner.poll.lock().expect("poll lock poisoned").take() {
            handle.abort();
        }
        mount.epoch += 1;
        if let Some(surface) = mount.surface.take() {
            surface.lock().expect("surface lock poisoned").clear();
        }
    }

    /// Issues one fetch of the descriptor's endpoint and stores the payload.
    ///
    /// On failure the previous payload is kept and the error is recorded for
    /// the next render; the `on_data_error` hook fires. May be invoked
    /// concurrently with itself; loads are not serialized (last response
    /// wins).
    pub async fn load(&self) -> Result<(), FetchError> {
        let result = self
            .inner
            .source
            .fetch_json(&self.inner.descriptor.endpoint)
            .await;
        match result {
            Ok(value) => {
                *self.inner.data.lock().expect("data lock poisoned") = Some(value.clone());
                *self
                    .inner
                    .last_error
                    .lock()
                    .expect("error lock poisoned") = None;
                self.inner
                    .module
                    .lock()
                    .expect("module lock poisoned")
                    .on_data_loaded(&value);
                Ok(())
            }
            Err(error) => {
                *self
                    .inner
                    .last_error
                    .lock()
                    .expect("error lock poisoned") = Some(error.to_string());
                self.inner
                    .module
                    .lock()
                    .expect("module lock poisoned")
                    .on_data_error(&error);
                Err(error)
            }
        }
    }

    /// Rebuilds the surface content from the current state.
    ///
    /// With no completed load the surface shows the neutral loading state;
    /// after a failed load it shows the inline error state; otherwise the
    /// module's template runs, followed by its `after_render` hook. Never
    /// fails; a no-op when the instance is not mounted.
    pub fn render(&self) {
        let epoch = self
            .inner
            .mount
            .lock()
            .expect("mount lock poisoned")
            .epoch;
        self.apply_render(epoch);
    }

    /// Re-runs load then render.
    ///
    /// Safe to call while a previous refresh is still in flight; see the
    /// module-level notes on last-response-wins ordering.
    pub async fn refresh(&self) {
        let epoch = self
            .inner
            .mount
            .lock()
            .expect("mount lock poisoned")
            .epoch;
        self.load_and_render(epoch).await;
    }

    async fn load_and_render(&self, epoch: u64) {
        if let Err(error) = self.load().await {
            tracing::warn!(
                module = %self.inner.descriptor.id,
                "load failed: {}",
                error
            );
        }
        self.apply_render(epoch);
    }

    /// Applies a render for the given mount epoch.
    ///
    /// The epoch check is the stale-mount guard: a continuation from before
    /// an unmount (or from a previous mount bracket) finds a different epoch
    /// and leaves the surface alone.
    fn apply_render(&self, epoch: u64) {
        let mount = self.inner.mount.lock().expect("mount lock poisoned");
        if mount.epoch != epoch {
            return;
        }
        let Some(surface) = mount.surface.as_ref() else {
            return;
        };

        let data = self.inner.data.lock().expect("data lock poisoned").clone();
        let error = self
            .inner
            .last_error
            .lock()
            .expect("error lock poisoned")
            .clone();
        let mut module = self.inner.module.lock().expect("module lock poisoned");
        let mut surface = surface.lock().expect("surface lock poisoned");

        surface.clear();
        match (error, data) {
            (Some(message), _) => {
                surface.set_content(SurfacePhase::Error, module.error_template(&message));
            }
            (None, Some(value)) => {
                surface.set_content(SurfacePhase::Ready, module.template(&value));
                module.after_render(&mut surface);
            }
            (None, None) => {
                surface.set_content(SurfacePhase::Loading, modules::loading_lines());
            }
        }
    }

    /// Fixed-period poll loop; runs until aborted by `unmount`.
    ///
    /// The interval fires on the period regardless of how long each refresh
    /// takes; within this task refreshes are serialized, so a slow endpoint
    /// produces back-to-back ticks rather than overlapping ones.
    async fn poll_loop(self, epoch: u64, period: Duration) {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately; the initial load already
        // rendered, so consume it.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            if !self.mounted_at(epoch) {
                break;
            }
            self.load_and_render(epoch).await;
        }
    }

    fn mounted_at(&self, epoch: u64) -> bool {
        let mount = self.inner.mount.lock().expect("mount lock poisoned");
        mount.epoch == epoch && mount.surface.is_some()
    }
}

impl std::fmt::Debug for ModuleInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleInstance")
            .field("id", &self.inner.descriptor.id)
            .field("mounted", &self.is_mounted())
            .field("polling", &self.is_polling())
            .finish()
    }
}

#[cfg(test)]
mod tests;
