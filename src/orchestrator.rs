//! Dashboard orchestrator: selection state machine and render passes.
//!
//! The orchestrator owns the Active Filter (either no selection or exactly
//! one module id) and the single mount slot the dashboard displays. Each
//! render pass fetches the current descriptor listing, tears down whatever
//! was previously mounted, and mounts the selected module: through its
//! registered instance when one exists, through the generic fallback
//! renderer otherwise.
//!
//! State is held behind locks so the TUI shell can run passes on spawned
//! tasks while the draw loop reads a consistent snapshot; passes themselves
//! are serialized.

use crate::client::{self, DataSource};
use crate::modules::surface::Surface;
use crate::modules::{generic, ModuleInstance, SharedSurface};
use crate::registry::ModuleRegistry;
use crate::ModuleDescriptor;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Delay step between consecutive card mounts in one pass.
///
/// Cosmetic: spreads the initial fetch burst when a pass mounts more than
/// one card. Correctness never depends on it.
pub const MOUNT_STAGGER_STEP: Duration = Duration::from_millis(100);

/// The single mounted card the dashboard currently displays.
#[derive(Debug, Clone)]
pub struct MountedCard {
    /// Server descriptor the card was mounted from.
    pub descriptor: ModuleDescriptor,
    /// Surface the card renders into; owned here, lent to the instance.
    pub surface: SharedSurface,
    /// Registered instance, or `None` when the generic fallback rendered.
    pub instance: Option<ModuleInstance>,
}

/// What the dashboard layout region shows.
#[derive(Debug, Clone, Default)]
pub enum DashboardView {
    /// No module selected; a placeholder prompt is shown.
    #[default]
    Unselected,
    /// The descriptor listing could not be fetched or decoded.
    InitError {
        /// Human-readable failure description.
        message: String,
    },
    /// A module card is mounted.
    Mounted(MountedCard),
}

/// Outcome of a user-triggered refresh, for shell feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The mounted instance re-ran its load/render cycle.
    Module(String),
    /// No refreshable instance; a full render pass ran instead.
    Reloaded,
}

/// Orchestrates descriptor fetching, filtering, and mount/unmount cycles.
pub struct Orchestrator {
    source: Arc<dyn DataSource>,
    registry: Arc<ModuleRegistry>,
    modules_path: String,
    filter: Mutex<Option<String>>,
    listing: Mutex<Vec<ModuleDescriptor>>,
    view: Mutex<DashboardView>,
    /// Serializes render passes; selection churn queues instead of racing.
    pass: tokio::sync::Mutex<()>,
}

impl Orchestrator {
    /// Creates an orchestrator fetching the listing from `modules_path`.
    pub fn new(
        source: Arc<dyn DataSource>,
        registry: Arc<ModuleRegistry>,
        modules_path: impl Into<String>,
    ) -> Self {
        Self {
            source,
            registry,
            modules_path: modules_path.into(),
            filter: Mutex::new(None),
            listing: Mutex::new(Vec::new()),
            view: Mutex::new(DashboardView::Unselected),
            pass: tokio::sync::Mutex::new(()),
        }
    }

    /// Last successfully fetched descriptor listing.
    pub fn listing(&self) -> Vec<ModuleDescriptor> {
        self.listing
            .lock()
            .expect("listing lock poisoned")
            .clone()
    }

    /// Current Active Filter selection.
    pub fn selected(&self) -> Option<String> {
        self.filter.lock().expect("filter lock poisoned").clone()
    }

    /// Snapshot of the current dashboard view.
    pub fn view(&self) -> DashboardView {
        self.view.lock().expect("view lock poisoned").clone()
    }

    /// Sets the Active Filter and runs a render pass.
    ///
    /// Selecting a new id, or re-selecting the current one, tears down the
    /// previously mounted module and remounts from fresh server data.
    pub async fn select(&self, id: Option<String>) {
        *self.filter.lock().expect("filter lock poisoned") = id;
        self.render_pass().await;
    }

    /// Fetches the listing and reconciles the mount slot with the filter.
    ///
    /// On a listing error the previous card is unmounted and an inline
    /// initialization error is shown; no partial listing is rendered.
    pub async fn render_pass(&self) {
        let _guard = self.pass.lock().await;

        let listing = match client::fetch_listing(self.source.as_ref(), &self.modules_path).await
        {
            Ok(listing) => {
                *self.listing.lock().expect("listing lock poisoned") = listing.clone();
                listing
            }
            Err(error) => {
                tracing::warn!("module listing failed: {}", error);
                self.teardown();
                *self.view.lock().expect("view lock poisoned") = DashboardView::InitError {
                    message: format!("Could not initialize dashboard: {error}"),
                };
                return;
            }
        };

        self.teardown();

        let Some(id) = self.selected() else {
            return;
        };
        let cards: Vec<ModuleDescriptor> =
            listing.into_iter().filter(|d| d.id == id).collect();
        if cards.is_empty() {
            tracing::debug!(module = %id, "selected id not in server listing");
            return;
        }
        self.mount_cards(&cards).await;
    }

    /// Re-runs the mounted instance's load/render cycle, or falls back to a
    /// full render pass when the card has no instance.
    pub async fn refresh_selected(&self) -> RefreshOutcome {
        let instance = match &*self.view.lock().expect("view lock poisoned") {
            DashboardView::Mounted(card) => card.instance.clone(),
            _ => None,
        };
        match instance {
            Some(instance) => {
                instance.refresh().await;
                RefreshOutcome::Module(instance.descriptor().id.clone())
            }
            None => {
                self.render_pass().await;
                RefreshOutcome::Reloaded
            }
        }
    }

    /// Tears everything down and re-runs the render pass from fresh server
    /// data: the "refresh all" action.
    pub async fn reload(&self) {
        self.render_pass().await;
    }

    /// Unmounts the previously mounted card, if any.
    fn teardown(&self) {
        let mut view = self.view.lock().expect("view lock poisoned");
        if let DashboardView::Mounted(card) = &*view {
            match &card.instance {
                Some(instance) => instance.unmount(),
                None => card
                    .surface
                    .lock()
                    .expect("surface lock poisoned")
                    .clear(),
            }
        }
        *view = DashboardView::Unselected;
    }

    /// Mounts each card in order, staggering all but the first.
    async fn mount_cards(&self, cards: &[ModuleDescriptor]) {
        for (index, descriptor) in cards.iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(MOUNT_STAGGER_STEP * index as u32).await;
            }
            let surface = Surface::shared();
            let instance = self.registry.lookup(&descriptor.id);

            // Publish the card before the initial load so the shell can draw
            // the loading state while the mount completes.
            *self.view.lock().expect("view lock poisoned") =
                DashboardView::Mounted(MountedCard {
                    descriptor: descriptor.clone(),
                    surface: surface.clone(),
                    instance: instance.clone(),
                });

            match instance {
                Some(instance) => instance.mount(surface).await,
                None => generic::render(self.source.as_ref(), descriptor, &surface).await,
            }
        }
    }
}
