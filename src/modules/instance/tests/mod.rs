//! Lifecycle tests for [`ModuleInstance`].
//!
//! All tests run on a paused tokio clock, so scripted fetch delays and poll
//! intervals elapse deterministically.

mod mount;

use crate::client::testing::StubSource;
use crate::modules::instance::ModuleInstance;
use crate::modules::surface::{SharedSurface, SurfacePhase};
use crate::modules::Module;
use crate::{ModuleDescriptor, ModuleSize};
use std::sync::Arc;

/// Endpoint every test module fetches.
pub(crate) const TEST_ENDPOINT: &str = "/api/test";

pub(crate) fn descriptor(id: &str, refresh_interval_ms: u64) -> ModuleDescriptor {
    ModuleDescriptor {
        id: id.to_string(),
        name: "Test".to_string(),
        icon: "t".to_string(),
        color: "#123456".to_string(),
        endpoint: TEST_ENDPOINT.to_string(),
        description: "test module".to_string(),
        size: ModuleSize::Medium,
        refresh_interval_ms,
    }
}

/// Minimal module relying entirely on the default hooks.
pub(crate) struct TestModule {
    descriptor: ModuleDescriptor,
}

impl Module for TestModule {
    fn descriptor(&self) -> ModuleDescriptor {
        self.descriptor.clone()
    }
}

/// Builds an instance over a scripted source.
///
/// `id` doubles as the style-registry key, so each test uses a unique one.
pub(crate) fn instance_with(
    source: StubSource,
    id: &str,
    refresh_interval_ms: u64,
) -> ModuleInstance {
    let module = TestModule {
        descriptor: descriptor(id, refresh_interval_ms),
    };
    ModuleInstance::new(Box::new(module), Arc::new(source))
}

/// Lets spawned tasks run to their next await point.
pub(crate) async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

pub(crate) fn surface_text(surface: &SharedSurface) -> String {
    surface.lock().expect("surface lock poisoned").text()
}

pub(crate) fn surface_phase(surface: &SharedSurface) -> SurfacePhase {
    surface.lock().expect("surface lock poisoned").phase()
}
