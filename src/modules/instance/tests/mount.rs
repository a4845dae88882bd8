//! Mount behavior: initial load, render, error containment.

use super::*;
use crate::client::testing::{StubResponse, StubSource};
use crate::modules::styles;
use crate::modules::surface::{Surface, SurfacePhase};
use serde_json::json;
use std::time::Duration;

#[tokio::test(start_paused = true)]
async fn mount_renders_initial_payload() {
    let source = StubSource::new().route(TEST_ENDPOINT, json!({"v": 1}));
    let instance = instance_with(source, "inst-mount-initial", 0);
    let surface = Surface::shared();

    instance.mount(surface.clone()).await;

    assert!(instance.is_mounted());
    assert_eq!(surface_phase(&surface), SurfacePhase::Ready);
    assert!(surface_text(&surface).contains("\"v\": 1"));
    assert_eq!(instance.data(), Some(json!({"v": 1})));
}

#[tokio::test(start_paused = true)]
async fn mount_completes_when_load_fails() {
    let source = StubSource::new().route_status(TEST_ENDPOINT, 500);
    let instance = instance_with(source, "inst-mount-error", 0);
    let surface = Surface::shared();

    // Must resolve normally: load failure becomes an error render.
    instance.mount(surface.clone()).await;

    assert!(instance.is_mounted());
    assert_eq!(surface_phase(&surface), SurfacePhase::Error);
    assert!(surface_text(&surface).contains("500"));
    assert_eq!(instance.data(), None, "failed load must not store data");
}

#[tokio::test(start_paused = true)]
async fn error_state_is_distinguishable_from_loading_and_ready() {
    let source = StubSource::new().route_seq(
        TEST_ENDPOINT,
        vec![StubResponse::status(500), StubResponse::json(json!({"v": 2}))],
    );
    let instance = instance_with(source, "inst-mount-phases", 0);
    let surface = Surface::shared();

    assert_eq!(surface_phase(&surface), SurfacePhase::Loading);

    instance.mount(surface.clone()).await;
    assert_eq!(surface_phase(&surface), SurfacePhase::Error);

    instance.refresh().await;
    assert_eq!(surface_phase(&surface), SurfacePhase::Ready);
    assert!(surface_text(&surface).contains("\"v\": 2"));
}

#[tokio::test(start_paused = true)]
async fn surface_shows_loading_until_first_load_completes() {
    let source = StubSource::new().route_seq(
        TEST_ENDPOINT,
        vec![StubResponse::json_after(
            Duration::from_millis(50),
            json!({"v": 1}),
        )],
    );
    let instance = instance_with(source, "inst-mount-loading", 0);
    let surface = Surface::shared();

    let mounting = tokio::spawn({
        let instance = instance.clone();
        let surface = surface.clone();
        async move { instance.mount(surface).await }
    });
    settle().await;

    assert_eq!(surface_phase(&surface), SurfacePhase::Loading);

    mounting.await.expect("mount task completes");
    assert_eq!(surface_phase(&surface), SurfacePhase::Ready);
}

#[tokio::test(start_paused = true)]
async fn mount_attaches_module_style() {
    let source = StubSource::new().route(TEST_ENDPOINT, json!({}));
    let instance = instance_with(source, "inst-mount-style", 0);

    assert!(styles::lookup("inst-mount-style").is_none());
    instance.mount(Surface::shared()).await;
    assert!(styles::lookup("inst-mount-style").is_some());
}

#[tokio::test(start_paused = true)]
async fn remount_reuses_the_instance_on_a_fresh_surface() {
    let source = StubSource::new().route(TEST_ENDPOINT, json!({"v": 7}));
    let instance = instance_with(source, "inst-mount-remount", 0);

    let first = Surface::shared();
    instance.mount(first.clone()).await;
    instance.unmount();

    let second = Surface::shared();
    instance.mount(second.clone()).await;

    assert_eq!(surface_text(&first), "", "old surface stays cleared");
    assert!(surface_text(&second).contains("\"v\": 7"));
}
