//! Overlay window lifecycle through the public controller API.

mod common;

use common::{RecordingSurface, SurfaceCall};
use screen_lens_lib::overlay::{
    InstanceId, OverlayController, Phase, Proportion, RenderCommand, Rgb, Segment,
};
use screen_lens_lib::settings::{MemoryStore, SettingsStore};
use std::sync::Arc;

fn controller() -> (OverlayController, RecordingSurface, Arc<MemoryStore>) {
    let surface = RecordingSurface::default();
    let store = Arc::new(MemoryStore::new());
    let controller = OverlayController::new(Box::new(surface.clone()), store.clone());
    (controller, surface, store)
}

fn texts(controller: &OverlayController) -> Vec<Vec<Segment>> {
    controller
        .messages()
        .iter()
        .map(|m| m.content().segments().to_vec())
        .collect()
}

#[test]
fn many_presents_share_one_window_in_order() {
    let (mut overlay, surface, _) = controller();

    let id = overlay.present("one").unwrap();
    overlay.surface_ready(id).unwrap();
    for text in ["two", "three", "four"] {
        assert_eq!(overlay.present(text).unwrap(), id);
    }

    assert_eq!(surface.opened(), vec![id]);
    assert_eq!(
        texts(&overlay),
        vec![
            vec![Segment::text(["one"])],
            vec![Segment::text(["two"])],
            vec![Segment::text(["three"])],
            vec![Segment::text(["four"])],
        ]
    );
    let state = overlay.state().unwrap();
    assert_eq!(state.phase, Phase::Ready);
    assert!(state.visible);
    assert_eq!(state.message_count, 4);
}

#[test]
fn presents_before_ready_are_replayed_once() {
    let (mut overlay, surface, _) = controller();

    let id = overlay.present("early").unwrap();
    overlay.present("also early").unwrap();
    assert!(!surface
        .calls()
        .iter()
        .any(|c| matches!(c, SurfaceCall::Render(..))));

    overlay.surface_ready(id).unwrap();
    let replays: Vec<_> = surface
        .calls()
        .into_iter()
        .filter_map(|c| match c {
            SurfaceCall::Render(_, RenderCommand::Replay { messages, .. }) => Some(messages),
            _ => None,
        })
        .collect();
    assert_eq!(replays.len(), 1);
    assert_eq!(replays[0].len(), 2);
}

#[test]
fn close_then_present_starts_a_fresh_window() {
    let (mut overlay, surface, _) = controller();

    let first = overlay.present("old").unwrap();
    overlay.surface_ready(first).unwrap();
    overlay.close();
    assert!(overlay.state().is_none());
    assert!(overlay.messages().is_empty());

    let second = overlay.present("new").unwrap();
    assert_ne!(first, second);
    assert_eq!(surface.opened(), vec![first, second]);
    assert!(surface.calls().contains(&SurfaceCall::Destroy(first)));
    assert_eq!(texts(&overlay), vec![vec![Segment::text(["new"])]]);
}

#[test]
fn user_closing_the_window_discards_the_log() {
    let (mut overlay, _, _) = controller();

    let id = overlay.present("gone").unwrap();
    overlay.surface_closed(id);
    assert!(overlay.state().is_none());

    let next = overlay.present("fresh").unwrap();
    assert_eq!(overlay.messages().len(), 1);

    // A late destroy event for the old instance leaves the new one alone.
    overlay.surface_closed(id);
    assert_eq!(overlay.state().map(|s| s.id), Some(next));
}

#[test]
fn ready_for_unknown_instance_is_an_error() {
    let (mut overlay, _, _) = controller();
    assert!(overlay.surface_ready(InstanceId(42)).is_err());
}

#[test]
fn style_changes_persist_and_survive_reopen() {
    let (mut overlay, _, store) = controller();

    overlay.present("styled").unwrap();
    overlay.set_opacity(0.5);
    overlay.set_text_transparency(1.4);
    overlay.set_background_color("#102030").unwrap();
    overlay.set_text_color("#ffffff").unwrap();
    assert!(overlay.set_text_color("not a colour").is_err());
    overlay.close();

    let style = *overlay.style();
    assert_eq!(style.window_opacity, Proportion::new(0.5));
    assert_eq!(style.text_transparency, Proportion::OPAQUE);
    assert_eq!(style.background_color, Rgb::new(0x10, 0x20, 0x30));
    assert_eq!(style.text_color, Rgb::new(255, 255, 255));

    assert_eq!(
        store.preference("overlay.backgroundColor").unwrap(),
        Some(serde_json::json!("#102030"))
    );

    // A controller built on the same store starts from the saved style.
    let reopened = OverlayController::new(Box::new(RecordingSurface::default()), store.clone());
    assert_eq!(*reopened.style(), style);
}

#[test]
fn restyle_reaches_every_message() {
    let (mut overlay, surface, _) = controller();
    let id = overlay.present("a").unwrap();
    overlay.present("b").unwrap();
    overlay.surface_ready(id).unwrap();
    surface.take();

    overlay.set_background_color("#000000").unwrap();

    let calls = surface.take();
    let [SurfaceCall::Render(_, RenderCommand::Restyle { messages, .. })] = calls.as_slice() else {
        panic!("expected a single restyle, got {:?}", calls);
    };
    assert_eq!(messages.len(), 2);
    assert!(messages.iter().all(|m| m.paint == overlay.style().paint()));
}
