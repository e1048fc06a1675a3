//! Headless integration tests for the full scene schedule.

use bevy::prelude::*;

use crate::animation::ClipKind;
use crate::bevy::test_utils::TestApp;
use crate::bevy::{
    Character, CharacterAnimation, ExperienceState, GrowingProp, InteractionRes, MainCamera,
    MarkerFauna, OverlayChanged, RigCamera, SceneCommand, ScenePath, ScrollInput, ScrollwalkSet,
    SectionMarker,
};
use crate::interaction::{InteractionPhase, SectionKey};

#[derive(Resource, Default)]
struct RecordedOverlayChanges(Vec<OverlayChanged>);

fn record_overlay_changes(
    mut reader: MessageReader<OverlayChanged>,
    mut recorded: ResMut<RecordedOverlayChanges>,
) {
    recorded.0.extend(reader.read().copied());
}

fn character_translation(test: &mut TestApp) -> Vec3 {
    let mut query = test
        .world_mut()
        .query_filtered::<&Transform, With<Character>>();
    query.single(test.world()).unwrap().translation
}

fn camera_state(test: &mut TestApp) -> (RigCamera, Vec3) {
    let mut query = test
        .world_mut()
        .query_filtered::<(&RigCamera, &Transform), With<MainCamera>>();
    let (rig, transform) = query.single(test.world()).unwrap();
    (*rig, transform.translation)
}

fn current_clip(test: &mut TestApp) -> ClipKind {
    let mut query = test.world_mut().query::<&CharacterAnimation>();
    query.single(test.world()).unwrap().selector.current()
}

fn progress(test: &TestApp) -> f32 {
    test.world().resource::<ScrollInput>().0.progress()
}

#[test]
fn test_scene_spawned() {
    let mut test = TestApp::new();

    let props = test.world_mut().query::<&GrowingProp>().iter(test.world()).count();
    let markers = test
        .world_mut()
        .query::<&SectionMarker>()
        .iter(test.world())
        .count();
    let fauna = test.world_mut().query::<&MarkerFauna>().iter(test.world()).count();

    assert_eq!(props, 90);
    assert_eq!(markers, 9);
    assert!(fauna >= 9 * 3);

    let start = test.world().resource::<ScenePath>().0.sample_position(0.0);
    assert_eq!(character_translation(&mut test), start);
}

#[test]
fn test_input_ignored_while_loading() {
    let mut test = TestApp::new();
    assert_eq!(test.experience_state(), ExperienceState::Loading);

    test.scroll_to(0.5);
    test.push_command(SceneCommand::MarkerClick { id: 2 });
    test.update();

    assert_eq!(progress(&test), 0.0);
    assert_eq!(
        test.world().resource::<InteractionRes>().0.phase(),
        InteractionPhase::Closed
    );
}

#[test]
fn test_intro_reaches_ready() {
    let mut test = TestApp::new();

    // Fade completes at 3.9 s
    test.step(200);
    assert_eq!(test.experience_state(), ExperienceState::Loading);
    let summary = test.stores().overlay.get_summary();
    assert_eq!(summary.loading_percent, 100.0);
    assert!(!summary.content_visible);

    test.step(60);
    assert_eq!(test.experience_state(), ExperienceState::Ready);
    let summary = test.stores().overlay.get_summary();
    assert!(summary.content_visible);
    // Warm-up progress was reset before the reveal
    assert_eq!(progress(&test), 0.0);
}

#[test]
fn test_skip_intro_command() {
    let mut test = TestApp::new();
    test.push_command(SceneCommand::SkipIntro);
    test.update();
    test.update();

    assert_eq!(test.experience_state(), ExperienceState::Ready);
    assert!(test.stores().overlay.get_summary().content_visible);

    test.scroll_to(0.25);
    assert_eq!(progress(&test), 0.25);
}

#[test]
fn test_scroll_moves_character_and_camera() {
    let mut test = TestApp::ready();
    let (initial_rig, initial_position) = camera_state(&mut test);

    test.scroll_to(0.5);
    let expected = test.world().resource::<ScenePath>().0.sample_position(0.5);
    assert!(character_translation(&mut test).distance(expected) < 1e-5);

    let (rig, position) = camera_state(&mut test);
    assert_ne!(position, initial_position);
    assert_eq!(rig.pose.position, position);
    assert!(rig.pose.fov_degrees > initial_rig.pose.fov_degrees);

    // The rig converges toward the chase offset behind the character
    test.step(120);
    let (_, settled) = camera_state(&mut test);
    let character = character_translation(&mut test);
    assert!(settled.distance(character) < position.distance(character) + 1.0);
}

#[test]
fn test_nothing_moves_before_first_scroll() {
    let mut test = TestApp::ready();
    let (_, before) = camera_state(&mut test);
    let character = character_translation(&mut test);

    test.step(30);

    assert_eq!(camera_state(&mut test).1, before);
    assert_eq!(character_translation(&mut test), character);
}

#[test]
fn test_clip_follows_scroll_activity() {
    let mut test = TestApp::ready();
    assert_eq!(current_clip(&mut test), ClipKind::Wave);

    test.scroll_to(0.3);
    assert_eq!(current_clip(&mut test), ClipKind::Walk);

    // Settle delay is 0.15 s
    test.step(15);
    assert_eq!(current_clip(&mut test), ClipKind::Idle);

    test.scroll_to(0.01);
    assert_eq!(current_clip(&mut test), ClipKind::Wave);
}

#[test]
fn test_scroll_settled_command_stops_walking() {
    let mut test = TestApp::ready();
    test.scroll_to(0.4);
    assert_eq!(current_clip(&mut test), ClipKind::Walk);

    test.push_command(SceneCommand::ScrollSettled);
    test.update();
    assert_eq!(current_clip(&mut test), ClipKind::Idle);
}

#[test]
fn test_marker_to_overlay_flow() {
    let mut test = TestApp::ready();
    test.app.init_resource::<RecordedOverlayChanges>();
    test.app
        .add_systems(Update, record_overlay_changes.after(ScrollwalkSet::Input));

    test.scroll_to(0.2);
    test.push_command(SceneCommand::MarkerClick { id: 2 });
    test.update();
    assert_eq!(
        test.world().resource::<InteractionRes>().0.phase(),
        InteractionPhase::MarkerOpen(2)
    );

    // The reported key is corrected to the marker's own section
    test.push_command(SceneCommand::SubLabelClick {
        id: 2,
        section: SectionKey::Contact,
    });
    test.update();
    let summary = test.stores().overlay.get_summary();
    assert_eq!(summary.active_overlay, Some(SectionKey::About));
    assert!(!summary.intro_hint_visible);

    // Clicks on the scene are ignored under an overlay
    test.push_command(SceneCommand::MarkerClick { id: 4 });
    test.update();
    assert_eq!(
        test.world().resource::<InteractionRes>().0.active_overlay(),
        Some(SectionKey::About)
    );

    test.scroll_to(0.21);
    let summary = test.stores().overlay.get_summary();
    assert_eq!(summary.active_overlay, None);
    assert_eq!(summary.open_marker, None);

    let recorded = &test.world().resource::<RecordedOverlayChanges>().0;
    let phases: Vec<_> = recorded.iter().map(|c| c.phase).collect();
    assert_eq!(
        phases,
        vec![
            InteractionPhase::MarkerOpen(2),
            InteractionPhase::OverlayActive(SectionKey::About),
            InteractionPhase::Closed,
        ]
    );
}

#[test]
fn test_nav_click_toggles_overlay() {
    let mut test = TestApp::ready();

    test.push_command(SceneCommand::NavClick {
        section: SectionKey::Projects,
    });
    test.update();
    assert_eq!(
        test.stores().overlay.get_summary().active_overlay,
        Some(SectionKey::Projects)
    );

    test.push_command(SceneCommand::NavClick {
        section: SectionKey::Projects,
    });
    test.update();
    assert_eq!(test.stores().overlay.get_summary().active_overlay, None);

    test.push_command(SceneCommand::NavClick {
        section: SectionKey::Skills,
    });
    test.push_command(SceneCommand::CloseClick);
    test.update();
    assert_eq!(test.stores().overlay.get_summary().active_overlay, None);
}

#[test]
fn test_unknown_marker_ignored() {
    let mut test = TestApp::ready();
    test.push_command(SceneCommand::MarkerClick { id: 99 });
    test.update();
    assert_eq!(
        test.world().resource::<InteractionRes>().0.phase(),
        InteractionPhase::Closed
    );

    // Marker 1 has no section content
    test.push_command(SceneCommand::MarkerClick { id: 1 });
    test.push_command(SceneCommand::SubLabelClick {
        id: 1,
        section: SectionKey::About,
    });
    test.update();
    assert_eq!(
        test.world().resource::<InteractionRes>().0.phase(),
        InteractionPhase::MarkerOpen(1)
    );
}

#[test]
fn test_props_grow_near_the_end() {
    let mut test = TestApp::ready();

    test.scroll_to(0.9);
    test.step(30);
    let snapshot = test.stores().frame.get_snapshot();
    assert!(snapshot.prop_scales.iter().all(|s| *s == 0.0));

    test.scroll_to(1.0);
    test.step(120);
    let snapshot = test.stores().frame.get_snapshot();
    assert_eq!(snapshot.prop_scales.len(), 90);
    assert!(snapshot.prop_scales[0] > 0.3);
    // Staggered past the end of the walk
    assert_eq!(snapshot.prop_scales[89], 0.0);
}

#[test]
fn test_markers_reveal_with_progress() {
    let mut test = TestApp::ready();
    test.scroll_to(0.45);
    test.step(60);

    let snapshot = test.stores().frame.get_snapshot();
    let factor = |id| {
        snapshot
            .marker_factors
            .iter()
            .find(|(m, _)| *m == id)
            .map(|(_, f)| *f)
            .unwrap()
    };
    assert_eq!(factor(1), 1.0);
    assert_eq!(factor(9), 0.0);

    let mut query = test.world_mut().query::<&MarkerFauna>();
    let grown = query
        .iter(test.world())
        .filter(|f| f.marker == 1)
        .all(|f| f.scale > 0.0);
    assert!(grown);
}

#[test]
fn test_intro_hint_and_frame_store() {
    let mut test = TestApp::ready();
    assert!(test.stores().overlay.get_summary().intro_hint_visible);

    let before = test.stores().frame.get_frame();
    test.scroll_to(0.5);
    assert!(!test.stores().overlay.get_summary().intro_hint_visible);

    let snapshot = test.stores().frame.get_snapshot();
    assert_eq!(snapshot.frame, before + 1);
    assert_eq!(snapshot.progress, 0.5);
    assert!(snapshot.actively_scrolling);
    assert_eq!(snapshot.clip, Some(ClipKind::Walk));
}

#[test]
fn test_viewport_command_switches_class() {
    let mut test = TestApp::ready();
    test.push_command(SceneCommand::SetViewport {
        width: 400.0,
        height: 800.0,
    });
    test.scroll_to(0.95);
    test.step(10);

    let mut query = test.world_mut().query::<(&SectionMarker, &Transform)>();
    let scales: Vec<_> = query
        .iter(test.world())
        .filter(|(m, _)| m.factor == 1.0)
        .map(|(_, t)| t.scale.x)
        .collect();
    assert!(!scales.is_empty());

    let reveal = crate::config::RevealConfig::default();
    let expected = reveal.body_scale(1.0, crate::camera_rig::ViewportClass::Compact);
    assert!(scales.iter().all(|s| (*s - expected).abs() < 1e-5));
}
