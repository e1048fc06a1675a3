//! Bevy plugins for the scroll-driven scene.
//!
//! Provides:
//! - `ScrollwalkHeadlessPlugin`: Logic-only plugin (no rendering/window dependencies) for headless runs and tests
//! - `ScrollwalkUnifiedPlugin`: Full plugin including `ScrollwalkHeadlessPlugin` + rendering systems

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::resources::*;
use crate::bevy::state_store::StateStores;
use crate::bevy::systems;
use crate::config::SceneConfig;
use crate::curve::PathCurve;
use crate::intro::IntroSequence;
use crate::layout::SceneLayout;

/// Whether the loading screen still covers the scene.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExperienceState {
    #[default]
    Loading,
    /// Content visible; scroll and click input is honoured.
    Ready,
}

/// Per-frame stages, run in this order every `Update`.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollwalkSet {
    Input,
    Activity,
    Intro,
    Character,
    Animation,
    Camera,
    Growth,
    Markers,
}

// ============================================================================
// Headless Plugin (logic only, no rendering/window dependencies)
// ============================================================================

/// Headless plugin containing all scene logic without rendering or window dependencies.
///
/// Use this plugin with `MinimalPlugins` to run the scene without a
/// windowing or rendering backend.
///
/// Excluded systems (rendering-dependent):
/// - Camera3d / Projection attachment and FOV copy (attach_camera3d, apply_rig_projection)
/// - Window size tracking (sync_viewport_from_window)
pub struct ScrollwalkHeadlessPlugin {
    pub seed: u64,
    pub config: SceneConfig,
    pub command_queue: Option<CommandQueue>,
    pub state_stores: Option<StateStores>,
}

impl Default for ScrollwalkHeadlessPlugin {
    fn default() -> Self {
        Self {
            seed: 12345,
            config: SceneConfig::default(),
            command_queue: None,
            state_stores: None,
        }
    }
}

impl Plugin for ScrollwalkHeadlessPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // States
        // ====================================================================
        app.init_state::<ExperienceState>();

        // ====================================================================
        // Resources
        // ====================================================================

        let path = PathCurve::from_config(&self.config.path).unwrap_or_else(|| {
            tracing::warn!(
                "[scene] path has {} control points, using the default path",
                self.config.path.control_points.len()
            );
            PathCurve::default_path()
        });

        app.insert_resource(SceneSettings::new(self.config.clone()))
            .insert_resource(ScenePath(path))
            .insert_resource(SceneLayoutRes(SceneLayout::generate(&self.config, self.seed)))
            .insert_resource(IntroRes(IntroSequence::new(&self.config.intro)))
            .insert_resource(ScrollInput::default())
            .insert_resource(InteractionRes::default())
            .insert_resource(Viewport::default())
            .insert_resource(FrameCounter::default())
            .insert_resource(self.command_queue.clone().unwrap_or_default())
            .insert_resource(self.state_stores.clone().unwrap_or_default());

        // ====================================================================
        // Messages
        // ====================================================================

        app.add_message::<SceneInputEvent>()
            .add_message::<SkipIntroEvent>()
            .add_message::<OverlayChanged>()
            .add_message::<ClipChanged>()
            .add_message::<ContentShown>();

        // ====================================================================
        // Scene setup
        // ====================================================================

        app.add_systems(Startup, systems::spawn_scene);

        // ====================================================================
        // Per-frame systems (Update)
        // ====================================================================

        app.configure_sets(
            Update,
            (
                ScrollwalkSet::Input,
                ScrollwalkSet::Activity,
                ScrollwalkSet::Intro,
                ScrollwalkSet::Character,
                ScrollwalkSet::Animation,
                ScrollwalkSet::Camera,
                ScrollwalkSet::Growth,
                ScrollwalkSet::Markers,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (systems::process_commands, systems::apply_scene_input)
                .chain()
                .in_set(ScrollwalkSet::Input),
        );
        app.add_systems(
            Update,
            systems::tick_scroll_activity.in_set(ScrollwalkSet::Activity),
        );
        app.add_systems(
            Update,
            systems::advance_intro
                .in_set(ScrollwalkSet::Intro)
                .run_if(in_state(ExperienceState::Loading)),
        );
        app.add_systems(
            Update,
            systems::move_character.in_set(ScrollwalkSet::Character),
        );
        app.add_systems(
            Update,
            (systems::select_character_clip, systems::advance_clip_mixer)
                .chain()
                .in_set(ScrollwalkSet::Animation),
        );
        app.add_systems(
            Update,
            systems::update_camera_rig.in_set(ScrollwalkSet::Camera),
        );
        app.add_systems(Update, systems::grow_props.in_set(ScrollwalkSet::Growth));
        app.add_systems(
            Update,
            (systems::reveal_markers, systems::grow_marker_fauna)
                .chain()
                .in_set(ScrollwalkSet::Markers),
        );

        // WASM exit system
        #[cfg(all(target_arch = "wasm32", feature = "windowed"))]
        app.add_systems(Update, crate::bevy::wasm_entry::check_exit_system);

        // ====================================================================
        // State sync (PostUpdate)
        // ====================================================================

        app.add_systems(
            PostUpdate,
            (systems::sync_overlay_store, systems::sync_frame_store).chain(),
        );

        app.add_systems(OnEnter(ExperienceState::Ready), log_ready);
    }
}

// ============================================================================
// Unified Plugin (headless + rendering)
// ============================================================================

/// Unified plugin for a windowed app.
///
/// Includes `ScrollwalkHeadlessPlugin` for all scene logic, plus systems
/// that require `Camera3d`, `Projection` and `Window`.
pub struct ScrollwalkUnifiedPlugin {
    pub seed: u64,
    pub config: SceneConfig,
    pub command_queue: Option<CommandQueue>,
    pub state_stores: Option<StateStores>,
}

impl Default for ScrollwalkUnifiedPlugin {
    fn default() -> Self {
        Self {
            seed: 12345,
            config: SceneConfig::default(),
            command_queue: None,
            state_stores: None,
        }
    }
}

impl ScrollwalkUnifiedPlugin {
    pub fn new(config: SceneConfig, command_queue: CommandQueue, state_stores: StateStores) -> Self {
        Self {
            seed: 12345,
            config,
            command_queue: Some(command_queue),
            state_stores: Some(state_stores),
        }
    }
}

impl Plugin for ScrollwalkUnifiedPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // Headless logic (all scene systems without rendering)
        // ====================================================================
        app.add_plugins(ScrollwalkHeadlessPlugin {
            seed: self.seed,
            config: self.config.clone(),
            command_queue: self.command_queue.clone(),
            state_stores: self.state_stores.clone(),
        });

        // ====================================================================
        // Window size (before input so compact/spacious is current)
        // ====================================================================

        app.add_systems(
            Update,
            systems::sync_viewport_from_window.before(ScrollwalkSet::Input),
        );

        // ====================================================================
        // Camera3d + projection (needs the render stack)
        // ====================================================================

        app.add_systems(
            Update,
            (systems::attach_camera3d, systems::apply_rig_projection)
                .chain()
                .after(ScrollwalkSet::Camera),
        );
    }
}

fn log_ready(layout: Res<SceneLayoutRes>) {
    tracing::info!(
        "[scene] ready ({} props, {} fauna)",
        layout.0.props.len(),
        layout.0.fauna.len()
    );
}
