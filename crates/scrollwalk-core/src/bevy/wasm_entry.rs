//! WASM entry points for the scroll-driven scene.
//!
//! Provides JavaScript-callable functions to start the app, forward scroll
//! and click input, and poll overlay state.

use std::sync::atomic::{AtomicBool, Ordering};

use bevy::prelude::*;
use bevy::winit::{UpdateMode, WinitSettings};
use parking_lot::Mutex;
use wasm_bindgen::prelude::*;

use crate::bevy::{CommandQueue, SceneCommand, ScrollwalkUnifiedPlugin, StateStores};
use crate::config::SceneConfig;
use crate::interaction::{MarkerId, SectionKey};

// ============================================================================
// Global State
// ============================================================================

/// Atomic flag for signaling app shutdown (checked every frame by Bevy system).
static SHOULD_EXIT: AtomicBool = AtomicBool::new(false);

/// In WASM the EventLoop can only be created once.
static BEVY_APP_STARTED: AtomicBool = AtomicBool::new(false);

/// Global state that can be reset on page reload.
struct GlobalState {
    command_queue: CommandQueue,
    state_stores: StateStores,
}

impl GlobalState {
    fn new() -> Self {
        Self {
            command_queue: CommandQueue::new(),
            state_stores: StateStores::new(),
        }
    }
}

static GLOBAL_STATE: Mutex<Option<GlobalState>> = Mutex::new(None);

fn get_command_queue() -> CommandQueue {
    GLOBAL_STATE
        .lock()
        .get_or_insert_with(GlobalState::new)
        .command_queue
        .clone()
}

fn get_state_stores() -> StateStores {
    GLOBAL_STATE
        .lock()
        .get_or_insert_with(GlobalState::new)
        .state_stores
        .clone()
}

fn push(command: SceneCommand) -> Result<(), JsValue> {
    if SHOULD_EXIT.load(Ordering::SeqCst) {
        return Err(JsValue::from_str("Bevy app is shutting down"));
    }
    get_command_queue().push(command);
    Ok(())
}

/// Request Bevy app to exit. Called before page unload.
#[wasm_bindgen]
pub fn request_bevy_exit() {
    tracing::info!("[scrollwalk] request_bevy_exit called - signaling app to exit");
    SHOULD_EXIT.store(true, Ordering::SeqCst);
}

/// Reset global state. Called after app exits or before page unload.
#[wasm_bindgen]
pub fn reset_bevy_state() {
    tracing::info!("[scrollwalk] reset_bevy_state called - clearing global state");

    let mut guard = GLOBAL_STATE.lock();
    if let Some(ref state) = *guard {
        state.command_queue.clear();
    }
    *guard = None;

    SHOULD_EXIT.store(false, Ordering::SeqCst);
}

/// Bevy system that checks if exit was requested and sends AppExit.
pub fn check_exit_system(mut exit: MessageWriter<bevy::app::AppExit>) {
    if SHOULD_EXIT.load(Ordering::SeqCst) {
        tracing::info!("[scrollwalk] check_exit_system: sending AppExit");
        exit.write(bevy::app::AppExit::Success);
    }
}

// ============================================================================
// Initialization
// ============================================================================

/// Starts the Bevy app on the given canvas.
///
/// `config_json` may be empty to use the built-in scene.
#[wasm_bindgen]
pub fn start_scrollwalk_app(canvas_id: &str, config_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    if BEVY_APP_STARTED.load(Ordering::SeqCst) {
        tracing::info!("[scrollwalk] App already running, skipping creation");
        return Ok(());
    }

    let config = if config_json.trim().is_empty() {
        SceneConfig::default()
    } else {
        SceneConfig::from_json(config_json)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
    };

    let command_queue = get_command_queue();
    let state_stores = get_state_stores();

    tracing::info!("[scrollwalk] creating Bevy app for canvas: #{}", canvas_id);

    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    canvas: Some(format!("#{}", canvas_id)),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: false,
                    ..default()
                }),
                ..default()
            })
            .disable::<bevy::log::LogPlugin>(),
    );

    app.insert_resource(WinitSettings {
        focused_mode: UpdateMode::Continuous,
        unfocused_mode: UpdateMode::Continuous,
    });

    app.add_plugins(ScrollwalkUnifiedPlugin::new(config, command_queue, state_stores));

    BEVY_APP_STARTED.store(true, Ordering::SeqCst);

    tracing::info!("[scrollwalk] calling app.run()");
    app.run();
    tracing::info!("[scrollwalk] app.run() returned");

    Ok(())
}

// ============================================================================
// Input
// ============================================================================

/// Scroll event with normalized progress in `[0, 1]`.
#[wasm_bindgen]
pub fn on_scroll(progress: f32) -> Result<(), JsValue> {
    push(SceneCommand::Scroll { progress })
}

/// Scrolling stopped (debounced by the page).
#[wasm_bindgen]
pub fn on_scroll_settle() -> Result<(), JsValue> {
    push(SceneCommand::ScrollSettled)
}

#[wasm_bindgen]
pub fn on_marker_click(id: MarkerId) -> Result<(), JsValue> {
    push(SceneCommand::MarkerClick { id })
}

/// Click on a marker sub-label; `section` is a key such as `"about"`.
#[wasm_bindgen]
pub fn on_sub_label_click(id: MarkerId, section: &str) -> Result<(), JsValue> {
    let section: SectionKey = section.parse().map_err(|e| JsValue::from_str(&format!("{}", e)))?;
    push(SceneCommand::SubLabelClick { id, section })
}

#[wasm_bindgen]
pub fn on_nav_click(section: &str) -> Result<(), JsValue> {
    let section: SectionKey = section.parse().map_err(|e| JsValue::from_str(&format!("{}", e)))?;
    push(SceneCommand::NavClick { section })
}

#[wasm_bindgen]
pub fn on_close_click() -> Result<(), JsValue> {
    push(SceneCommand::CloseClick)
}

#[wasm_bindgen]
pub fn set_viewport(width: f32, height: f32) -> Result<(), JsValue> {
    push(SceneCommand::SetViewport { width, height })
}

#[wasm_bindgen]
pub fn skip_intro() -> Result<(), JsValue> {
    push(SceneCommand::SkipIntro)
}

// ============================================================================
// State queries
// ============================================================================

#[wasm_bindgen]
pub fn get_overlay_state() -> JsValue {
    let summary = get_state_stores().overlay.get_summary();
    serde_wasm_bindgen::to_value(&summary).unwrap_or(JsValue::NULL)
}

#[wasm_bindgen]
pub fn get_overlay_version() -> u64 {
    get_state_stores().overlay.get_version()
}

#[wasm_bindgen]
pub fn get_frame_snapshot() -> JsValue {
    let snapshot = get_state_stores().frame.get_snapshot();
    serde_wasm_bindgen::to_value(&snapshot).unwrap_or(JsValue::NULL)
}
