//! Static, load-time scene configuration.
//!
//! `SceneConfig::default()` describes the stock scene: a five-point path,
//! nine section markers and a fan of trees and bushes at the end of the walk.
//! Every field may be overridden from JSON; missing fields keep their defaults.

use std::collections::HashSet;
use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::animation::ClipKind;
use crate::camera_rig::CameraMode;
use crate::easing::Easing;
use crate::interaction::{MarkerId, SectionKey};

/// Error raised when a configuration cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("path needs at least 2 control points, got {0}")]
    TooFewControlPoints(usize),
    #[error("{name} must be in (0, 1], got {value}")]
    InvalidRate { name: &'static str, value: f32 },
    #[error("{name} range is empty: [{start}, {end}]")]
    EmptyRange {
        name: &'static str,
        start: f32,
        end: f32,
    },
    #[error("{name} must be a finite non-negative duration, got {value}")]
    InvalidDuration { name: &'static str, value: f32 },
    #[error("duplicate marker id {0}")]
    DuplicateMarker(MarkerId),
    #[error("{0} has no species to pick from")]
    NoSpecies(&'static str),
}

/// Complete scene configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub path: PathConfig,
    pub camera: CameraConfig,
    pub character: CharacterConfig,
    pub growth: GrowthConfig,
    pub layout: LayoutConfig,
    pub markers: Vec<MarkerConfig>,
    pub reveal: RevealConfig,
    pub scroll: ScrollConfig,
    pub intro: IntroConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            path: PathConfig::default(),
            camera: CameraConfig::default(),
            character: CharacterConfig::default(),
            growth: GrowthConfig::default(),
            layout: LayoutConfig::default(),
            markers: MarkerConfig::default_markers(),
            reveal: RevealConfig::default(),
            scroll: ScrollConfig::default(),
            intro: IntroConfig::default(),
        }
    }
}

impl SceneConfig {
    /// Parses a configuration from JSON and validates it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn marker(&self, id: MarkerId) -> Option<&MarkerConfig> {
        self.markers.iter().find(|m| m.id == id)
    }

    /// Checks the invariants the runtime relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let points = self.path.control_points.len();
        if points < 2 {
            return Err(ConfigError::TooFewControlPoints(points));
        }

        check_rate("camera.position_rate", self.camera.position_rate)?;
        check_rate("camera.fov_rate", self.camera.fov_rate)?;
        check_rate("growth.rate", self.growth.rate)?;
        check_rate("layout.fauna.rate", self.layout.fauna.rate)?;

        check_range("camera.blend", self.camera.blend_start, self.camera.blend_end, false)?;
        check_range("camera.fov", self.camera.fov_start, self.camera.fov_end, false)?;
        check_range(
            "layout.trees.distance",
            self.layout.trees.min_distance,
            self.layout.trees.max_distance,
            true,
        )?;
        check_range(
            "layout.trees.scale",
            self.layout.trees.min_scale,
            self.layout.trees.max_scale,
            true,
        )?;
        check_range(
            "layout.bushes.distance",
            self.layout.bushes.min_distance,
            self.layout.bushes.max_distance,
            true,
        )?;
        check_range(
            "layout.bushes.scale",
            self.layout.bushes.min_scale,
            self.layout.bushes.max_scale,
            true,
        )?;
        check_range(
            "layout.fauna.radius",
            self.layout.fauna.min_radius,
            self.layout.fauna.max_radius,
            true,
        )?;

        if self.layout.trees.count > 0 && self.layout.trees.species.is_empty() {
            return Err(ConfigError::NoSpecies("layout.trees"));
        }
        if self.layout.bushes.count > 0 && self.layout.bushes.species.is_empty() {
            return Err(ConfigError::NoSpecies("layout.bushes"));
        }
        if !self.markers.is_empty() && self.layout.fauna.species.is_empty() {
            return Err(ConfigError::NoSpecies("layout.fauna"));
        }

        check_duration("character.crossfade_secs", self.character.crossfade_secs)?;
        check_duration("scroll.settle_secs", self.scroll.settle_secs)?;
        check_duration("intro.initial_delay_secs", self.intro.initial_delay_secs)?;
        check_duration("intro.phase_secs", self.intro.phase_secs)?;
        check_duration("intro.fade_secs", self.intro.fade_secs)?;

        let mut seen = HashSet::new();
        for marker in &self.markers {
            if !seen.insert(marker.id) {
                return Err(ConfigError::DuplicateMarker(marker.id));
            }
        }
        Ok(())
    }
}

fn check_rate(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidRate { name, value })
    }
}

fn check_range(name: &'static str, start: f32, end: f32, allow_equal: bool) -> Result<(), ConfigError> {
    let ok = if allow_equal { start <= end } else { start < end };
    if ok {
        Ok(())
    } else {
        Err(ConfigError::EmptyRange { name, start, end })
    }
}

fn check_duration(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidDuration { name, value })
    }
}

/// Control points of the walking path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    pub control_points: Vec<[f32; 3]>,
}

impl Default for PathConfig {
    fn default() -> Self {
        Self {
            control_points: vec![
                [0.0, 0.0, 0.0],
                [5.0, 0.0, 5.0],
                [10.0, 0.0, 0.0],
                [15.0, 0.0, -5.0],
                [20.0, 0.0, 0.0],
            ],
        }
    }
}

/// Radius and height of the orbit for one viewport class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitRing {
    pub radius: f32,
    pub height: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    pub compact: OrbitRing,
    pub spacious: OrbitRing,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            compact: OrbitRing {
                radius: 12.0,
                height: 6.0,
            },
            spacious: OrbitRing {
                radius: 8.0,
                height: 4.0,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub mode: CameraMode,
    pub intro_position: [f32; 3],
    /// World-space offset from the character in chase mode.
    pub chase_offset: [f32; 3],
    pub blend_start: f32,
    pub blend_end: f32,
    pub base_fov: f32,
    pub max_fov: f32,
    /// FOV widening starts strictly after this progress.
    pub fov_start: f32,
    pub fov_end: f32,
    pub position_rate: f32,
    pub fov_rate: f32,
    /// Viewports narrower than this (pixels) are compact.
    pub compact_width: f32,
    pub orbit: OrbitConfig,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            mode: CameraMode::Chase,
            intro_position: [5.0, 8.0, 10.0],
            chase_offset: [5.0, 5.0, 5.0],
            blend_start: 0.0,
            blend_end: 0.1,
            base_fov: 50.0,
            max_fov: 75.0,
            fov_start: 0.1,
            fov_end: 1.0,
            position_rate: 0.1,
            fov_rate: 0.05,
            compact_width: 768.0,
            orbit: OrbitConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacterConfig {
    /// Clips the character model provides.
    pub clips: Vec<ClipKind>,
    /// Below this progress the character waves.
    pub wave_cutoff: f32,
    pub crossfade_secs: f32,
    /// The character only turns to face the path past this progress.
    pub heading_min_progress: f32,
}

impl Default for CharacterConfig {
    fn default() -> Self {
        Self {
            clips: ClipKind::ALL.to_vec(),
            wave_cutoff: 0.05,
            crossfade_secs: 0.2,
            heading_min_progress: 0.01,
        }
    }
}

/// Staggered growth of the end-of-path props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthConfig {
    pub base_threshold: f32,
    pub per_item_offset: f32,
    pub rate: f32,
    pub easing: Easing,
}

impl Default for GrowthConfig {
    fn default() -> Self {
        Self {
            base_threshold: 0.96,
            per_item_offset: 0.0005,
            rate: 0.1,
            easing: Easing::ElasticOut,
        }
    }
}

/// One population of scattered props.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScatterConfig {
    pub count: usize,
    pub species: Vec<String>,
    pub min_distance: f32,
    pub max_distance: f32,
    pub min_scale: f32,
    pub max_scale: f32,
    /// Vertical offset of every prop in the population.
    pub height: f32,
}

impl Default for ScatterConfig {
    fn default() -> Self {
        Self::trees()
    }
}

impl ScatterConfig {
    pub fn trees() -> Self {
        Self {
            count: 40,
            species: (1..=6).map(|i| format!("tree{i}")).collect(),
            min_distance: 4.0,
            max_distance: 25.0,
            min_scale: 0.4,
            max_scale: 0.8,
            height: 0.0,
        }
    }

    pub fn bushes() -> Self {
        Self {
            count: 50,
            species: vegetation_species(),
            min_distance: 3.0,
            max_distance: 23.0,
            min_scale: 0.8,
            max_scale: 1.3,
            height: 0.2,
        }
    }
}

fn vegetation_species() -> Vec<String> {
    [
        "bush1",
        "bush2",
        "bush3",
        "flower1",
        "flower2",
        "flower_bush_blue",
        "flower_bush_red",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Vegetation ring around each section marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FaunaConfig {
    pub species: Vec<String>,
    /// Ring size for markers without sub-labels.
    pub default_count: usize,
    /// Up to this many items are added at random on top of the base count.
    pub max_extra: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Total width of the random offset applied on each horizontal axis.
    pub jitter: f32,
    pub base_scale: f32,
    pub rate: f32,
}

impl Default for FaunaConfig {
    fn default() -> Self {
        Self {
            species: vegetation_species(),
            default_count: 3,
            max_extra: 1,
            min_radius: 2.5,
            max_radius: 3.5,
            jitter: 1.0,
            base_scale: 0.8,
            rate: 0.1,
        }
    }
}

/// Fan-shaped placement of the final scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fan apex on the ground plane (x, z).
    pub center: [f32; 2],
    /// Direction the fan opens towards, in radians.
    pub base_angle: f32,
    /// Full opening angle, in radians.
    pub spread: f32,
    pub trees: ScatterConfig,
    pub bushes: ScatterConfig,
    pub fauna: FaunaConfig,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            center: [20.0, 0.0],
            base_angle: PI / 4.0,
            spread: PI / 1.5,
            trees: ScatterConfig::trees(),
            bushes: ScatterConfig::bushes(),
            fauna: FaunaConfig::default(),
        }
    }
}

/// A section marker placed along the path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerConfig {
    pub id: MarkerId,
    pub position: [f32; 3],
    /// Progress at which the marker is fully revealed.
    pub target_progress: f32,
    pub model: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<SectionKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_labels: Vec<String>,
}

impl MarkerConfig {
    pub fn default_markers() -> Vec<Self> {
        const PLACEMENTS: [(MarkerId, [f32; 3], f32); 9] = [
            (1, [0.5, 0.0, 3.5], 0.1),
            (2, [6.5, 0.0, 6.5], 0.2),
            (3, [5.5, 0.0, 1.5], 0.3),
            (4, [11.5, 0.0, 1.5], 0.4),
            (5, [10.5, 0.0, -4.5], 0.5),
            (6, [14.5, 0.0, -1.5], 0.6),
            (7, [13.5, 0.0, -7.5], 0.7),
            (8, [18.5, 0.0, -4.5], 0.8),
            (9, [18.0, 0.0, 1.0], 0.9),
        ];

        PLACEMENTS
            .iter()
            .enumerate()
            .map(|(index, &(id, position, target_progress))| {
                let content = match id {
                    2 => Some((SectionKey::About, "About Me", ["My Story", "Philosophy", "Background"])),
                    4 => Some((SectionKey::Skills, "Skills", ["React", "Three.js", "Node"])),
                    6 => Some((SectionKey::Projects, "Projects", ["Mobile", "Web", "Game Dev"])),
                    8 => Some((SectionKey::Contact, "Contact", ["Email", "LinkedIn", "Twitter"])),
                    _ => None,
                };
                Self {
                    id,
                    position,
                    target_progress,
                    model: format!("tree{}", index % 6 + 1),
                    section: content.map(|(section, _, _)| section),
                    title: content.map(|(_, title, _)| title.to_string()),
                    sub_labels: content
                        .map(|(_, _, labels)| labels.iter().map(|l| (*l).to_string()).collect())
                        .unwrap_or_default(),
                }
            })
            .collect()
    }
}

/// Marker reveal shaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Progress span before `target_progress` over which a marker appears.
    pub window: f32,
    pub easing: Easing,
    /// Body scale of a hidden marker.
    pub min_scale: f32,
    pub compact_scale: f32,
    pub spacious_scale: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            window: 0.1,
            easing: Easing::EaseInOutQuad,
            min_scale: 0.01,
            compact_scale: 0.6,
            spacious_scale: 1.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScrollConfig {
    /// Idle time after which the character stops walking.
    pub settle_secs: f32,
    /// The intro hint shows while progress is below this value.
    pub intro_hint_below: f32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            settle_secs: 0.15,
            intro_hint_below: 0.02,
        }
    }
}

/// One step of the loading sequence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IntroPhase {
    pub loading_percent: f32,
    /// Progress forced while the scene warms up, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    /// Start with content visible and skip the loading sequence.
    pub skip: bool,
    pub initial_delay_secs: f32,
    pub phase_secs: f32,
    /// Fade-out of the loading screen once it reaches 100 %.
    pub fade_secs: f32,
    pub phases: Vec<IntroPhase>,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            skip: false,
            initial_delay_secs: 0.5,
            phase_secs: 0.8,
            fade_secs: 1.0,
            phases: vec![
                IntroPhase {
                    loading_percent: 30.0,
                    progress: None,
                },
                IntroPhase {
                    loading_percent: 60.0,
                    progress: Some(0.0021),
                },
                IntroPhase {
                    loading_percent: 90.0,
                    progress: Some(0.0),
                },
                IntroPhase {
                    loading_percent: 100.0,
                    progress: None,
                },
            ],
        }
    }
}
