//! Procedural placement of scene props.
//!
//! The layout is generated once from an explicit seed and then kept for the
//! lifetime of the scene; only per-instance scales change afterwards.

use std::f32::consts::PI;

use bevy::math::Vec3;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::config::{FaunaConfig, GrowthConfig, LayoutConfig, MarkerConfig, ScatterConfig, SceneConfig};
use crate::interaction::MarkerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropKind {
    Tree,
    Bush,
}

/// A growth-animated prop of the final scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropSpec {
    /// Position in the growth stagger sequence.
    pub index: usize,
    pub kind: PropKind,
    pub species: String,
    pub position: Vec3,
    pub yaw: f32,
    pub max_scale: f32,
    pub threshold: f32,
}

/// A vegetation item in the ring around a section marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaunaSpec {
    pub marker: MarkerId,
    pub slot: usize,
    pub species: String,
    /// Offset from the marker position.
    pub offset: Vec3,
    pub yaw: f32,
    /// Sub-label carried by this item, if the marker has one for its slot.
    pub label: Option<String>,
}

/// Immutable result of layout generation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneLayout {
    pub seed: u64,
    pub props: Vec<PropSpec>,
    pub fauna: Vec<FaunaSpec>,
}

impl SceneLayout {
    /// Generates the full layout. The same config and seed always produce
    /// the same layout.
    pub fn generate(config: &SceneConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut props = Vec::with_capacity(config.layout.trees.count + config.layout.bushes.count);

        scatter(
            &mut rng,
            &config.layout,
            &config.layout.trees,
            PropKind::Tree,
            &config.growth,
            &mut props,
        );
        scatter(
            &mut rng,
            &config.layout,
            &config.layout.bushes,
            PropKind::Bush,
            &config.growth,
            &mut props,
        );

        let fauna = config
            .markers
            .iter()
            .flat_map(|marker| ring(&mut rng, marker, &config.layout.fauna))
            .collect();

        Self { seed, props, fauna }
    }

    pub fn fauna_for(&self, marker: MarkerId) -> impl Iterator<Item = &FaunaSpec> {
        self.fauna.iter().filter(move |f| f.marker == marker)
    }
}

fn lerp(min: f32, max: f32, t: f32) -> f32 {
    min + (max - min) * t
}

fn scatter(
    rng: &mut ChaCha8Rng,
    layout: &LayoutConfig,
    population: &ScatterConfig,
    kind: PropKind,
    growth: &GrowthConfig,
    out: &mut Vec<PropSpec>,
) {
    for _ in 0..population.count {
        let angle = layout.base_angle + (rng.random::<f32>() - 0.5) * layout.spread;
        let distance = lerp(population.min_distance, population.max_distance, rng.random());
        let max_scale = lerp(population.min_scale, population.max_scale, rng.random());
        let Some(species) = population.species.choose(rng) else {
            return;
        };
        let yaw = rng.random::<f32>() * 2.0 * PI;

        let index = out.len();
        out.push(PropSpec {
            index,
            kind,
            species: species.clone(),
            position: Vec3::new(
                layout.center[0] + angle.cos() * distance,
                population.height,
                layout.center[1] + angle.sin() * distance,
            ),
            yaw,
            max_scale,
            threshold: growth.threshold(index),
        });
    }
}

fn ring(rng: &mut ChaCha8Rng, marker: &MarkerConfig, fauna: &FaunaConfig) -> Vec<FaunaSpec> {
    let base = if marker.sub_labels.is_empty() {
        fauna.default_count
    } else {
        marker.sub_labels.len()
    };
    let count = base + rng.random_range(0..=fauna.max_extra);

    let mut items = Vec::with_capacity(count);
    for slot in 0..count {
        let angle = slot as f32 / count as f32 * 2.0 * PI;
        let radius = lerp(fauna.min_radius, fauna.max_radius, rng.random());
        let Some(species) = fauna.species.choose(rng) else {
            break;
        };
        let x = angle.cos() * radius + (rng.random::<f32>() - 0.5) * fauna.jitter;
        let z = angle.sin() * radius + (rng.random::<f32>() - 0.5) * fauna.jitter;
        items.push(FaunaSpec {
            marker: marker.id,
            slot,
            species: species.clone(),
            offset: Vec3::new(x, 0.0, z),
            yaw: rng.random::<f32>() * PI,
            label: marker.sub_labels.get(slot).cloned(),
        });
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_layout() {
        let config = SceneConfig::default();
        let a = SceneLayout::generate(&config, 7);
        let b = SceneLayout::generate(&config, 7);
        assert_eq!(a, b);
        let c = SceneLayout::generate(&config, 8);
        assert_ne!(a.props, c.props);
    }

    #[test]
    fn test_population_counts() {
        let config = SceneConfig::default();
        let layout = SceneLayout::generate(&config, 1);
        assert_eq!(layout.props.len(), 90);
        assert_eq!(
            layout.props.iter().filter(|p| p.kind == PropKind::Tree).count(),
            40
        );
        for (i, prop) in layout.props.iter().enumerate() {
            assert_eq!(prop.index, i);
            assert!((prop.threshold - config.growth.threshold(i)).abs() < 1e-6);
        }
    }

    #[test]
    fn test_props_stay_inside_fan() {
        let config = SceneConfig::default();
        let layout = SceneLayout::generate(&config, 99);
        let center = Vec3::new(20.0, 0.0, 0.0);
        for prop in &layout.props {
            let flat = Vec3::new(prop.position.x, 0.0, prop.position.z) - center;
            let (min_d, max_d, min_s, max_s) = match prop.kind {
                PropKind::Tree => (4.0, 25.0, 0.4, 0.8),
                PropKind::Bush => (3.0, 23.0, 0.8, 1.3),
            };
            assert!(flat.length() >= min_d - 1e-3 && flat.length() <= max_d + 1e-3);
            assert!(prop.max_scale >= min_s && prop.max_scale <= max_s);

            let angle = flat.z.atan2(flat.x);
            assert!((angle - PI / 4.0).abs() <= PI / 3.0 + 1e-3, "angle {angle}");
        }
        let bush = layout.props.iter().find(|p| p.kind == PropKind::Bush).unwrap();
        assert!((bush.position.y - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_fauna_rings() {
        let config = SceneConfig::default();
        let layout = SceneLayout::generate(&config, 3);
        for marker in &config.markers {
            let ring: Vec<_> = layout.fauna_for(marker.id).collect();
            let base = if marker.sub_labels.is_empty() {
                3
            } else {
                marker.sub_labels.len()
            };
            assert!(ring.len() == base || ring.len() == base + 1);
            for item in &ring {
                let flat = Vec3::new(item.offset.x, 0.0, item.offset.z).length();
                // Radius 2.5..3.5 plus up to 0.5 jitter per axis
                assert!(flat > 1.7 && flat < 4.3, "offset {flat}");
            }
            let labels: Vec<_> = ring.iter().filter_map(|f| f.label.clone()).collect();
            assert_eq!(labels, marker.sub_labels);
        }
    }
}
