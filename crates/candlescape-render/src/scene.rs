//! Candle sequence to instanced box mapping.
//!
//! Each candle becomes three scaled unit cubes: the body followed by the upper
//! and lower wick. Prices are normalized into `[0, vertical_range]` against the
//! lowest low and highest high of the whole sequence, and candles are laid out
//! left to right along X, centered on the origin.

use glam::{Mat4, Vec3, Vec4};

use candlescape_core::{Candle, PriceRange};

use crate::gpu_types::InstanceGpu;
use crate::{CANDLE_SPACING, INSTANCES_PER_CANDLE, VERTICAL_RANGE};

/// Floor for the normalized body height so doji candles stay visible.
pub const MIN_BODY_HEIGHT: f32 = 0.1;
pub const BODY_WIDTH: f32 = 0.4;
pub const BODY_DEPTH: f32 = 0.2;
pub const WICK_WIDTH: f32 = 0.1;
/// Vertical stretch applied to body and wick heights.
pub const SCALE_Y: f32 = 5.0;

/// Instance colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bullish: Vec4,
    pub bearish: Vec4,
    pub wick: Vec4,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            bullish: Vec4::new(0.0, 1.0, 0.0, 1.0),
            bearish: Vec4::new(1.0, 0.0, 0.0, 1.0),
            wick: Vec4::new(0.0, 0.0, 0.0, 1.0),
        }
    }
}

/// One drawable box: translation and non-uniform scale of the unit cube.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instance {
    pub transform: Mat4,
    pub color: Vec4,
}

impl Instance {
    pub fn new(translation: Vec3, scale: Vec3, color: Vec4) -> Self {
        Self {
            transform: Mat4::from_translation(translation) * Mat4::from_scale(scale),
            color,
        }
    }

    pub fn translation(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    pub fn scale(&self) -> Vec3 {
        Vec3::new(
            self.transform.x_axis.x,
            self.transform.y_axis.y,
            self.transform.z_axis.z,
        )
    }

    pub fn to_gpu(&self) -> InstanceGpu {
        InstanceGpu {
            model: self.transform.to_cols_array_2d(),
            color: self.color.to_array(),
        }
    }
}

/// Builds the instance set for a candle sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceBuilder {
    /// Horizontal distance between neighbouring candle centers.
    pub spacing: f32,
    /// Height that the full price range is normalized into.
    pub vertical_range: f32,
    pub palette: Palette,
}

impl Default for InstanceBuilder {
    fn default() -> Self {
        Self::new(CANDLE_SPACING, VERTICAL_RANGE)
    }
}

impl InstanceBuilder {
    pub fn new(spacing: f32, vertical_range: f32) -> Self {
        Self {
            spacing,
            vertical_range,
            palette: Palette::default(),
        }
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// X coordinate of the candle at `index` in a sequence of `count` candles.
    pub fn x_position(&self, index: usize, count: usize) -> f32 {
        -(count as f32) * self.spacing / 2.0 + index as f32 * self.spacing
    }

    /// Map the candles to `3 * candles.len()` instances.
    ///
    /// Output order is body, upper wick, lower wick for each candle, candles in
    /// input order. An empty slice yields no instances.
    pub fn build(&self, candles: &[Candle]) -> Vec<Instance> {
        let Some(range) = PriceRange::from_candles(candles) else {
            return Vec::new();
        };

        let mut instances = Vec::with_capacity(candles.len() * INSTANCES_PER_CANDLE);
        for (i, candle) in candles.iter().enumerate() {
            let x = self.x_position(i, candles.len());
            instances.extend_from_slice(&self.candle_instances(candle, x, &range));
        }
        instances
    }

    fn candle_instances(&self, candle: &Candle, x: f32, range: &PriceRange) -> [Instance; 3] {
        let normalize = |price: f32| range.normalize(price, self.vertical_range);
        let open = normalize(candle.open);
        let close = normalize(candle.close);
        let high = normalize(candle.high);
        let low = normalize(candle.low);

        let body_top = open.max(close);
        let body_bottom = open.min(close);
        let body_height = (body_top - body_bottom).max(MIN_BODY_HEIGHT);
        let body_color = if candle.is_bullish() {
            self.palette.bullish
        } else {
            self.palette.bearish
        };

        let body = Instance::new(
            Vec3::new(x, (body_top + body_bottom) / 2.0, 0.0),
            Vec3::new(BODY_WIDTH, body_height * SCALE_Y, BODY_DEPTH),
            body_color,
        );
        let upper_wick = Instance::new(
            Vec3::new(x, (body_top + high) / 2.0, 0.0),
            Vec3::new(WICK_WIDTH, (high - body_top).max(0.0) * SCALE_Y, WICK_WIDTH),
            self.palette.wick,
        );
        let lower_wick = Instance::new(
            Vec3::new(x, (low + body_bottom) / 2.0, 0.0),
            Vec3::new(WICK_WIDTH, (body_bottom - low).max(0.0) * SCALE_Y, WICK_WIDTH),
            self.palette.wick,
        );

        [body, upper_wick, lower_wick]
    }
}

/// Build instances with the default palette.
pub fn build_instances(candles: &[Candle], spacing: f32, vertical_range: f32) -> Vec<Instance> {
    InstanceBuilder::new(spacing, vertical_range).build(candles)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    fn two_candles() -> Vec<Candle> {
        vec![
            Candle::new(0.0, 1.0, 1.05, 0.95, 1.04),
            Candle::new(86400.0, 1.04, 1.06, 0.90, 0.91),
        ]
    }

    fn mixed_candles(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let base = 100.0 + (i as f32 * 0.7).sin() * 5.0;
                let close = base + if i % 3 == 0 { -1.5 } else { 1.0 };
                Candle::new(
                    i as f64 * 60.0,
                    base,
                    base.max(close) + 0.5,
                    base.min(close) - 0.5,
                    close,
                )
            })
            .collect()
    }

    #[test]
    fn test_empty_input_yields_no_instances() {
        assert!(build_instances(&[], 1.2, 10.0).is_empty());
    }

    #[test]
    fn test_three_instances_per_candle() {
        for count in [1, 2, 7, 102] {
            let instances = build_instances(&mixed_candles(count), 1.2, 10.0);
            assert_eq!(instances.len(), 3 * count);
        }
    }

    #[test]
    fn test_triples_are_body_then_wicks() {
        let palette = Palette::default();
        let candles = mixed_candles(10);
        let instances = build_instances(&candles, 1.2, 10.0);

        for (i, candle) in candles.iter().enumerate() {
            let body = &instances[3 * i];
            let upper = &instances[3 * i + 1];
            let lower = &instances[3 * i + 2];

            assert_eq!(body.scale().x, BODY_WIDTH);
            assert_eq!(body.scale().z, BODY_DEPTH);
            assert_eq!(upper.scale().x, WICK_WIDTH);
            assert_eq!(lower.scale().x, WICK_WIDTH);
            assert_eq!(upper.color, palette.wick);
            assert_eq!(lower.color, palette.wick);

            // All three share the candle's column.
            assert_eq!(body.translation().x, upper.translation().x);
            assert_eq!(body.translation().x, lower.translation().x);
            assert!(upper.translation().y >= body.translation().y);
            assert!(lower.translation().y <= body.translation().y);

            let expected = if candle.is_bullish() {
                palette.bullish
            } else {
                palette.bearish
            };
            assert_eq!(body.color, expected);
        }
    }

    #[test]
    fn test_two_candle_scenario() {
        let candles = two_candles();
        let range = PriceRange::from_candles(&candles).unwrap();
        assert!(approx(range.min, 0.90));
        assert!(approx(range.max, 1.06));

        let instances = build_instances(&candles, 1.2, 10.0);
        let palette = Palette::default();
        assert_eq!(instances[0].color, palette.bullish);
        assert_eq!(instances[3].color, palette.bearish);

        // x(i) = -N * S / 2 + i * S
        assert!(approx(instances[0].translation().x, -1.2));
        assert!(approx(instances[3].translation().x, 0.0));

        // Second candle spans the full range: low 0.90 -> 0, high 1.06 -> 10.
        let open = (1.04 - 0.90) / 0.16 * 10.0;
        let close = (0.91 - 0.90) / 0.16 * 10.0;
        let body = &instances[3];
        assert!(approx(body.translation().y, (open + close) / 2.0));
        assert!(approx(body.scale().y, (open - close) * SCALE_Y));

        let upper = &instances[4];
        assert!(approx(upper.translation().y, (open + 10.0) / 2.0));
        assert!(approx(upper.scale().y, (10.0 - open) * SCALE_Y));

        let lower = &instances[5];
        assert!(approx(lower.translation().y, close / 2.0));
        assert!(approx(lower.scale().y, close * SCALE_Y));
    }

    #[test]
    fn test_horizontal_placement() {
        let spacing = 1.5;
        let count = 9;
        let builder = InstanceBuilder::new(spacing, 10.0);
        let instances = builder.build(&mixed_candles(count));

        assert!(approx(
            instances[0].translation().x,
            -(count as f32) * spacing / 2.0
        ));
        for i in 0..count - 1 {
            let step = instances[3 * (i + 1)].translation().x - instances[3 * i].translation().x;
            assert!(approx(step, spacing));
        }
        let last = instances[3 * (count - 1)].translation().x;
        assert!(approx(builder.x_position(count - 1, count), last));
    }

    #[test]
    fn test_doji_body_keeps_minimum_height() {
        let candles = [
            Candle::new(0.0, 1.0, 1.2, 0.8, 1.0),
            Candle::new(60.0, 1.1, 1.1, 1.1, 1.1),
        ];
        let instances = build_instances(&candles, 1.2, 10.0);
        for i in 0..candles.len() {
            let body = &instances[3 * i];
            assert!(body.scale().y >= MIN_BODY_HEIGHT * SCALE_Y - 1e-6);
            assert_eq!(body.color, Palette::default().bearish);
        }
    }

    #[test]
    fn test_tall_body_is_not_floored() {
        let candles = [Candle::new(0.0, 1.0, 2.0, 1.0, 2.0)];
        let body = build_instances(&candles, 1.2, 10.0)[0];
        assert!(approx(body.scale().y, 10.0 * SCALE_Y));
    }

    #[test]
    fn test_marubozu_has_flat_wicks() {
        let candles = [
            Candle::new(0.0, 1.0, 1.5, 1.0, 1.5),
            Candle::new(60.0, 1.2, 1.3, 1.1, 1.25),
        ];
        let instances = build_instances(&candles, 1.2, 10.0);
        assert_eq!(instances[1].scale().y, 0.0);
        assert_eq!(instances[2].scale().y, 0.0);
        assert!(instances[4].scale().y > 0.0);
        assert!(instances[5].scale().y > 0.0);
    }

    #[test]
    fn test_inconsistent_wick_is_floored_to_zero() {
        // High below the body top.
        let candles = [
            Candle::new(0.0, 1.0, 1.2, 0.9, 1.3),
            Candle::new(60.0, 1.0, 1.4, 0.9, 1.1),
        ];
        let instances = build_instances(&candles, 1.2, 10.0);
        assert_eq!(instances[1].scale().y, 0.0);
    }

    #[test]
    fn test_flat_market_produces_finite_transforms() {
        let candles = vec![Candle::new(0.0, 1.02, 1.02, 1.02, 1.02); 5];
        let instances = build_instances(&candles, 1.2, 10.0);
        assert_eq!(instances.len(), 15);

        for instance in &instances {
            assert!(instance
                .transform
                .to_cols_array()
                .iter()
                .all(|v| v.is_finite()));
        }
        // Everything collapses onto the middle of the vertical range.
        assert!(approx(instances[0].translation().y, 5.0));
        assert!(approx(instances[0].scale().y, MIN_BODY_HEIGHT * SCALE_Y));
    }

    #[test]
    fn test_lower_low_reaches_further_down() {
        // Same body, different lows: the wick with the lower low reaches further down.
        let candles = [
            Candle::new(0.0, 1.0, 1.2, 0.90, 1.05),
            Candle::new(60.0, 1.0, 1.2, 0.80, 1.05),
        ];
        let instances = build_instances(&candles, 1.2, 10.0);
        let bottom = |wick: &Instance| wick.translation().y - wick.scale().y / SCALE_Y / 2.0;

        assert_eq!(instances[0].translation().y, instances[3].translation().y);
        assert!(instances[5].translation().y < instances[2].translation().y);
        assert!(bottom(&instances[5]) < bottom(&instances[2]));
        assert!(approx(bottom(&instances[5]), 0.0));
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let candles = mixed_candles(30);
        let builder = InstanceBuilder::default();
        assert_eq!(builder.build(&candles), builder.build(&candles));
    }

    #[test]
    fn test_custom_palette() {
        let palette = Palette {
            bullish: Vec4::new(0.1, 0.2, 0.3, 1.0),
            bearish: Vec4::new(0.4, 0.5, 0.6, 1.0),
            wick: Vec4::new(0.7, 0.8, 0.9, 1.0),
        };
        let builder = InstanceBuilder::default().with_palette(palette);
        let instances = builder.build(&two_candles());
        assert_eq!(instances[0].color, palette.bullish);
        assert_eq!(instances[1].color, palette.wick);
        assert_eq!(instances[3].color, palette.bearish);
    }

    #[test]
    fn test_gpu_layout_is_column_major() {
        let instance = Instance::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.4, 5.0, 0.2),
            Vec4::new(0.0, 1.0, 0.0, 1.0),
        );
        let gpu = instance.to_gpu();
        assert_eq!(gpu.model[0], [0.4, 0.0, 0.0, 0.0]);
        assert_eq!(gpu.model[1], [0.0, 5.0, 0.0, 0.0]);
        assert_eq!(gpu.model[2], [0.0, 0.0, 0.2, 0.0]);
        assert_eq!(gpu.model[3], [1.0, 2.0, 3.0, 1.0]);
        assert_eq!(gpu.color, [0.0, 1.0, 0.0, 1.0]);
    }
}
