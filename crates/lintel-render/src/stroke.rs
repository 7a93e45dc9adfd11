//! Per-segment stroke styles, including split gradients for links that wrap across rows.

use crate::scene::SegmentGradient;
use lintel_core::{Color, LinkStyle, Stroke};
use palette::Srgb;

/// Resolved paint for one row segment of a link.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentPaint {
    pub style: String,
    pub gradient: Option<SegmentGradient>,
}

/// Mixes two colours in sRGB; `factor` is clamped to `[0, 1]`.
pub fn mix(from: Color, to: Color, factor: f64) -> Color {
    let t = factor.clamp(0.0, 1.0) as f32;
    let a: Srgb<f32> = from.0.into_format();
    let b: Srgb<f32> = to.0.into_format();
    let lerp = |x: f32, y: f32| x + (y - x) * t;
    let mixed = Srgb::new(lerp(a.red, b.red), lerp(a.green, b.green), lerp(a.blue, b.blue));
    Color(mixed.into_format())
}

/// Colour stops for segment `index` of `count`, reaching `overshoot` past its own share on
/// both sides so neighbouring rows blend into each other.
pub fn gradient_stops(
    from: Color,
    to: Color,
    index: usize,
    count: usize,
    overshoot: f64,
) -> (Color, Color) {
    let count = count.max(1) as f64;
    let start = index as f64 / count - overshoot;
    let end = (index + 1) as f64 / count + overshoot;
    (mix(from, to, start), mix(from, to, end))
}

fn css(stroke: &str, style: &LinkStyle) -> String {
    let mut out = format!(
        "fill:none;stroke:{stroke};stroke-width:{};stroke-opacity:{};",
        style.width, style.opacity
    );
    if let Some(dash) = style.dasharray.as_deref() {
        out.push_str("stroke-dasharray:");
        out.push_str(dash);
        out.push(';');
    }
    out
}

/// One paint per segment of a link spanning `count` rows. Gradient ids are `{id_prefix}-{n}`.
pub fn segment_paints(
    id_prefix: &str,
    style: &LinkStyle,
    count: usize,
    overshoot: f64,
) -> Vec<SegmentPaint> {
    (0..count)
        .map(|index| match style.stroke {
            Stroke::Solid { color } => SegmentPaint {
                style: css(&color.to_hex(), style),
                gradient: None,
            },
            Stroke::Gradient { from, to } => {
                let (from, to) = gradient_stops(from, to, index, count, overshoot);
                let id = format!("{id_prefix}-{index}");
                SegmentPaint {
                    style: css(&format!("url(#{id})"), style),
                    gradient: Some(SegmentGradient { id, from, to }),
                }
            }
        })
        .collect()
}
