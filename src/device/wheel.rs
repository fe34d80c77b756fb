use super::{AxisId, ButtonId, VariantPolicy};

/// Circular scroll wheel. Position is an angle that increases clockwise and
/// rolls over from 0xFFF to 0 at 12 o'clock; the press bit is the center.
pub const WHEEL: VariantPolicy = VariantPolicy {
    name: "Scroll Wheel",
    axis: AxisId::Wheel,
    button: ButtonId::Middle,
    wrap: Some(4096),
};
