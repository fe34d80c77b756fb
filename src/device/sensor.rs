use super::{AxisId, ButtonId, VariantPolicy};

/// Linear scroll sensor strip. Lower positions are to the right.
///
/// The press bit reports a spot on the bezel about 0.5cm left of the strip,
/// and can be set while weight and position are both zero.
pub const SENSOR: VariantPolicy = VariantPolicy {
    name: "Scroll Sensor",
    axis: AxisId::HWheel,
    button: ButtonId::Side,
    wrap: None,
};
