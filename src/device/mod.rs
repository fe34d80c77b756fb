mod sensor;
mod wheel;

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub use sensor::SENSOR;
pub use wheel::WHEEL;

use crate::error::Error;

/// Identification byte returned in GETINFO byte 1 by every scroll device.
pub const SCROLL_DEVICE_ID: u8 = 0x43;
/// GETINFO byte 0 for the circular wheel.
pub const WHEEL_MODEL_ID: u8 = 0x04;
/// GETINFO byte 0 for the linear sensor strip.
pub const SENSOR_MODEL_ID: u8 = 0x00;

/// Relative axis a variant reports motion on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisId {
    Wheel,
    HWheel,
}

/// Button a variant reports its press flag as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonId {
    /// Center of the wheel.
    Middle,
    /// Unmarked spot on the bezel next to the sensor strip.
    Side,
}

/// Per-variant behaviour: naming, event identity and the difference rule.
#[derive(Debug, Clone, Copy)]
pub struct VariantPolicy {
    pub name: &'static str,
    pub axis: AxisId,
    pub button: ButtonId,
    /// Size of the circular position domain, `None` for a linear strip.
    pub wrap: Option<i32>,
}

impl VariantPolicy {
    /// Signed motion from `reference` to `position`.
    ///
    /// On a circular domain the shorter arc wins, so crossing the 0/4095
    /// seam yields a small delta with the true direction. The result always
    /// lies in `(-range / 2, range / 2]`.
    pub fn difference(&self, reference: u16, position: u16) -> i32 {
        let delta = position as i32 - reference as i32;
        let Some(range) = self.wrap else {
            return delta;
        };

        let half = range / 2;
        if delta > half {
            delta - range
        } else if delta <= -half {
            delta + range
        } else {
            delta
        }
    }
}

/// Which kind of scroll device is attached. Fixed for the device lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeviceVariant {
    #[default]
    Wheel,
    Sensor,
}

impl DeviceVariant {
    pub fn policy(&self) -> &'static VariantPolicy {
        match self {
            DeviceVariant::Wheel => &WHEEL,
            DeviceVariant::Sensor => &SENSOR,
        }
    }

    /// Resolve the variant from a GETINFO response (`[model, id, ..]`).
    pub fn identify(getinfo: &[u8]) -> Result<Self, Error> {
        let (model, id) = match getinfo {
            [model, id, ..] => (*model, *id),
            _ => return Err(Error::NotScrollDevice { id: 0 }),
        };

        if id != SCROLL_DEVICE_ID {
            return Err(Error::NotScrollDevice { id });
        }

        let variant = match model {
            WHEEL_MODEL_ID => DeviceVariant::Wheel,
            SENSOR_MODEL_ID => DeviceVariant::Sensor,
            other => return Err(Error::UnknownVariant { id: other }),
        };

        log::info!("Detected {}", variant.policy().name);
        Ok(variant)
    }
}

impl fmt::Display for DeviceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeviceVariant::Wheel => write!(f, "wheel"),
            DeviceVariant::Sensor => write!(f, "sensor"),
        }
    }
}

impl FromStr for DeviceVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "wheel" => Ok(DeviceVariant::Wheel),
            "sensor" => Ok(DeviceVariant::Sensor),
            _ => Err(format!("Invalid variant '{}'. Valid values: wheel, sensor", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_wheel_crosses_seam_forward() {
        assert_eq!(WHEEL.difference(4090, 5), 11);
    }

    #[test]
    fn test_wheel_crosses_seam_backward() {
        assert_eq!(WHEEL.difference(5, 4090), -11);
    }

    #[test]
    fn test_wheel_half_turn_is_positive() {
        assert_eq!(WHEEL.difference(0, 2048), 2048);
        assert_eq!(WHEEL.difference(2048, 0), 2048);
    }

    #[test]
    fn test_sensor_is_linear() {
        assert_eq!(SENSOR.difference(100, 40), -60);
        assert_eq!(SENSOR.difference(0, 4095), 4095);
        assert_eq!(SENSOR.difference(4095, 0), -4095);
    }

    #[test]
    fn test_identify() {
        assert_eq!(DeviceVariant::identify(&[0x04, 0x43, 0x00]).unwrap(), DeviceVariant::Wheel);
        assert_eq!(DeviceVariant::identify(&[0x00, 0x43]).unwrap(), DeviceVariant::Sensor);
        assert!(matches!(
            DeviceVariant::identify(&[0x04, 0x47, 0x00]),
            Err(Error::NotScrollDevice { id: 0x47 })
        ));
        assert!(matches!(
            DeviceVariant::identify(&[0x02, 0x43, 0x00]),
            Err(Error::UnknownVariant { id: 0x02 })
        ));
        assert!(DeviceVariant::identify(&[]).is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!("wheel".parse::<DeviceVariant>().unwrap(), DeviceVariant::Wheel);
        assert_eq!("Sensor".parse::<DeviceVariant>().unwrap(), DeviceVariant::Sensor);
        assert!("dial".parse::<DeviceVariant>().is_err());
    }

    #[test]
    fn test_policies_are_distinct() {
        assert_eq!(DeviceVariant::Wheel.policy().axis, AxisId::Wheel);
        assert_eq!(DeviceVariant::Sensor.policy().axis, AxisId::HWheel);
        assert_eq!(DeviceVariant::Wheel.policy().button, ButtonId::Middle);
        assert_eq!(DeviceVariant::Sensor.policy().button, ButtonId::Side);
    }

    proptest! {
        #[test]
        fn wheel_difference_is_shortest_arc(reference in 0u16..4096, position in 0u16..4096) {
            let delta = WHEEL.difference(reference, position);
            prop_assert!(delta > -2048 && delta <= 2048);
            prop_assert_eq!((reference as i32 + delta).rem_euclid(4096), position as i32);
        }

        #[test]
        fn sensor_difference_is_plain_subtraction(reference in 0u16..4096, position in 0u16..4096) {
            let expected = position as i32 - reference as i32;
            prop_assert_eq!(SENSOR.difference(reference, position), expected);
        }
    }
}
