//! Deliver tracker output: a uinput device for normal runs, stdout for dumps.

use evdevil::event::{InputEvent, Key, KeyEvent, KeyState, Rel, RelEvent};
use evdevil::uinput::UinputDevice;
use evdevil::{Bus, InputId};

use crate::device::{AxisId, ButtonId, VariantPolicy};
use crate::error::Error;
use crate::tracker::Events;

/// PS/2 aux port bus, as psmouse reports it.
const BUS_I8042: u16 = 0x11;
const PSMOUSE_VENDOR: u16 = 0x0002;
const SCROLL_PRODUCT: u16 = 0x0043;

/// Receives the events of one sample at a time, in arrival order.
pub trait EventSink {
    fn emit(&mut self, events: &Events) -> Result<(), Error>;
}

fn rel_for(axis: AxisId) -> Rel {
    match axis {
        AxisId::Wheel => Rel::WHEEL,
        AxisId::HWheel => Rel::HWHEEL,
    }
}

fn key_for(button: ButtonId) -> Key {
    match button {
        ButtonId::Middle => Key::BTN_MIDDLE,
        ButtonId::Side => Key::BTN_SIDE,
    }
}

/// Translate one sample's events. Zero deltas are dropped; evdev would
/// filter them anyway.
fn to_input_events(events: &Events) -> Vec<InputEvent> {
    let mut batch = Vec::with_capacity(2);

    if let Some(motion) = events.motion.filter(|m| m.delta != 0) {
        batch.push(RelEvent::new(rel_for(motion.axis), motion.delta).into());
    }
    if let Some(press) = events.press {
        let state = if press.pressed {
            KeyState::PRESSED
        } else {
            KeyState::RELEASED
        };
        batch.push(KeyEvent::new(key_for(press.button), state).into());
    }

    batch
}

pub struct UinputSink {
    device: UinputDevice,
}

impl UinputSink {
    pub fn create(policy: &VariantPolicy) -> Result<Self, Error> {
        let device = UinputDevice::builder()?
            .with_input_id(InputId::new(
                Bus::from_raw(BUS_I8042),
                PSMOUSE_VENDOR,
                SCROLL_PRODUCT,
                0,
            ))?
            .with_rel_axes([rel_for(policy.axis)])?
            .with_keys([key_for(policy.button)])?
            .build(&format!("Fujitsu {}", policy.name))?;

        if let Ok(name) = device.sysname() {
            log::info!(
                "{} device ready: /sys/devices/virtual/input/{}",
                policy.name,
                name.to_string_lossy()
            );
        }

        Ok(Self { device })
    }
}

impl EventSink for UinputSink {
    fn emit(&mut self, events: &Events) -> Result<(), Error> {
        let batch = to_input_events(events);
        if batch.is_empty() {
            return Ok(());
        }

        self.device.writer().write_events(&batch)?.finish()?;
        Ok(())
    }
}

/// Prints events to stdout.
#[derive(Default)]
pub struct LogSink {
    count: u64,
}

impl EventSink for LogSink {
    fn emit(&mut self, events: &Events) -> Result<(), Error> {
        if let Some(motion) = events.motion {
            self.count += 1;
            println!("{:6}  REL_{:?}  delta={}", self.count, motion.axis, motion.delta);
        }
        if let Some(press) = events.press {
            self.count += 1;
            println!(
                "{:6}  BTN_{:?}  {}",
                self.count,
                press.button,
                if press.pressed { "pressed" } else { "released" }
            );
        }
        Ok(())
    }
}

/// Keeps every non-empty batch, for tests.
#[cfg(test)]
#[derive(Default)]
pub struct MemorySink {
    pub batches: Vec<Events>,
}

#[cfg(test)]
impl EventSink for MemorySink {
    fn emit(&mut self, events: &Events) -> Result<(), Error> {
        if !events.is_empty() {
            self.batches.push(*events);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::{MotionEvent, PressEvent};

    #[test]
    fn test_motion_then_press() {
        let events = Events {
            motion: Some(MotionEvent {
                axis: AxisId::Wheel,
                delta: -3,
            }),
            press: Some(PressEvent {
                button: ButtonId::Middle,
                pressed: true,
            }),
        };
        let batch = to_input_events(&events);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].raw_code(), Rel::WHEEL.raw());
        assert_eq!(batch[0].raw_value(), -3);
        assert_eq!(batch[1].raw_code(), Key::BTN_MIDDLE.raw());
        assert_eq!(batch[1].raw_value(), 1);
    }

    #[test]
    fn test_zero_delta_dropped() {
        let events = Events {
            motion: Some(MotionEvent {
                axis: AxisId::HWheel,
                delta: 0,
            }),
            press: None,
        };
        assert!(to_input_events(&events).is_empty());
    }

    #[test]
    fn test_release_maps_to_zero() {
        let events = Events {
            motion: None,
            press: Some(PressEvent {
                button: ButtonId::Side,
                pressed: false,
            }),
        };
        let batch = to_input_events(&events);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].raw_code(), Key::BTN_SIDE.raw());
        assert_eq!(batch[0].raw_value(), 0);
    }
}
