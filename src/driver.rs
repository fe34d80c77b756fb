//! One attached scroll device: decode, track, hand off to a sink.

use std::io::Read;

use crate::device::DeviceVariant;
use crate::error::Error;
use crate::frame::{self, Sample};
use crate::sink::EventSink;
use crate::tracker::{Events, MotionTracker, TrackerConfig};
use crate::transport::FrameReader;

pub struct ScrollDevice {
    variant: DeviceVariant,
    tracker: MotionTracker,
}

impl ScrollDevice {
    /// Start tracking a freshly identified device. Detach is drop.
    pub fn attach(variant: DeviceVariant, config: TrackerConfig) -> Self {
        log::info!(
            "Attached {} (weight >= {}, threshold {}, bitshift {}{})",
            variant.policy().name,
            config.weight_threshold,
            config.position_change_threshold,
            config.movement_bitshift,
            if config.send_events { "" } else { ", events off" }
        );
        Self {
            variant,
            tracker: MotionTracker::new(variant, config),
        }
    }

    pub fn variant(&self) -> DeviceVariant {
        self.variant
    }

    pub fn tracker(&self) -> &MotionTracker {
        &self.tracker
    }

    /// Decode and track one packet. A malformed packet leaves the tracker
    /// untouched.
    pub fn process_frame(&mut self, bytes: &[u8]) -> Result<Events, Error> {
        let sample = frame::decode(bytes)?;
        if self.tracker.config().log_packets {
            log_packet(bytes, &sample);
        }
        Ok(self.process_sample(&sample))
    }

    /// Track an already decoded packet.
    pub fn process_sample(&mut self, sample: &Sample) -> Events {
        self.tracker.process(sample)
    }
}

fn log_packet(bytes: &[u8], sample: &Sample) {
    log::debug!(
        "packet {:02x?} weight={} position={} pressed={}",
        bytes,
        sample.weight,
        sample.position,
        sample.pressed
    );
}

/// Forward every packet from `reader` to `sink` until the stream ends.
pub fn run(
    reader: &mut FrameReader<impl Read>,
    device: &mut ScrollDevice,
    sink: &mut impl EventSink,
) -> Result<u64, Error> {
    let mut frame_count: u64 = 0;

    while let Some(raw) = reader.next_frame()? {
        let events = device.process_frame(&raw)?;
        sink.emit(&events)?;

        if frame_count == 0 {
            log::info!("{} events flowing", device.variant().policy().name);
        }
        frame_count += 1;

        if frame_count.is_multiple_of(500) {
            log::debug!(
                "Frames processed: {}, bytes dropped: {}",
                frame_count,
                reader.dropped()
            );
        }
    }

    log::info!("Input stream ended after {} frames", frame_count);
    Ok(frame_count)
}
