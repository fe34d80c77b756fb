//! Print decoded packets and the events they produce, for debugging.
//! Run: fjs-scroll --input /dev/serio_raw0 dump

use std::io::Read;

use crate::driver::ScrollDevice;
use crate::frame;
use crate::sink::{EventSink, LogSink};
use crate::transport::FrameReader;

pub fn run_dump(
    reader: &mut FrameReader<impl Read>,
    device: &mut ScrollDevice,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    eprintln!(
        "Dumping {} packets (Ctrl+C to stop):\n",
        device.variant().policy().name
    );

    let mut sink = LogSink::default();
    let mut n = 0u64;

    while let Some(raw) = reader.next_frame()? {
        n += 1;
        let sample = frame::decode_frame(&raw);
        let events = device.process_sample(&sample);
        println!(
            "{:6}  {:02x?}  weight={:2} position={:4} pressed={} touching={}",
            n,
            raw,
            sample.weight,
            sample.position,
            sample.pressed as u8,
            device.tracker().state().touching as u8
        );
        sink.emit(&events)?;
    }

    eprintln!("\n{} packets, {} bytes dropped", n, reader.dropped());
    Ok(())
}
