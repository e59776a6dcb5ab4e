//! Reassemble demo - cut fixed-size frames out of uneven packets.
//!
//! This example demonstrates:
//! - Building an accumulator from a JSON config
//! - Feeding packets of random-looking sizes
//! - Flushing the trailing partial frame at end of stream
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=chunk_accumulator=trace cargo run --example reassemble
//! ```

use chunk_accumulator::{AccumulatorConfig, ChunkAccumulator};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let config = AccumulatorConfig::from_json(r#"{ "frame_size": 16, "queue_capacity": 4 }"#)?;
    let mut acc = ChunkAccumulator::from_config(&config)?;

    let stream: Vec<u8> = (0u8..=99).collect();
    let packet_sizes = [7usize, 3, 20, 1, 13, 31, 25];

    let mut offset = 0;
    for size in packet_sizes {
        let packet = stream[offset..offset + size].to_vec();
        offset += size;

        for frame in acc.feed(packet) {
            println!("frame: {:?}", &frame[..]);
        }
        println!("  buffered after {}-byte packet: {}", size, acc.buffered_len());
    }

    if let Some(rest) = acc.take_remainder() {
        println!("remainder ({} bytes): {:?}", rest.len(), &rest[..]);
    }

    Ok(())
}
