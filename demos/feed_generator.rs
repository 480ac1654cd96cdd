/// Synthetic PITCH text feed generator
///
/// Creates realistic Add/Execute order flow, mixed with pass-through message
/// types, and writes one record per line to stdout or a file.
/// Useful for testing and benchmarking.

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use rand::Rng;

const SYMBOLS: [&str; 8] = ["AAPL", "MSFT", "SPY", "QQQ", "IBM", "BRK B", "DRYS", "ZVZZT"];

fn main() -> std::io::Result<()> {
    let args: Vec<String> = env::args().collect();

    let output_path = if args.len() > 1 {
        args[1].clone()
    } else {
        "pitch_example_data".to_string()
    };

    let message_count: usize = if args.len() > 2 {
        args[2].parse().unwrap_or(10000)
    } else {
        10000
    };

    let mut output: Box<dyn Write> = if output_path == "stdout" {
        Box::new(std::io::stdout())
    } else {
        Box::new(BufWriter::new(File::create(&output_path)?))
    };

    let mut rng = rand::thread_rng();
    // (order id, remaining shares) of orders still open
    let mut open_orders: Vec<(u64, u32)> = Vec::new();
    let mut order_id_counter = 1000u64;
    let mut timestamp = 28_800_000u32;

    eprintln!("Generating {} messages to {}", message_count, output_path);

    for i in 0..message_count {
        timestamp += rng.gen_range(1u32..50);
        let marker = if rng.gen_bool(0.5) { "S" } else { "" };
        let roll = rng.gen_range(0u8..10);

        if roll < 5 || open_orders.is_empty() {
            // AddOrder
            let order_id = order_id_counter;
            order_id_counter += 1;
            let shares = rng.gen_range(1u32..1000) * 10;
            let side = if rng.gen_bool(0.5) { 'B' } else { 'S' };
            let symbol = SYMBOLS[rng.gen_range(0..SYMBOLS.len())];
            let price = rng.gen_range(1_0000u32..500_0000);

            writeln!(
                output,
                "{}{:08}A{:012X}{}{:06}{:<6}{:010}Y",
                marker, timestamp, order_id, side, shares, symbol, price
            )?;
            open_orders.push((order_id, shares));
        } else if roll < 9 {
            // ExecuteOrder, occasionally over-executing
            let idx = rng.gen_range(0..open_orders.len());
            let (order_id, remaining) = open_orders[idx];
            let executed = if rng.gen_bool(0.1) {
                remaining + rng.gen_range(1u32..100)
            } else {
                rng.gen_range(0..=remaining)
            };

            writeln!(
                output,
                "{}{:08}E{:012X}{:06}{:012X}",
                marker, timestamp, order_id, executed.min(999_999), i
            )?;

            if executed <= remaining {
                open_orders[idx].1 -= executed;
            }
            if open_orders[idx].1 == 0 {
                open_orders.swap_remove(idx);
            }
        } else {
            // OrderCancel, ignored by the volume pipeline
            let (order_id, _) = open_orders[rng.gen_range(0..open_orders.len())];
            writeln!(
                output,
                "{}{:08}X{:012X}{:06}",
                marker, timestamp, order_id, rng.gen_range(1u32..100)
            )?;
        }

        if i % 1000 == 0 && i > 0 {
            eprintln!("Generated {} messages", i);
        }
    }

    output.flush()?;
    eprintln!("Feed generation complete: {} messages", message_count);

    Ok(())
}
