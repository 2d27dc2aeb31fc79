//! Run command implementation

use anyhow::{Context, Result};
use growable_common::verify_arg;

use crate::{
    commands::{Op, Session},
    utils::format_size,
};

pub fn run(
    capacity: usize,
    memory_limit: Option<u64>,
    keep_going: bool,
    json: bool,
    ops: Vec<String>,
) -> Result<()> {
    verify_arg!(ops, !ops.is_empty());
    let ops = ops
        .iter()
        .map(|text| Op::parse(text).with_context(|| format!("Invalid operation: {text}")))
        .collect::<Result<Vec<_>>>()?;

    let mut session = Session::new(capacity, memory_limit)?;
    if !json {
        match memory_limit {
            Some(limit) => println!(
                "Array of i64, capacity {capacity}, memory limit {}",
                format_size(limit)
            ),
            None => println!("Array of i64, capacity {capacity}"),
        }
    }

    for op in ops {
        let outcome = session.apply(op).map(|_| ());
        if !json {
            if let Some(step) = session.steps().last() {
                step.print();
            }
        }
        if !keep_going {
            outcome?;
        }
    }

    let summary = session.summary();
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Final state: {}", session.array());
        println!(
            "Heap: {} (peak {})",
            format_size(summary.heap_bytes as u64),
            format_size(summary.peak_heap_bytes)
        );
        if summary.failed_steps != 0 {
            println!("Failed steps: {}", summary.failed_steps);
        }
    }

    if summary.failed_steps != 0 {
        anyhow::bail!("{} operation(s) failed", summary.failed_steps);
    }
    Ok(())
}
