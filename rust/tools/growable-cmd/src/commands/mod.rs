//! Command implementations for growable-cmd

use std::fmt;

use anyhow::{Context, Result, anyhow};
use growable_array::{Budget, BudgetedHeap, GrowableArray};
use growable_common::error::Error;
use serde::Serialize;

pub mod demo;
pub mod run;

/// One scripted operation on an array of `i64`.
///
/// Indices are kept signed so that a script can ask for a negative index and get
/// an out-of-range report rather than a parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Append(i64),
    Get(i64),
    Set(i64, i64),
    RemoveAt(i64),
    Length,
    Clear,
}

impl Op {
    /// Parses `push:V`, `get:I`, `set:I:V`, `remove:I`, `len` or `clear`.
    pub fn parse(text: &str) -> growable_common::Result<Op> {
        let mut parts = text.trim().split(':');
        let name = parts.next().unwrap_or_default();
        let args = parts.collect::<Vec<_>>();

        let op = match (name.to_ascii_lowercase().as_str(), args.as_slice()) {
            ("push" | "append" | "add", [value]) => Op::Append(parse_int("value", value)?),
            ("get", [index]) => Op::Get(parse_int("index", index)?),
            ("set", [index, value]) => {
                Op::Set(parse_int("index", index)?, parse_int("value", value)?)
            }
            ("remove" | "remove_at", [index]) => Op::RemoveAt(parse_int("index", index)?),
            ("len" | "length" | "size", []) => Op::Length,
            ("clear", []) => Op::Clear,
            _ => {
                return Err(Error::invalid_arg(
                    "op",
                    format!("unrecognized operation '{text}'"),
                ));
            }
        };
        Ok(op)
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Op::Append(value) => write!(f, "append({value})"),
            Op::Get(index) => write!(f, "get({index})"),
            Op::Set(index, value) => write!(f, "set({index}, {value})"),
            Op::RemoveAt(index) => write!(f, "remove_at({index})"),
            Op::Length => f.write_str("length()"),
            Op::Clear => f.write_str("clear()"),
        }
    }
}

fn parse_int(name: &str, text: &str) -> growable_common::Result<i64> {
    text.trim()
        .parse()
        .map_err(|e| Error::invalid_arg(name, format!("'{text}': {e}")))
}

/// Outcome of one applied operation.
#[derive(Debug, Clone, Serialize)]
pub struct StepRecord {
    pub op: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grew_to: Option<usize>,
    pub length: usize,
    pub capacity: usize,
    #[serde(skip)]
    pub state: String,
}

impl StepRecord {
    /// Prints the step the way the ArrayList walkthrough does: a growth notice
    /// when capacity changed, then the operation with its result or the state.
    pub fn print(&self) {
        if let Some(capacity) = self.grew_to {
            println!("  grew to capacity: {capacity}");
        }
        match (&self.error, self.value) {
            (Some(error), _) => println!("  {}: error: {error}", self.op),
            (None, Some(value)) => println!("  {} = {value}", self.op),
            (None, None) => println!("  {}: {}", self.op, self.state),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Summary {
    pub length: usize,
    pub capacity: usize,
    pub heap_bytes: usize,
    pub peak_heap_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_limit: Option<u64>,
    pub failed_steps: usize,
    pub items: Vec<i64>,
    pub steps: Vec<StepRecord>,
}

/// An array under test together with the log of operations applied to it.
pub struct Session {
    array: GrowableArray<i64, BudgetedHeap>,
    steps: Vec<StepRecord>,
}

impl Session {
    pub fn new(capacity: usize, memory_limit: Option<u64>) -> Result<Session> {
        let budget = memory_limit.map_or_else(Budget::unlimited, Budget::new);
        let array = GrowableArray::with_capacity_in(capacity, BudgetedHeap::new(budget))
            .with_context(|| format!("Failed to create array with capacity {capacity}"))?;
        Ok(Session {
            array,
            steps: Vec::new(),
        })
    }

    pub fn array(&self) -> &GrowableArray<i64, BudgetedHeap> {
        &self.array
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Applies `op` and records the outcome. A failing operation is recorded too
    /// and then returned as the error.
    pub fn apply(&mut self, op: Op) -> Result<&StepRecord> {
        let capacity_before = self.array.capacity();
        let outcome = self.execute(op);

        let capacity = self.array.capacity();
        let (value, error) = match &outcome {
            Ok(value) => (*value, None),
            Err(e) => (None, Some(e.to_string())),
        };
        self.steps.push(StepRecord {
            op: op.to_string(),
            value,
            error,
            grew_to: (capacity != capacity_before).then_some(capacity),
            length: self.array.len(),
            capacity,
            state: self.array.to_string(),
        });

        let index = self.steps.len() - 1;
        outcome.with_context(|| format!("Step {} `{op}` failed", index + 1))?;
        Ok(&self.steps[index])
    }

    fn execute(&mut self, op: Op) -> Result<Option<i64>> {
        match op {
            Op::Append(value) => {
                self.array.append(value)?;
                Ok(None)
            }
            Op::Get(index) => {
                let index = self.index(index)?;
                Ok(Some(*self.array.get(index)?))
            }
            Op::Set(index, value) => {
                let index = self.index(index)?;
                self.array.set(index, value)?;
                Ok(None)
            }
            Op::RemoveAt(index) => {
                let index = self.index(index)?;
                self.array.remove_at(index)?;
                Ok(None)
            }
            Op::Length => Ok(Some(self.array.len() as i64)),
            Op::Clear => {
                self.array.clear();
                Ok(None)
            }
        }
    }

    fn index(&self, index: i64) -> Result<usize> {
        usize::try_from(index).map_err(|_| {
            anyhow!(
                "index {index} out of range for length {}",
                self.array.len()
            )
        })
    }

    pub fn summary(&self) -> Summary {
        let budget = self.array.allocator().budget();
        Summary {
            length: self.array.len(),
            capacity: self.array.capacity(),
            heap_bytes: self.array.heap_size(),
            peak_heap_bytes: budget.peak(),
            memory_limit: (!budget.is_unlimited()).then(|| budget.limit()),
            failed_steps: self.steps.iter().filter(|s| s.error.is_some()).count(),
            items: self.array.iter().copied().collect(),
            steps: self.steps.clone(),
        }
    }
}
