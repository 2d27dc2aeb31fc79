//! Demo command implementation

use anyhow::Result;

use crate::commands::{Op, Session};

/// Initial capacity of the walkthrough array; small enough that growth shows up
/// on the third append.
const DEMO_CAPACITY: usize = 2;

/// Operations of the ArrayList walkthrough, in order.
pub fn script() -> Vec<Op> {
    vec![
        Op::Append(10),
        Op::Append(20),
        Op::Append(30),
        Op::Append(40),
        Op::Append(50),
        Op::Get(2),
        Op::Set(2, 99),
        Op::RemoveAt(1),
        Op::Length,
        Op::Clear,
    ]
}

pub fn run(json: bool) -> Result<()> {
    let mut session = Session::new(DEMO_CAPACITY, None)?;

    if !json {
        println!("Growable array walkthrough");
        println!("  created with initial capacity: {DEMO_CAPACITY}");
        println!();
    }

    for op in script() {
        let step = session.apply(op)?;
        if !json {
            step.print();
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&session.summary())?);
    } else {
        println!();
        println!("Final state: {}", session.array());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkthrough_states() {
        let mut session = Session::new(DEMO_CAPACITY, None).unwrap();
        for op in script() {
            session.apply(op).unwrap();
        }

        let states = session
            .steps()
            .iter()
            .map(|s| s.state.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            states,
            [
                "[10] (size=1, capacity=2)",
                "[10, 20] (size=2, capacity=2)",
                "[10, 20, 30] (size=3, capacity=4)",
                "[10, 20, 30, 40] (size=4, capacity=4)",
                "[10, 20, 30, 40, 50] (size=5, capacity=8)",
                "[10, 20, 30, 40, 50] (size=5, capacity=8)",
                "[10, 20, 99, 40, 50] (size=5, capacity=8)",
                "[10, 99, 40, 50] (size=4, capacity=8)",
                "[10, 99, 40, 50] (size=4, capacity=8)",
                "[] (size=0, capacity=8)",
            ]
        );

        let grew = session
            .steps()
            .iter()
            .filter_map(|s| s.grew_to)
            .collect::<Vec<_>>();
        assert_eq!(grew, [4, 8]);

        assert_eq!(session.steps()[5].value, Some(30));
        assert_eq!(session.steps()[8].value, Some(4));
    }
}
