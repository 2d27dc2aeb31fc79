use std::sync::{Arc, Mutex};

use growable_array::{Budget, BudgetedHeap, GrowableArray};
use growable_common::error::ErrorKind;

#[test]
fn test_appends_are_retrievable_in_order() {
    for n in [0usize, 1, 2, 3, 7, 8, 9, 1000] {
        let mut array = GrowableArray::new();
        for i in 0..n {
            array.append(i * 3).unwrap();
        }
        assert_eq!(array.len(), n);
        for i in 0..n {
            assert_eq!(*array.get(i).unwrap(), i * 3);
        }
    }
}

#[test]
fn test_walkthrough_scenarios() {
    let mut array = GrowableArray::with_capacity(2).unwrap();
    array.extend_from_slice(&[10, 20, 30]).unwrap();
    assert_eq!((array.len(), array.capacity()), (3, 4));
    assert_eq!(array, [10, 20, 30]);

    let mut array = GrowableArray::with_capacity(0).unwrap();
    array.append(5).unwrap();
    assert_eq!((array.len(), array.capacity()), (1, 1));
    assert_eq!(*array.get(0).unwrap(), 5);

    let mut array = GrowableArray::with_capacity(3).unwrap();
    array.extend_from_slice(&[1, 2, 3]).unwrap();
    array.remove_at(0).unwrap();
    assert_eq!(array, [2, 3]);
    assert_eq!(array.len(), 2);

    let array = GrowableArray::from_slice(&[1, 2, 3]).unwrap();
    assert_eq!(
        array.get(5).unwrap_err().into_kind(),
        ErrorKind::IndexOutOfRange {
            index: 5,
            length: 3
        }
    );
}

#[test]
fn test_arrays_share_one_budget() {
    let budget = Budget::new(64);
    let mut first =
        GrowableArray::<u64, _>::with_capacity_in(4, BudgetedHeap::new(budget.clone())).unwrap();
    let mut second =
        GrowableArray::<u64, _>::with_capacity_in(2, BudgetedHeap::new(budget.clone())).unwrap();
    assert_eq!(budget.used(), 48);

    first.extend_from_slice(&[1, 2, 3, 4]).unwrap();
    // Doubling `first` to 8 slots needs 32 more bytes; only 16 are left.
    assert!(first.append(5).unwrap_err().is_out_of_memory());

    second.extend_from_slice(&[1, 2, 3, 4]).unwrap();
    assert_eq!(budget.used(), 64);

    drop(first);
    assert_eq!(budget.used(), 32);
    second.append(5).unwrap();
    assert_eq!(budget.used(), 64);
    assert_eq!(budget.peak(), 64);
}

#[test]
fn test_shared_readers_behind_a_lock() {
    let array = Arc::new(Mutex::new(GrowableArray::<u32>::create().unwrap()));
    let handles = (0..4)
        .map(|t| {
            let array = array.clone();
            std::thread::spawn(move || {
                for i in 0..100 {
                    array.lock().unwrap().append(t * 1000 + i).unwrap();
                }
            })
        })
        .collect::<Vec<_>>();
    for h in handles {
        h.join().unwrap();
    }

    let array = array.lock().unwrap();
    assert_eq!(array.len(), 400);
    assert_eq!(array.capacity(), 512);
    let mut values = array.iter().copied().collect::<Vec<_>>();
    values.sort_unstable();
    let expected = (0..4)
        .flat_map(|t| (0..100).map(move |i| t * 1000 + i))
        .collect::<Vec<_>>();
    assert_eq!(values, expected);
}
