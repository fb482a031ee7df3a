/// Validation tests across the whole heap surface.
///
/// These tests verify:
/// 1. **End-to-end scenario** - the task-queue walk-through from push to drain
/// 2. **Heap invariant** - holds after every mutating call on random workloads
/// 3. **Order law** - pops are non-decreasing and FIFO among equal priorities
/// 4. **Snapshot round trip** - scopes leave the multiset of entries untouched
/// 5. **Size law** - `len` tracks pushes minus extractions exactly
#[cfg(test)]
mod tests {
    use crate::{HeapError, Item, MinHeap};
    use proptest::prelude::*;

    type Task = (&'static str, u32);

    // ---------------------------------------------------------------
    // Helpers
    // ---------------------------------------------------------------

    fn task_queue() -> MinHeap<Task> {
        let mut heap = MinHeap::new();
        let items = [
            (5, ("task1", 1)),
            (2, ("task2", 2)),
            (8, ("task3", 3)),
            (1, ("task4", 4)),
        ];
        for (priority, value) in items {
            heap.push_with_priority(value, priority);
        }
        heap
    }

    fn entries(heap: &MinHeap<u32>) -> Vec<(i64, u32)> {
        let mut out: Vec<(i64, u32)> =
            heap.nodes.iter().map(|n| (n.priority, n.value)).collect();
        out.sort_unstable();
        out
    }

    /// One mutating call against a heap of `u32` ids.
    #[derive(Debug, Clone)]
    enum Op {
        Push(i64),
        Pop,
        Bulk(Vec<i64>),
        Update(u32, i64),
        Remove(u32),
        Merge(Vec<i64>),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (-20i64..20).prop_map(Op::Push),
            3 => Just(Op::Pop),
            1 => prop::collection::vec(-20i64..20, 0..12).prop_map(Op::Bulk),
            2 => (0u32..64, -20i64..20).prop_map(|(id, p)| Op::Update(id, p)),
            2 => (0u32..64).prop_map(Op::Remove),
            1 => prop::collection::vec(-20i64..20, 0..8).prop_map(Op::Merge),
        ]
    }

    /// Applies `op`, handing out fresh ids from `next_id`. Returns the
    /// change in live entries the op should have caused.
    fn apply(heap: &mut MinHeap<u32>, op: &Op, next_id: &mut u32) -> isize {
        let mut fresh = || {
            let id = *next_id;
            *next_id += 1;
            id
        };
        match op {
            Op::Push(p) => {
                heap.push_with_priority(fresh(), *p);
                1
            }
            Op::Pop => heap.pop().map_or(0, |_| -1),
            Op::Bulk(ps) => {
                let batch: Vec<(i64, u32)> = ps.iter().map(|&p| (p, fresh())).collect();
                heap.bulk_push_with_priority(batch);
                ps.len() as isize
            }
            Op::Update(id, p) => {
                heap.update_priority(id, *p);
                0
            }
            Op::Remove(id) => isize::from(heap.remove(id)).wrapping_neg(),
            Op::Merge(ps) => {
                let mut other = MinHeap::new();
                for &p in ps {
                    other.push_with_priority(fresh(), p);
                }
                heap.merge(other);
                ps.len() as isize
            }
        }
    }

    // ---------------------------------------------------------------
    // 1. End-to-end scenario
    // ---------------------------------------------------------------

    #[test]
    fn test_scenario_peek_minimum() {
        let heap = task_queue();
        assert_eq!(heap.peek(), Some((1, &("task4", 4))));
    }

    #[test]
    fn test_scenario_k_smallest_leaves_heap() {
        let mut heap = task_queue();
        let smallest = heap.k_smallest(2);
        assert_eq!(smallest, vec![("task4", 4), ("task2", 2)]);
        assert_eq!(heap.len(), 4);
    }

    #[test]
    fn test_scenario_snapshot_scope() {
        let mut heap = task_queue();
        {
            let mut scope = heap.snapshot();
            scope.pop();
            scope.pop();
            assert_eq!(scope.len(), 2);
        }
        assert_eq!(heap.len(), 4);
    }

    #[test]
    fn test_scenario_full_walkthrough() {
        let mut heap = MinHeap::<Task>::with_key(|task: &Task| i64::from(task.1));
        for (priority, value) in [
            (5, ("task1", 1)),
            (2, ("task2", 2)),
            (8, ("task3", 3)),
            (1, ("task4", 4)),
        ] {
            heap.push_with_priority(value, priority);
        }
        assert_eq!(heap.peek().map(|(_, v)| v.0), Some("task4"));
        assert_eq!(heap.k_smallest(2), vec![("task4", 4), ("task2", 2)]);

        assert!(heap.update_priority(&("task3", 3), 0));
        assert_eq!(heap.peek(), Some((0, &("task3", 3))));

        let mut other = MinHeap::new();
        other.push_with_priority(("task5", 5), 3);
        heap.merge(other);
        assert_eq!(heap.len(), 5);

        heap.bulk_push([("task6", 6), ("task7", 7)]).unwrap();
        assert_eq!(heap.len(), 7);

        let drained: Vec<Task> = heap.drain().collect();
        assert_eq!(drained.len(), 7);
        let names: Vec<&str> = drained.iter().map(|t| t.0).collect();
        assert_eq!(
            names,
            vec!["task3", "task4", "task2", "task5", "task1", "task6", "task7"]
        );
        assert!(heap.is_empty());
    }

    #[test]
    fn test_scenario_without_key_bulk_push_fails() {
        let mut heap = task_queue();
        let err = heap.bulk_push([("task6", 6)]).unwrap_err();
        assert_eq!(
            err,
            HeapError::MissingKey {
                operation: "bulk_push"
            }
        );
        assert_eq!(heap.len(), 4);
    }

    #[test]
    fn test_empty_heap_boundaries() {
        let mut heap: MinHeap<Task> = MinHeap::new();
        assert_eq!(heap.peek(), None);
        assert_eq!(heap.pop(), None);
        assert!(heap.k_smallest(5).is_empty());
        assert!(!heap.remove(&("x", 0)));
        assert!(!heap.update_priority(&("x", 0), 1));
        assert_eq!(heap.drain().count(), 0);
    }

    #[test]
    fn test_builder_matches_repeated_push() {
        let built = MinHeap::builder()
            .key(|v: &u32| i64::from(*v % 7))
            .build_from((0u32..50).map(Item::Value))
            .unwrap();
        let mut pushed = MinHeap::with_key(|v: &u32| i64::from(*v % 7));
        for v in 0u32..50 {
            pushed.push(v).unwrap();
        }
        assert_eq!(built.into_sorted_vec(), pushed.into_sorted_vec());
    }

    #[test]
    fn test_bulk_push_matches_repeated_push() {
        let priorities: Vec<i64> = (0..200).map(|i| (i * 37) % 23).collect();
        let mut bulk: MinHeap<usize> = MinHeap::new();
        bulk.bulk_push_with_priority(priorities.iter().copied().zip(0..));
        let mut single: MinHeap<usize> = MinHeap::new();
        for (id, &p) in priorities.iter().enumerate() {
            single.push_with_priority(id, p);
        }
        assert_eq!(bulk.into_sorted_vec(), single.into_sorted_vec());
    }

    #[test]
    fn test_float_priorities_with_nan_and_signed_zero() {
        let mut heap: MinHeap<&str, f64> = MinHeap::new();
        for (value, priority) in [
            ("nan", f64::NAN),
            ("zero", 0.0),
            ("neg_zero", -0.0),
            ("inf", f64::INFINITY),
            ("neg", -1.5),
        ] {
            heap.push_with_priority(value, priority);
            assert!(heap.is_heap());
        }
        let order: Vec<&str> = heap.clone().drain().collect();
        assert_eq!(order, vec!["neg", "neg_zero", "zero", "inf", "nan"]);

        assert!(heap.update_priority(&"neg", f64::NAN));
        assert!(heap.is_heap());
        assert_eq!(heap.peek(), Some((-0.0, &"neg_zero")));
        // both NaN entries sort last, in insertion order
        let tail: Vec<&str> = heap.drain().skip(3).collect();
        assert_eq!(tail, vec!["nan", "neg"]);
    }

    // ---------------------------------------------------------------
    // 2-5. Properties
    // ---------------------------------------------------------------

    proptest! {
        #[test]
        fn prop_invariant_and_size_after_every_op(
            ops in prop::collection::vec(op_strategy(), 0..80),
        ) {
            let mut heap: MinHeap<u32> = MinHeap::new();
            let mut next_id = 0u32;
            let mut expected = 0isize;
            for op in &ops {
                expected += apply(&mut heap, op, &mut next_id);
                prop_assert!(heap.is_heap(), "invariant broken after {:?}", op);
                prop_assert_eq!(heap.len() as isize, expected);
            }
        }

        #[test]
        fn prop_pops_are_sorted_and_stable(
            priorities in prop::collection::vec(-5i64..5, 0..100),
        ) {
            let mut heap: MinHeap<usize> = MinHeap::new();
            for (id, &p) in priorities.iter().enumerate() {
                heap.push_with_priority(id, p);
            }
            let mut expected: Vec<(i64, usize)> =
                priorities.iter().copied().zip(0..).collect();
            // Stable sort by priority keeps insertion order among ties
            expected.sort_by_key(|&(p, _)| p);
            let mut popped = Vec::new();
            while let Some(entry) = heap.pop_entry() {
                popped.push(entry);
            }
            prop_assert_eq!(popped, expected);
        }

        #[test]
        fn prop_snapshot_round_trip(
            setup in prop::collection::vec(op_strategy(), 0..30),
            scoped in prop::collection::vec(op_strategy(), 0..30),
        ) {
            let mut heap: MinHeap<u32> = MinHeap::new();
            let mut next_id = 0u32;
            for op in &setup {
                apply(&mut heap, op, &mut next_id);
            }
            let before = entries(&heap);
            heap.with_snapshot(|h| {
                for op in &scoped {
                    apply(h, op, &mut next_id);
                }
            });
            prop_assert_eq!(entries(&heap), before);
            prop_assert_eq!(heap.snapshot_depth(), 0);
            prop_assert!(heap.is_heap());
        }

        #[test]
        fn prop_k_smallest_is_sorted_prefix(
            priorities in prop::collection::vec(-50i64..50, 0..60),
            k in 0usize..80,
        ) {
            let mut heap: MinHeap<usize> = MinHeap::new();
            heap.bulk_push_with_priority(priorities.iter().copied().zip(0..));
            let smallest = heap.k_smallest(k);
            let full = heap.clone().into_sorted_vec();
            prop_assert_eq!(smallest.len(), k.min(priorities.len()));
            prop_assert_eq!(&smallest[..], &full[..smallest.len()]);
            prop_assert_eq!(heap.len(), priorities.len());
        }

        #[test]
        fn prop_update_then_pop_reflects_new_priority(
            priorities in prop::collection::vec(-50i64..50, 1..40),
            pick in any::<prop::sample::Index>(),
            new_priority in -60i64..60,
        ) {
            let mut heap: MinHeap<usize> = MinHeap::new();
            for (id, &p) in priorities.iter().enumerate() {
                heap.push_with_priority(id, p);
            }
            let target = pick.index(priorities.len());
            prop_assert!(heap.update_priority(&target, new_priority));
            prop_assert!(heap.is_heap());
            prop_assert_eq!(heap.priority_of(&target), Some(new_priority));

            let mut last = i64::MIN;
            while let Some((p, _)) = heap.pop_entry() {
                prop_assert!(p >= last);
                last = p;
            }
        }
    }
}
