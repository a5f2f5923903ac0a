use chrono::Utc;
use proptest::prelude::*;
use todo_core::view::{group_items, sort_items, GroupStates};
use todo_core::{TodoItem, TodoItemState};

fn arb_state() -> impl Strategy<Value = TodoItemState> {
    prop_oneof![
        Just(TodoItemState::Todo),
        Just(TodoItemState::InProgress),
        Just(TodoItemState::Done),
    ]
}

fn arb_items() -> impl Strategy<Value = Vec<TodoItem>> {
    prop::collection::vec(("[a-zA-Z ]{0,12}", arb_state()), 0..40).prop_map(|pairs| {
        let now = Utc::now();
        pairs
            .into_iter()
            .enumerate()
            .map(|(i, (name, state))| TodoItem {
                id: format!("item-{}", i),
                list_id: "list".to_string(),
                name,
                description: None,
                state,
                due_date: None,
                completed_date: None,
                created_date: now,
                updated_date: now,
            })
            .collect()
    })
}

proptest! {
    /// Property: sorted output is ordered by (state, name)
    #[test]
    fn prop_sort_orders_by_state_then_name(mut items in arb_items()) {
        sort_items(&mut items);

        for pair in items.windows(2) {
            let key_a = (pair[0].state, pair[0].name.as_str());
            let key_b = (pair[1].state, pair[1].name.as_str());
            prop_assert!(key_a <= key_b);
        }
    }

    /// Property: groups partition the sorted items into contiguous runs
    #[test]
    fn prop_groups_partition_items(mut items in arb_items(), collapsed in any::<bool>()) {
        sort_items(&mut items);
        let groups = group_items(&items, &GroupStates::all(collapsed));

        prop_assert_eq!(groups.len(), 3);
        let total: usize = groups.iter().map(|g| g.count).sum();
        prop_assert_eq!(total, items.len());

        for group in &groups {
            prop_assert_eq!(group.collapsed, collapsed);
            match group.start_index {
                Some(start) => {
                    prop_assert!(group.count > 0);
                    let run = &items[start..start + group.count];
                    prop_assert!(run.iter().all(|i| i.state == group.state));
                }
                None => prop_assert_eq!(group.count, 0),
            }
        }
    }
}
