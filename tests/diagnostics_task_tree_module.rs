use digdag_shell::api::types::{Task, TaskState};
use digdag_shell::diagnostics::{build_display_order, TaskForest};
use digdag_shell::shared::ids::TaskId;
use std::collections::BTreeMap;

fn task(id: u64, parent: Option<u64>) -> Task {
    Task {
        id: TaskId::new(id),
        parent_id: parent.map(TaskId::new),
        full_name: format!("+t{id}"),
        state: TaskState::Success,
        started_at: None,
    }
}

fn ids(tasks: &[Task]) -> Vec<u64> {
    tasks.iter().map(|task| task.id.value()).collect()
}

#[test]
fn child_of_lower_root_precedes_higher_root() {
    let tasks = vec![task(3, None), task(1, None), task(2, Some(1))];
    assert_eq!(ids(&build_display_order(&tasks)), vec![1, 2, 3]);
}

#[test]
fn empty_input_yields_empty_output() {
    assert!(build_display_order(&[]).is_empty());
    assert!(TaskForest::from_tasks(Vec::new()).is_empty());
}

#[test]
fn siblings_and_subtrees_follow_numeric_id_order() {
    // +wf(1) -> a(2) -> a1(10), a2(4); b(9) -> b1(11); retried root 20 -> 21
    let tasks = vec![
        task(11, Some(9)),
        task(20, None),
        task(10, Some(2)),
        task(9, Some(1)),
        task(4, Some(2)),
        task(2, Some(1)),
        task(21, Some(20)),
        task(1, None),
    ];
    assert_eq!(
        ids(&build_display_order(&tasks)),
        vec![1, 2, 4, 10, 9, 11, 20, 21]
    );

    let forest = TaskForest::from_tasks(tasks);
    let depths = forest
        .display_entries()
        .iter()
        .map(|entry| (entry.task.id.value(), entry.depth))
        .collect::<Vec<_>>();
    assert_eq!(
        depths,
        vec![(1, 0), (2, 1), (4, 2), (10, 2), (9, 1), (11, 2), (20, 0), (21, 1)]
    );
    assert_eq!(
        forest.roots().map(|t| t.id.value()).collect::<Vec<_>>(),
        vec![1, 20]
    );
    assert_eq!(
        forest
            .children_of(TaskId::new(2))
            .map(|t| t.id.value())
            .collect::<Vec<_>>(),
        vec![4, 10]
    );
}

#[test]
fn ids_sort_numerically_not_lexicographically() {
    let tasks = vec![task(10, None), task(9, None), task(100, None)];
    assert_eq!(ids(&build_display_order(&tasks)), vec![9, 10, 100]);
}

#[test]
fn orphaned_tasks_are_dropped_and_reported() {
    let tasks = vec![
        task(1, None),
        task(2, Some(1)),
        task(7, Some(99)),
        task(8, Some(7)),
    ];
    assert_eq!(ids(&build_display_order(&tasks)), vec![1, 2]);

    let forest = TaskForest::from_tasks(tasks);
    let unreachable = forest
        .unreachable()
        .into_iter()
        .map(|t| t.id.value())
        .collect::<Vec<_>>();
    assert_eq!(unreachable, vec![7, 8]);
}

#[test]
fn duplicate_ids_do_not_loop_forever() {
    let tasks = vec![task(1, None), task(1, Some(1))];
    let order = build_display_order(&tasks);
    assert_eq!(ids(&order), vec![1, 1]);
}

#[test]
fn display_order_is_idempotent() {
    let tasks = vec![task(5, Some(1)), task(3, None), task(1, None), task(2, Some(1))];
    let once = build_display_order(&tasks);
    let twice = build_display_order(&once);
    assert_eq!(once, twice);
    assert_eq!(build_display_order(&tasks), once);
}

/// Small deterministic generator so the ordering properties are checked
/// across many shapes, including orphans.
fn generated_tasks(seed: u64, count: u64) -> Vec<Task> {
    let mut state = seed;
    let mut next = || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        state >> 33
    };
    let mut tasks = Vec::new();
    for id in 1..=count {
        let roll = next() % 10;
        let parent = match roll {
            0 | 1 => None,
            2 => Some(count + 1 + next() % 5),
            _ if id > 1 => Some(1 + next() % (id - 1)),
            _ => None,
        };
        tasks.push(task(id * 3, parent.map(|p| p * 3)));
    }
    let len = tasks.len();
    tasks.rotate_left((seed as usize) % len.max(1));
    tasks
}

#[test]
fn every_emitted_task_follows_its_parent_and_stays_inside_its_root() {
    for seed in 1..40 {
        let tasks = generated_tasks(seed, 25);
        let order = build_display_order(&tasks);
        assert!(order.len() <= tasks.len());

        let position = order
            .iter()
            .enumerate()
            .map(|(idx, t)| (t.id, idx))
            .collect::<BTreeMap<_, _>>();
        let mut current_root = None;
        let mut root_of = BTreeMap::new();
        for t in &order {
            match t.parent_id {
                None => {
                    if let Some(prev) = current_root {
                        assert!(prev < t.id, "roots out of order for seed {seed}");
                    }
                    current_root = Some(t.id);
                    root_of.insert(t.id, t.id);
                }
                Some(parent) => {
                    let parent_pos = position.get(&parent).expect("parent emitted");
                    assert!(*parent_pos < position[&t.id]);
                    assert_eq!(root_of[&parent], current_root.expect("root"));
                    root_of.insert(t.id, root_of[&parent]);
                }
            }
        }

        let forest = TaskForest::from_tasks(tasks.clone());
        assert_eq!(order.len() + forest.unreachable().len(), tasks.len());
    }
}

#[test]
fn layout_returns_entries_and_unreachable_from_one_walk() {
    let forest = TaskForest::from_tasks(vec![
        task(4, Some(1)),
        task(1, None),
        task(9, Some(42)),
        task(2, Some(1)),
    ]);
    let layout = forest.layout();

    let entries = layout
        .entries
        .iter()
        .map(|entry| (entry.task.id.value(), entry.depth))
        .collect::<Vec<_>>();
    assert_eq!(entries, vec![(1, 0), (2, 1), (4, 1)]);
    assert_eq!(
        layout
            .unreachable
            .iter()
            .map(|t| t.id.value())
            .collect::<Vec<_>>(),
        vec![9]
    );
    assert_eq!(layout.entries, forest.display_entries());
    assert_eq!(layout.unreachable, forest.unreachable());
}
