use crate::api::types::Task;
use crate::shared::ids::TaskId;
use std::collections::BTreeMap;

/// One task in display order, with its nesting depth below its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayEntry<'a> {
    pub depth: usize,
    pub task: &'a Task,
}

/// Result of a single walk over the forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForestLayout<'a> {
    pub entries: Vec<DisplayEntry<'a>>,
    /// Tasks never reached from a root, in id order.
    pub unreachable: Vec<&'a Task>,
}

/// Tasks of one attempt held in an arena sorted by id, with a
/// `parent id -> child indices` map built once.
#[derive(Debug, Clone)]
pub struct TaskForest {
    tasks: Vec<Task>,
    roots: Vec<usize>,
    children: BTreeMap<TaskId, Vec<usize>>,
}

impl TaskForest {
    pub fn from_tasks(mut tasks: Vec<Task>) -> Self {
        tasks.sort_by_key(|task| task.id);

        let mut roots = Vec::new();
        let mut children: BTreeMap<TaskId, Vec<usize>> = BTreeMap::new();
        for (idx, task) in tasks.iter().enumerate() {
            match task.parent_id {
                None => roots.push(idx),
                Some(parent_id) => children.entry(parent_id).or_default().push(idx),
            }
        }

        Self {
            tasks,
            roots,
            children,
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn roots(&self) -> impl Iterator<Item = &Task> {
        self.roots.iter().map(|idx| &self.tasks[*idx])
    }

    pub fn children_of(&self, id: TaskId) -> impl Iterator<Item = &Task> {
        self.children
            .get(&id)
            .into_iter()
            .flatten()
            .map(|idx| &self.tasks[*idx])
    }

    /// Pre-order walk: each root by ascending id, every task followed by its
    /// children's subtrees by ascending id. Tasks not reached, usually because
    /// their parent id is missing from the list, are collected separately.
    pub fn layout(&self) -> ForestLayout<'_> {
        let mut visited = vec![false; self.tasks.len()];
        let mut entries = Vec::with_capacity(self.tasks.len());
        let mut stack: Vec<(usize, usize)> =
            self.roots.iter().rev().map(|idx| (*idx, 0)).collect();

        while let Some((idx, depth)) = stack.pop() {
            // Duplicate ids can make a task its own descendant.
            if visited[idx] {
                continue;
            }
            visited[idx] = true;
            let task = &self.tasks[idx];
            entries.push(DisplayEntry { depth, task });
            if let Some(kids) = self.children.get(&task.id) {
                stack.extend(kids.iter().rev().map(|kid| (*kid, depth + 1)));
            }
        }

        let unreachable = self
            .tasks
            .iter()
            .zip(visited)
            .filter(|(_, seen)| !seen)
            .map(|(task, _)| task)
            .collect();
        ForestLayout {
            entries,
            unreachable,
        }
    }

    pub fn display_entries(&self) -> Vec<DisplayEntry<'_>> {
        self.layout().entries
    }

    pub fn unreachable(&self) -> Vec<&Task> {
        self.layout().unreachable
    }
}

pub fn build_display_order(tasks: &[Task]) -> Vec<Task> {
    TaskForest::from_tasks(tasks.to_vec())
        .display_entries()
        .into_iter()
        .map(|entry| entry.task.clone())
        .collect()
}
