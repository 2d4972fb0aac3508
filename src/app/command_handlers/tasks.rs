use crate::api::types::{Task, TaskState};
use crate::app::command_support::{require_id, ShellContext};
use crate::app::render::{OutputLine, Tone};
use crate::diagnostics::{DisplayEntry, ForestLayout, TaskForest};

pub fn task_state_tone(state: TaskState) -> Tone {
    match state {
        TaskState::Success => Tone::Success,
        TaskState::Error | TaskState::GroupError => Tone::Failure,
        TaskState::Running => Tone::Pending,
        TaskState::Blocked | TaskState::Other => Tone::Plain,
    }
}

fn task_line(entry: &DisplayEntry<'_>) -> OutputLine {
    let task = entry.task;
    let mut text = format!(
        "{}{} [{}] id={}",
        "  ".repeat(entry.depth),
        task.full_name,
        task.state.as_str(),
        task.id
    );
    if let Some(started_at) = &task.started_at {
        text.push_str(&format!(" startedAt={started_at}"));
    }
    OutputLine::new(task_state_tone(task.state), text)
}

fn describe_unreachable(task: &Task) -> String {
    match task.parent_id {
        Some(parent_id) => format!("{} (id={}, parent={})", task.full_name, task.id, parent_id),
        None => format!("{} (id={})", task.full_name, task.id),
    }
}

/// Lays out tasks as an indented tree. Tasks that cannot be placed under any
/// root are listed in a trailing warning and written to the event log.
pub fn render_task_tree(
    ctx: &ShellContext,
    attempt_id: &str,
    tasks: Vec<Task>,
) -> Vec<OutputLine> {
    let forest = TaskForest::from_tasks(tasks);
    let ForestLayout {
        entries,
        unreachable,
    } = forest.layout();
    let mut lines = entries.iter().map(task_line).collect::<Vec<_>>();

    if !unreachable.is_empty() {
        let described = unreachable
            .iter()
            .map(|task| describe_unreachable(task))
            .collect::<Vec<_>>()
            .join(", ");
        ctx.log(
            "warn",
            "task_tree.unreachable",
            &format!("attempt={attempt_id} tasks={described}"),
        );
        lines.push(OutputLine::new(
            Tone::Warning,
            format!(
                "{} task(s) not reachable from any root: {described}",
                unreachable.len()
            ),
        ));
    }
    lines
}

pub fn cmd_tasks(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    if args.len() != 1 {
        return Err("usage: tasks <attemptId>".to_string());
    }
    require_id("attempt id", &args[0])?;
    let tasks = ctx
        .client
        .attempt_tasks(&args[0])
        .map_err(|e| e.to_string())?;
    Ok(render_task_tree(ctx, &args[0], tasks))
}
