use crate::app::command_support::{require_id, ShellContext};
use crate::app::render::{OutputLine, Tone};
use crate::diagnostics::failure_logs::failed_task_names;
use crate::diagnostics::{collect_failed_task_logs, FailedTaskLog};

fn log_lines(ctx: &ShellContext, attempt_id: &str, log: FailedTaskLog) -> Vec<OutputLine> {
    let mut lines = vec![OutputLine::new(
        Tone::Info,
        format!("== {} ({})", log.task_name, log.file_name),
    )];
    match log.lines {
        Ok(annotated) => lines.extend(annotated.into_iter().map(|line| {
            let tone = if line.flagged {
                Tone::Failure
            } else {
                Tone::Plain
            };
            OutputLine::new(tone, line.text)
        })),
        Err(err) => {
            ctx.log(
                "error",
                "failure_logs.fetch_failed",
                &format!("attempt={attempt_id} {err}"),
            );
            lines.push(OutputLine::new(Tone::Failure, format!("!! {err}")));
        }
    }
    lines
}

pub fn cmd_logs(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    if args.len() != 1 {
        return Err("usage: logs <attemptId>".to_string());
    }
    let attempt_id = args[0].as_str();
    require_id("attempt id", attempt_id)?;

    let tasks = ctx
        .client
        .attempt_tasks(attempt_id)
        .map_err(|e| e.to_string())?;
    if failed_task_names(&tasks).is_empty() {
        return Ok(vec![OutputLine::new(
            Tone::Success,
            format!("attempt {attempt_id} has no failed tasks"),
        )]);
    }

    let log_index = ctx
        .client
        .log_files(attempt_id)
        .map_err(|e| e.to_string())?;
    let logs = collect_failed_task_logs(&tasks, &log_index, &ctx.client.log_source(attempt_id));
    if logs.is_empty() {
        return Ok(vec![OutputLine::plain(format!(
            "no log files found for failed tasks of attempt {attempt_id}"
        ))]);
    }
    Ok(logs
        .into_iter()
        .flat_map(|log| log_lines(ctx, attempt_id, log))
        .collect())
}
