use crate::app::command_support::{json_line, require_id, CreatedAttemptRow, ShellContext};
use crate::app::render::{OutputLine, Tone};
use crate::diagnostics::{compose_retry_payload, ResumeIntent};

fn submit(
    ctx: &ShellContext,
    attempt_id: &str,
    intent: &ResumeIntent,
) -> Result<Vec<OutputLine>, String> {
    let source = ctx.client.attempt(attempt_id).map_err(|e| e.to_string())?;
    let payload =
        compose_retry_payload(&source, intent, ctx.attempt_name).map_err(|e| e.to_string())?;
    let created = ctx
        .client
        .create_attempt(&payload)
        .map_err(|e| e.to_string())?;
    ctx.log(
        "info",
        "attempt.created",
        &format!(
            "source={} created={} name={}",
            source.id, created.id, payload.retry_attempt_name
        ),
    );
    Ok(vec![OutputLine::new(
        Tone::Success,
        json_line(&CreatedAttemptRow::from(&created))?,
    )])
}

pub fn cmd_retry(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    if args.len() != 1 {
        return Err("usage: retry <attemptId>".to_string());
    }
    require_id("attempt id", &args[0])?;
    submit(ctx, &args[0], &ResumeIntent::None)
}

pub fn cmd_resume(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    let usage = || "usage: resume <attemptId> failed|from <taskName>".to_string();
    if args.len() < 2 || args.len() > 3 {
        return Err(usage());
    }
    require_id("attempt id", &args[0])?;
    let intent = ResumeIntent::from_parts(&args[1], &args[0], args.get(2).map(String::as_str))
        .map_err(|e| format!("{e}\n{}", usage()))?;
    if intent == ResumeIntent::None {
        return Err(usage());
    }
    submit(ctx, &args[0], &intent)
}
