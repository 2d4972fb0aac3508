use crate::api::types::{BackfillRequest, SkipRequest};
use crate::app::command_support::{
    json_line, parse_count, require_id, CreatedAttemptRow, ShellContext,
};
use crate::app::render::{OutputLine, Tone};

pub fn cmd_backfill(
    ctx: &ShellContext,
    args: &[String],
    dry_run: bool,
) -> Result<Vec<OutputLine>, String> {
    if args.len() != 3 {
        let verb = if dry_run { "backfillDryRun" } else { "backfill" };
        return Err(format!(
            "usage: {verb} <scheduleId> <fromISODateTime> <count>"
        ));
    }
    require_id("schedule id", &args[0])?;
    let request = BackfillRequest {
        attempt_name: (ctx.attempt_name)(),
        from_time: args[1].clone(),
        count: parse_count(&args[2])?,
        dry_run,
    };
    let attempts = ctx
        .client
        .backfill(&args[0], &request)
        .map_err(|e| e.to_string())?;
    if !dry_run {
        ctx.log(
            "info",
            "schedule.backfilled",
            &format!(
                "schedule={} from={} count={} attempts={}",
                args[0],
                request.from_time,
                request.count,
                attempts.len()
            ),
        );
    }
    attempts
        .iter()
        .map(|attempt| json_line(&CreatedAttemptRow::from(attempt)).map(OutputLine::plain))
        .collect()
}

pub fn cmd_skip(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    if args.len() != 3 {
        return Err("usage: skip <scheduleId> <fromISODateTime> <count>".to_string());
    }
    require_id("schedule id", &args[0])?;
    let request = SkipRequest {
        from_time: args[1].clone(),
        count: parse_count(&args[2])?,
        dry_run: false,
    };
    let schedule = ctx
        .client
        .skip(&args[0], &request)
        .map_err(|e| e.to_string())?;
    ctx.log(
        "info",
        "schedule.skipped",
        &format!(
            "schedule={} from={} count={}",
            args[0], request.from_time, request.count
        ),
    );
    Ok(vec![OutputLine::new(Tone::Success, json_line(&schedule)?)])
}
