use crate::app::cli::{cli_help_lines, parse_cli_verb, CliVerb};
use crate::app::command_support::ShellContext;
use crate::app::render::{OutputLine, Tone};

pub mod logs;
pub mod projects;
pub mod retry;
pub mod schedule;
pub mod server;
pub mod sessions;
pub mod tasks;

pub fn help_output() -> Vec<OutputLine> {
    cli_help_lines()
        .into_iter()
        .map(|line| OutputLine::new(Tone::Info, line))
        .collect()
}

pub fn run_command(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    let Some(verb) = args.first() else {
        return Ok(help_output());
    };

    let rest = &args[1..];
    match parse_cli_verb(verb) {
        CliVerb::Help => Ok(help_output()),
        CliVerb::Version => server::cmd_version(ctx, rest),
        CliVerb::Projects => projects::cmd_projects(ctx, rest),
        CliVerb::Workflows => projects::cmd_workflows(ctx, rest),
        CliVerb::Schedules => projects::cmd_schedules(ctx, rest),
        CliVerb::Sessions => sessions::cmd_sessions(ctx, rest),
        CliVerb::Attempts => sessions::cmd_attempts(ctx, rest),
        CliVerb::Attempt => sessions::cmd_attempt(ctx, rest),
        CliVerb::Tasks => tasks::cmd_tasks(ctx, rest),
        CliVerb::BackfillDryRun => schedule::cmd_backfill(ctx, rest, true),
        CliVerb::Backfill => schedule::cmd_backfill(ctx, rest, false),
        CliVerb::Skip => schedule::cmd_skip(ctx, rest),
        CliVerb::Retry => retry::cmd_retry(ctx, rest),
        CliVerb::Resume => retry::cmd_resume(ctx, rest),
        CliVerb::Logs => logs::cmd_logs(ctx, rest),
        CliVerb::Exit => Ok(Vec::new()),
        CliVerb::Unknown => Err(format!("unknown command `{verb}`")),
    }
}
