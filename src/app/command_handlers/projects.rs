use crate::app::command_support::{json_line, require_id, ShellContext};
use crate::app::render::OutputLine;

pub fn cmd_projects(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    if !args.is_empty() {
        return Err("usage: projects".to_string());
    }
    ctx.client
        .projects()
        .map_err(|e| e.to_string())?
        .iter()
        .map(|project| json_line(project).map(OutputLine::plain))
        .collect()
}

pub fn cmd_workflows(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    if args.len() != 1 {
        return Err("usage: workflows <projectId>".to_string());
    }
    require_id("project id", &args[0])?;
    ctx.client
        .workflows(&args[0])
        .map_err(|e| e.to_string())?
        .iter()
        .map(|workflow| json_line(workflow).map(OutputLine::plain))
        .collect()
}

pub fn cmd_schedules(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    if args.len() != 2 {
        return Err("usage: schedules <projectId> <workflowName>".to_string());
    }
    require_id("project id", &args[0])?;
    ctx.client
        .schedules(&args[0], &args[1])
        .map_err(|e| e.to_string())?
        .iter()
        .map(|schedule| json_line(schedule).map(OutputLine::plain))
        .collect()
}
