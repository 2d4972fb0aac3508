use crate::app::command_support::ShellContext;
use crate::app::render::{OutputLine, Tone};

pub fn cmd_version(ctx: &ShellContext, args: &[String]) -> Result<Vec<OutputLine>, String> {
    if !args.is_empty() {
        return Err("usage: version".to_string());
    }
    let version = ctx.client.version().map_err(|e| e.to_string())?;
    Ok(vec![OutputLine::new(Tone::Emphasis, version.version)])
}
