use crate::app::command_handlers::run_command;
use crate::app::command_support::ShellContext;
use crate::app::render::{render_line, render_lines, OutputLine, Tone};
use std::io::{BufRead, Write};

pub const SHELL_PROMPT: &str = "digdag> ";
pub const SHELL_EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit"];
const SHELL_GREETING: &str = "Type \"help\" or press enter for a list of commands";

pub fn is_shell_exit_command(line: &str) -> bool {
    SHELL_EXIT_COMMANDS
        .iter()
        .any(|command| line.eq_ignore_ascii_case(command))
}

/// Whitespace-separated words; double quotes group words containing spaces.
pub fn split_command_line(line: &str) -> Result<Vec<String>, String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quoted = false;
    for ch in line.chars() {
        match ch {
            '"' => {
                quoted = !quoted;
                in_word = true;
            }
            c if c.is_whitespace() && !quoted => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if quoted {
        return Err("unterminated quote".to_string());
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

fn execute_line(ctx: &ShellContext, line: &str) -> Result<Vec<OutputLine>, String> {
    let args = split_command_line(line)?;
    run_command(ctx, &args)
}

/// Runs one command per input line until EOF or an exit command. A failing
/// command is reported and logged; the loop keeps going.
pub fn run_shell<R, W>(
    ctx: &ShellContext,
    input: R,
    output: &mut W,
    color: bool,
) -> std::io::Result<()>
where
    R: BufRead,
    W: Write,
{
    writeln!(
        output,
        "{}",
        render_line(&OutputLine::new(Tone::Info, SHELL_GREETING), color)
    )?;

    let mut lines = input.lines();
    loop {
        write!(output, "{SHELL_PROMPT}")?;
        output.flush()?;
        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };
        let line = line?;
        let trimmed = line.trim();
        if is_shell_exit_command(trimmed) {
            break;
        }

        match execute_line(ctx, trimmed) {
            Ok(result) if result.is_empty() => {}
            Ok(result) => writeln!(output, "{}", render_lines(&result, color))?,
            Err(err) => {
                ctx.log("error", "command.failed", &format!("`{trimmed}`: {err}"));
                writeln!(
                    output,
                    "{}",
                    render_line(&OutputLine::new(Tone::Failure, err), color)
                )?;
            }
        }
    }
    Ok(())
}
