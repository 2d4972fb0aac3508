use digdag_shell::app::cli::take_endpoint_flag;
use digdag_shell::app::command_handlers::run_command;
use digdag_shell::app::command_support::ShellContext;
use digdag_shell::app::render::render_lines;
use digdag_shell::app::shell::run_shell;
use digdag_shell::config::load_shell_settings;
use std::io::IsTerminal;

fn run() -> Result<(), String> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let endpoint = take_endpoint_flag(&mut args)?;
    let settings = load_shell_settings(endpoint.as_deref()).map_err(|e| e.to_string())?;
    let ctx = ShellContext::from_settings(&settings);
    let color = std::io::stdout().is_terminal();

    if args.is_empty() {
        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();
        return run_shell(&ctx, stdin.lock(), &mut stdout, color)
            .map_err(|e| format!("shell i/o failed: {e}"));
    }

    let output = run_command(&ctx, &args).map_err(|err| {
        ctx.log("error", "command.failed", &format!("`{}`: {err}", args.join(" ")));
        err
    })?;
    if !output.is_empty() {
        println!("{}", render_lines(&output, color));
    }
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}
