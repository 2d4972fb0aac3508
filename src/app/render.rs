use crossterm::style::Stylize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Failure,
    Pending,
    Info,
    Emphasis,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLine {
    pub tone: Tone,
    pub text: String,
}

impl OutputLine {
    pub fn new(tone: Tone, text: impl Into<String>) -> Self {
        Self {
            tone,
            text: text.into(),
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(Tone::Plain, text)
    }
}

pub fn render_line(line: &OutputLine, color: bool) -> String {
    if !color {
        return line.text.clone();
    }
    let text = line.text.as_str();
    match line.tone {
        Tone::Plain => text.to_string(),
        Tone::Success => text.green().to_string(),
        Tone::Failure => text.red().to_string(),
        Tone::Pending => text.yellow().to_string(),
        Tone::Info => text.cyan().to_string(),
        Tone::Emphasis => text.blue().to_string(),
        Tone::Warning => text.magenta().to_string(),
    }
}

pub fn render_lines(lines: &[OutputLine], color: bool) -> String {
    lines
        .iter()
        .map(|line| render_line(line, color))
        .collect::<Vec<_>>()
        .join("\n")
}
