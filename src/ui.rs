use console::{Style, Term};
use std::fmt::Write as _;

pub struct DisplayOptions {
    pub color_support: bool,
}

impl DisplayOptions {
    pub fn for_stderr() -> Self {
        Self {
            color_support: console::colors_enabled_stderr() && Term::stderr().is_term(),
        }
    }

    pub fn for_stdout() -> Self {
        Self {
            color_support: console::colors_enabled() && Term::stdout().is_term(),
        }
    }

    fn style(&self, style: Style) -> Style {
        if self.color_support {
            style
        } else {
            Style::new()
        }
    }
}

pub fn format_error(err: &anyhow::Error, options: &DisplayOptions) -> String {
    let label = options.style(Style::new().red().bold()).apply_to("error");
    let mut message = format!("{}: {}", label, err);

    for cause in err.chain().skip(1) {
        let _ = write!(message, "\n  caused by: {}", cause);
    }

    message
}

pub fn report_error(err: &anyhow::Error) {
    let options = DisplayOptions::for_stderr();
    let term = Term::stderr();
    if term.write_line(&format_error(err, &options)).is_err() {
        eprintln!("error: {}", err);
    }
}

pub fn format_verification(valid: bool, options: &DisplayOptions) -> String {
    if valid {
        options.style(Style::new().green()).apply_to("valid").to_string()
    } else {
        options.style(Style::new().yellow()).apply_to("invalid").to_string()
    }
}
