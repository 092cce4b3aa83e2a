//! Terminal styling for the interactive front end.

use colored::{ColoredString, Colorize};

/// Convenience trait for applying color and style to text output.
pub trait GameStyle {
    fn title_style(&self) -> ColoredString;
    fn prompt_style(&self) -> ColoredString;
    fn description_style(&self) -> ColoredString;
    fn farewell_style(&self) -> ColoredString;
    fn error_style(&self) -> ColoredString;
}

impl GameStyle for &str {
    fn title_style(&self) -> ColoredString {
        self.bright_yellow().underline()
    }
    fn prompt_style(&self) -> ColoredString {
        self.truecolor(223, 77, 10).bold()
    }
    fn description_style(&self) -> ColoredString {
        self.truecolor(102, 208, 250)
    }
    fn farewell_style(&self) -> ColoredString {
        self.italic().truecolor(220, 180, 40)
    }
    fn error_style(&self) -> ColoredString {
        self.truecolor(230, 30, 30)
    }
}

impl GameStyle for String {
    fn title_style(&self) -> ColoredString {
        self.as_str().title_style()
    }
    fn prompt_style(&self) -> ColoredString {
        self.as_str().prompt_style()
    }
    fn description_style(&self) -> ColoredString {
        self.as_str().description_style()
    }
    fn farewell_style(&self) -> ColoredString {
        self.as_str().farewell_style()
    }
    fn error_style(&self) -> ColoredString {
        self.as_str().error_style()
    }
}
