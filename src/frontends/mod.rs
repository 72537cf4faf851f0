use std::io::{self, BufRead, Write};

use crate::error::{Error, Result};
use crate::model::Field;

pub mod flags;
pub mod form;
pub mod prompt;

/// Raw, unvalidated values gathered by a frontend. `None` means the frontend
/// had nothing for that field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub name: Option<String>,
    pub comment: Option<String>,
    pub exec_path: Option<String>,
    pub icon: Option<String>,
    pub terminal: Option<String>,
    pub app_type: Option<String>,
    pub categories: Option<String>,
    /// Separators accepted when splitting `categories`.
    pub delimiters: &'static [char],
}

impl Answers {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => self.name.as_deref(),
            Field::Comment => self.comment.as_deref(),
            Field::ExecPath => self.exec_path.as_deref(),
            Field::Icon => self.icon.as_deref(),
            Field::Terminal => self.terminal.as_deref(),
            Field::AppType => self.app_type.as_deref(),
            Field::Categories => self.categories.as_deref(),
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Comment => &mut self.comment,
            Field::ExecPath => &mut self.exec_path,
            Field::Icon => &mut self.icon,
            Field::Terminal => &mut self.terminal,
            Field::AppType => &mut self.app_type,
            Field::Categories => &mut self.categories,
        };
        *slot = Some(value);
    }
}

/// Asks the user for a single field. Used by the resolver to fill in missing
/// or rejected values.
pub trait Prompter {
    fn ask(&mut self, field: Field, problem: Option<&Error>) -> Result<String>;
}

pub trait Frontend {
    fn collect(&mut self) -> Result<Answers>;

    /// `None` when the frontend cannot ask follow-up questions.
    fn prompter(&mut self) -> Option<&mut dyn Prompter>;
}

/// Line-oriented question/answer channel shared by the interactive frontends.
pub struct Console<R, W> {
    input: R,
    output: W,
}

pub type StdConsole = Console<io::StdinLock<'static>, io::Stdout>;

impl StdConsole {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    /// Prints `question` and reads one line. End of input cancels the run.
    pub fn read_answer(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}: ", question)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Err(Error::Cancelled);
        }
        Ok(line.trim_end_matches(['\n', '\r']).to_string())
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Prompter for Console<R, W> {
    fn ask(&mut self, field: Field, problem: Option<&Error>) -> Result<String> {
        if let Some(err) = problem {
            self.say(&format!("  ! {}", err))?;
        }
        let question = if field.is_required() {
            format!("{} (required)", field.label())
        } else {
            field.label().to_string()
        };
        self.read_answer(&question)
    }
}
