use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::frontends::{Answers, Console, Frontend, Prompter};
use crate::model::Field;

const FORM_FIELDS: [(Field, &str); 6] = [
    (Field::Name, "Name"),
    (Field::Comment, "Comment"),
    (Field::ExecPath, "Executable Path"),
    (Field::Icon, "Icon Path"),
    (Field::Terminal, "Terminal App? (true/false)"),
    (Field::Categories, "Categories (comma separated)"),
];

/// Guided form: one screen with every field, a summary, then a confirmation.
/// The entry type is not asked and falls back to its default.
pub struct FormFrontend<R, W> {
    console: Console<R, W>,
    target_dir: PathBuf,
}

impl<R: BufRead, W: Write> FormFrontend<R, W> {
    pub fn new(console: Console<R, W>, target_dir: impl Into<PathBuf>) -> Self {
        Self { console, target_dir: target_dir.into() }
    }
}

impl<R: BufRead, W: Write> Frontend for FormFrontend<R, W> {
    fn collect(&mut self) -> Result<Answers> {
        let hint = format!("The entry will be created in {}", self.target_dir.display());
        self.console.say("== Desktop Entry Generator ==")?;
        self.console.say(&hint)?;

        let mut answers = Answers { delimiters: &[','], ..Default::default() };
        for (field, label) in FORM_FIELDS {
            let answer = self.console.read_answer(label)?;
            if !answer.trim().is_empty() {
                answers.set(field, answer);
            }
        }

        self.console.say("")?;
        for (field, label) in FORM_FIELDS {
            let value = answers.get(field).unwrap_or("-");
            self.console.say(&format!("  {:<30} {}", label, value))?;
        }

        let confirm = self.console.read_answer("Generate? [y/N]")?;
        if !matches!(confirm.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            return Err(Error::Cancelled);
        }
        Ok(answers)
    }

    fn prompter(&mut self) -> Option<&mut dyn Prompter> {
        Some(&mut self.console)
    }
}
