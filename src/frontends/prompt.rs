use std::io::{BufRead, Write};

use log::debug;

use crate::error::Result;
use crate::frontends::{Answers, Console, Frontend, Prompter};
use crate::model::Field;

const ORDER: [Field; 7] = [
    Field::Name,
    Field::Comment,
    Field::ExecPath,
    Field::Icon,
    Field::Terminal,
    Field::AppType,
    Field::Categories,
];

/// Asks for every field in turn. Empty answers leave a field unset.
pub struct PromptFrontend<R, W> {
    console: Console<R, W>,
}

impl<R: BufRead, W: Write> PromptFrontend<R, W> {
    pub fn new(console: Console<R, W>) -> Self {
        Self { console }
    }
}

impl<R: BufRead, W: Write> Frontend for PromptFrontend<R, W> {
    fn collect(&mut self) -> Result<Answers> {
        self.console.say("Enter the details of the desktop entry (leave optional fields empty to skip).")?;

        let mut answers = Answers { delimiters: &[';', ','], ..Default::default() };
        for field in ORDER {
            let answer = self.console.ask(field, None)?;
            if !answer.trim().is_empty() {
                debug!("prompt answer for {}: {:?}", field, answer);
                answers.set(field, answer);
            }
        }
        Ok(answers)
    }

    fn prompter(&mut self) -> Option<&mut dyn Prompter> {
        Some(&mut self.console)
    }
}
