//! Turns raw frontend answers into a validated [`FieldSet`].
//!
//! Each field is checked on its own. When a prompter is available a missing
//! required field or a rejected value is asked again; without one the first
//! problem ends resolution.

use log::{debug, warn};

use crate::config::Defaults;
use crate::error::{Error, Result};
use crate::frontends::{Answers, Prompter};
use crate::model::{AppType, Field, FieldSet};

/// A parsed value, or a description of what was expected instead.
type Parsed<T> = std::result::Result<T, String>;

pub fn resolve(
    answers: Answers,
    defaults: &Defaults,
    mut prompter: Option<&mut dyn Prompter>,
) -> Result<FieldSet> {
    let delimiters = answers.delimiters;
    let mut r = FieldResolver { answers: &answers, defaults, prompter: &mut prompter };

    let name = r.required(Field::Name, parse_name)?;
    let comment = r.optional(Field::Comment, parse_text)?;
    let exec = r.required(Field::ExecPath, parse_text)?;
    let icon = r.optional(Field::Icon, parse_text)?;
    let terminal = r.required(Field::Terminal, parse_bool)?;
    let app_type = r.optional(Field::AppType, parse_app_type)?.unwrap_or_default();
    let categories = r
        .optional(Field::Categories, |value| parse_categories(value, delimiters))?
        .unwrap_or_default();

    let fields = FieldSet { name, comment, exec, icon, terminal, app_type, categories };
    debug!("resolved fields: {:?}", fields);
    Ok(fields)
}

struct FieldResolver<'a, 'p> {
    answers: &'a Answers,
    defaults: &'a Defaults,
    prompter: &'a mut Option<&'p mut dyn Prompter>,
}

impl FieldResolver<'_, '_> {
    fn default_for(&self, field: Field) -> Option<&str> {
        match field {
            Field::Comment => self.defaults.comment.as_deref(),
            Field::Icon => self.defaults.icon.as_deref(),
            Field::Categories => self.defaults.categories.as_deref(),
            Field::AppType => self.defaults.app_type.as_deref(),
            _ => None,
        }
    }

    fn required<T>(&mut self, field: Field, parse: impl Fn(&str) -> Parsed<T>) -> Result<T> {
        let mut raw = non_blank(self.answers.get(field)).map(str::to_string);
        loop {
            let problem = match raw.as_deref() {
                None => Error::missing(field),
                Some(value) => match parse(value) {
                    Ok(parsed) => return Ok(parsed),
                    Err(expected) => Error::invalid(field, value, expected),
                },
            };
            let answer = self.reask(field, problem)?;
            raw = non_blank(Some(answer.as_str())).map(str::to_string);
        }
    }

    fn optional<T>(&mut self, field: Field, parse: impl Fn(&str) -> Parsed<T>) -> Result<Option<T>> {
        let mut raw = non_blank(self.answers.get(field)).map(str::to_string);

        if raw.is_none() {
            if let Some(default) = non_blank(self.default_for(field)) {
                match parse(default) {
                    Ok(parsed) => return Ok(Some(parsed)),
                    Err(expected) => {
                        warn!("ignoring configured default for {}: {:?} (expected {})", field, default, expected);
                    }
                }
            }
        }

        loop {
            let Some(value) = raw.as_deref() else { return Ok(None) };
            match parse(value) {
                Ok(parsed) => return Ok(Some(parsed)),
                Err(expected) => {
                    let problem = Error::invalid(field, value, expected);
                    let answer = self.reask(field, problem)?;
                    raw = non_blank(Some(answer.as_str())).map(str::to_string);
                }
            }
        }
    }

    /// Asks again when interactive, otherwise hands the problem back.
    fn reask(&mut self, field: Field, problem: Error) -> Result<String> {
        match self.prompter.as_deref_mut() {
            Some(prompter) => prompter.ask(field, Some(&problem)),
            None => Err(problem),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn parse_text(value: &str) -> Parsed<String> {
    if value.contains(['\n', '\r']) {
        return Err("a single line of text".to_string());
    }
    Ok(value.trim().to_string())
}

fn parse_name(value: &str) -> Parsed<String> {
    let name = parse_text(value)?;
    if name.contains(['/', '\0']) || name.starts_with('.') {
        return Err("a name without '/' that does not start with '.'".to_string());
    }
    Ok(name)
}

fn parse_bool(value: &str) -> Parsed<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err("true or false".to_string()),
    }
}

fn parse_app_type(value: &str) -> Parsed<AppType> {
    value.trim().parse().map_err(|_| {
        let names: Vec<&str> = AppType::ALL.iter().map(AppType::as_str).collect();
        names.join(", ")
    })
}

/// Splits on any of `delimiters`, dropping empty tokens. Order and repeats
/// are kept.
///
/// `;` always separates: it is the on-disk list separator, so a token
/// holding one would not read back as the same list.
fn parse_categories(value: &str, delimiters: &[char]) -> Parsed<Vec<String>> {
    let value = parse_text(value)?;
    Ok(value
        .split(|c: char| c == ';' || delimiters.contains(&c))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect())
}
