use crate::error::Result;
use crate::frontends::{Answers, Frontend, Prompter};

/// Raw field values as given on the command line.
#[derive(Debug, Clone, Default)]
pub struct FlagValues {
    pub name: Option<String>,
    pub comment: Option<Vec<String>>,
    pub exec_path: Option<String>,
    pub icon: Option<String>,
    pub terminal: Option<String>,
    pub app_type: Option<String>,
    pub categories: Option<String>,
}

impl FlagValues {
    pub fn any(&self) -> bool {
        self.name.is_some()
            || self.comment.is_some()
            || self.exec_path.is_some()
            || self.icon.is_some()
            || self.terminal.is_some()
            || self.app_type.is_some()
            || self.categories.is_some()
    }
}

/// Takes every field from flags. Missing required fields are asked through
/// `fallback` when there is one.
pub struct FlagFrontend<P> {
    values: FlagValues,
    fallback: Option<P>,
}

impl<P: Prompter> FlagFrontend<P> {
    pub fn new(values: FlagValues, fallback: Option<P>) -> Self {
        Self { values, fallback }
    }
}

impl<P: Prompter> Frontend for FlagFrontend<P> {
    fn collect(&mut self) -> Result<Answers> {
        let values = self.values.clone();
        Ok(Answers {
            name: values.name,
            // `--comment Opens the thing` arrives as several words.
            comment: values.comment.map(|words| words.join(" ")),
            exec_path: values.exec_path,
            icon: values.icon,
            terminal: values.terminal,
            app_type: values.app_type,
            categories: values.categories,
            delimiters: &[',', ';'],
        })
    }

    fn prompter(&mut self) -> Option<&mut dyn Prompter> {
        self.fallback.as_mut().map(|p| p as &mut dyn Prompter)
    }
}
