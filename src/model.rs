use std::fmt;
use std::str::FromStr;

/// The `Type=` key of a desktop entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppType {
    #[default]
    Application,
    Link,
    Directory,
}

impl AppType {
    pub const ALL: [AppType; 3] = [AppType::Application, AppType::Link, AppType::Directory];

    pub fn as_str(&self) -> &'static str {
        match self {
            AppType::Application => "Application",
            AppType::Link => "Link",
            AppType::Directory => "Directory",
        }
    }
}

impl fmt::Display for AppType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppType {
    type Err = ();

    // Literals match case-sensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AppType::ALL.into_iter().find(|t| t.as_str() == s).ok_or(())
    }
}

/// Where the generated entry is installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DestinationMode {
    #[default]
    Local,
    Global,
}

impl fmt::Display for DestinationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationMode::Local => write!(f, "local"),
            DestinationMode::Global => write!(f, "global"),
        }
    }
}

/// One of the seven user-facing fields of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Comment,
    ExecPath,
    Icon,
    Terminal,
    AppType,
    Categories,
}

impl Field {
    pub fn is_required(&self) -> bool {
        matches!(self, Field::Name | Field::ExecPath | Field::Terminal)
    }

    pub fn flag(&self) -> &'static str {
        match self {
            Field::Name => "--name",
            Field::Comment => "--comment",
            Field::ExecPath => "--exec-path",
            Field::Icon => "--icon",
            Field::Terminal => "--terminal-app",
            Field::AppType => "--app-type",
            Field::Categories => "--categories",
        }
    }

    /// Label shown by the interactive frontends.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Comment => "Comment",
            Field::ExecPath => "Executable path",
            Field::Icon => "Icon path or name",
            Field::Terminal => "Terminal app? (true/false)",
            Field::AppType => "Type (Application/Link/Directory)",
            Field::Categories => "Categories",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Name => "name",
            Field::Comment => "comment",
            Field::ExecPath => "exec_path",
            Field::Icon => "icon",
            Field::Terminal => "terminal",
            Field::AppType => "app_type",
            Field::Categories => "categories",
        };
        f.write_str(name)
    }
}

/// A fully validated desktop entry, ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSet {
    pub name: String,
    pub comment: Option<String>,
    pub exec: String,
    pub icon: Option<String>,
    pub terminal: bool,
    pub app_type: AppType,
    pub categories: Vec<String>,
}

impl FieldSet {
    #[cfg(test)]
    pub fn new(name: impl Into<String>, exec: impl Into<String>, terminal: bool) -> Self {
        Self {
            name: name.into(),
            comment: None,
            exec: exec.into(),
            icon: None,
            terminal,
            app_type: AppType::default(),
            categories: Vec::new(),
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}.desktop", self.name)
    }
}
