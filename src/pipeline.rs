use std::path::PathBuf;

use log::info;

use crate::config::Defaults;
use crate::destination::{Destination, Destinations};
use crate::entry;
use crate::error::Result;
use crate::frontends::Frontend;
use crate::model::DestinationMode;
use crate::resolver;
use crate::writer;

/// Everything a run depends on, passed explicitly.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub mode: DestinationMode,
    pub destinations: Destinations,
    pub defaults: Defaults,
    pub elevated: bool,
    pub dry_run: bool,
}

impl RunOptions {
    pub fn destination(&self) -> Destination {
        self.destinations.resolve(self.mode)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(PathBuf),
    Rendered(String),
}

/// Collects, validates and persists one entry. Nothing touches the
/// filesystem until every field has been resolved.
pub fn run(frontend: &mut dyn Frontend, opts: &RunOptions) -> Result<Outcome> {
    let dest = opts.destination();
    if !opts.dry_run {
        dest.preflight(opts.elevated)?;
    }
    info!("Installing {} entry into {:?}", dest.mode, dest.dir);

    let answers = frontend.collect()?;
    let fields = resolver::resolve(answers, &opts.defaults, frontend.prompter())?;

    if opts.dry_run {
        return Ok(Outcome::Rendered(entry::render(&fields)));
    }

    dest.ensure_dir()?;
    let path = writer::write(&fields, &dest)?;
    Ok(Outcome::Written(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::frontends::flags::{FlagFrontend, FlagValues};
    use crate::frontends::form::FormFrontend;
    use crate::frontends::prompt::PromptFrontend;
    use crate::frontends::Console;
    use crate::model::Field;
    use std::fs;
    use std::io::Cursor;
    use std::path::Path;
    use tempfile::tempdir;

    type TestConsole = Console<Cursor<&'static str>, Vec<u8>>;

    fn options(root: &Path, mode: DestinationMode, elevated: bool) -> RunOptions {
        RunOptions {
            mode,
            destinations: Destinations {
                local: root.join("home/.local/share/applications"),
                global: root.join("usr/share/applications"),
            },
            defaults: Defaults::default(),
            elevated,
            dry_run: false,
        }
    }

    fn foo_flags() -> FlagValues {
        FlagValues {
            name: Some("foo".into()),
            exec_path: Some("/usr/bin/foo".into()),
            terminal: Some("false".into()),
            app_type: Some("Application".into()),
            categories: Some("Development".into()),
            ..Default::default()
        }
    }

    fn flags_only(values: FlagValues) -> FlagFrontend<TestConsole> {
        FlagFrontend::new(values, None)
    }

    #[test]
    fn global_without_privileges_fails_before_writing() {
        let root = tempdir().unwrap();
        let opts = options(root.path(), DestinationMode::Global, false);
        let err = run(&mut flags_only(foo_flags()), &opts).unwrap_err();
        assert!(matches!(err, Error::Destination { mode: DestinationMode::Global, .. }));
        assert!(!root.path().join("usr").exists());
    }

    #[test]
    fn global_with_privileges_writes_canonical_entry() {
        let root = tempdir().unwrap();
        let opts = options(root.path(), DestinationMode::Global, true);
        let outcome = run(&mut flags_only(foo_flags()), &opts).unwrap();

        let expected = root.path().join("usr/share/applications/foo.desktop");
        assert_eq!(outcome, Outcome::Written(expected.clone()));

        let content = fs::read_to_string(&expected).unwrap();
        let keys: Vec<&str> = content.lines().skip(2).collect();
        assert_eq!(
            keys,
            vec![
                "Type=Application",
                "Name=foo",
                "Exec=/usr/bin/foo",
                "Terminal=false",
                "Categories=Development;",
            ]
        );
    }

    #[test]
    fn validation_failure_writes_nothing() {
        let root = tempdir().unwrap();
        let opts = options(root.path(), DestinationMode::Local, false);
        let values = FlagValues { terminal: None, ..foo_flags() };
        let err = run(&mut flags_only(values), &opts).unwrap_err();
        assert_eq!(err.field(), Some(Field::Terminal));
        assert!(!root.path().join("home").exists());
    }

    #[test]
    fn interactive_run_writes_local_entry() {
        let root = tempdir().unwrap();
        let opts = options(root.path(), DestinationMode::Local, false);
        // Terminal is answered badly first and re-asked after the last field.
        let input = "Editor\n\n/usr/bin/editor\n\nnope\n\nDevelopment;Utility;\nfalse\n";
        let mut frontend = PromptFrontend::new(Console::new(Cursor::new(input), Vec::new()));
        let outcome = run(&mut frontend, &opts).unwrap();

        let Outcome::Written(path) = outcome else { panic!("expected a write") };
        let fields = entry::parse(&fs::read_to_string(path).unwrap()).unwrap();
        assert_eq!(fields.name, "Editor");
        assert!(!fields.terminal);
        assert_eq!(fields.categories, vec!["Development", "Utility"]);
    }

    #[test]
    fn cancelled_prompt_writes_nothing() {
        let root = tempdir().unwrap();
        let opts = options(root.path(), DestinationMode::Local, false);
        let mut frontend = PromptFrontend::new(Console::new(Cursor::new("Editor\n"), Vec::new()));
        assert!(matches!(run(&mut frontend, &opts), Err(Error::Cancelled)));
        assert!(!root.path().join("home").exists());
    }

    #[test]
    fn dry_run_renders_without_touching_disk() {
        let root = tempdir().unwrap();
        let mut opts = options(root.path(), DestinationMode::Global, false);
        opts.dry_run = true;
        let outcome = run(&mut flags_only(foo_flags()), &opts).unwrap();
        match outcome {
            Outcome::Rendered(text) => assert!(text.contains("Categories=Development;\n")),
            other => panic!("unexpected outcome: {other:?}"),
        }
        assert!(!root.path().join("usr").exists());
    }

    #[test]
    fn fallback_prompt_fills_missing_flag() {
        let root = tempdir().unwrap();
        let opts = options(root.path(), DestinationMode::Local, false);
        let values = FlagValues { exec_path: None, ..foo_flags() };
        let console = Console::new(Cursor::new("/opt/foo/bin/foo\n"), Vec::new());
        let mut frontend = FlagFrontend::new(values, Some(console));
        let Outcome::Written(path) = run(&mut frontend, &opts).unwrap() else {
            panic!("expected a write")
        };
        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains("Exec=/opt/foo/bin/foo\n"));
    }

    #[test]
    fn configured_categories_feed_the_form() {
        let root = tempdir().unwrap();
        let mut opts = options(root.path(), DestinationMode::Local, false);
        opts.defaults.categories = Some("Utility;".into());
        let dest = opts.destination();
        let console = Console::new(Cursor::new("foo\n\n/usr/bin/foo\n\nfalse\n\ny\n"), Vec::new());
        let mut frontend = FormFrontend::new(console, dest.dir);
        let Outcome::Written(path) = run(&mut frontend, &opts).unwrap() else {
            panic!("expected a write")
        };
        let content = fs::read_to_string(path).unwrap();
        assert!(content.ends_with("Terminal=false\nCategories=Utility;\n"), "{content}");
        assert!(!content.contains(";;"), "{content}");
    }
}
