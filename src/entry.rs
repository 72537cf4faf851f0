//! Canonical `.desktop` rendering and the matching reader.

use crate::error::{Error, Result};
use crate::model::{AppType, FieldSet};

pub const GROUP_HEADER: &str = "[Desktop Entry]";
pub const FORMAT_VERSION: &str = "1.5";

/// Renders `fields` in canonical key order. Unset optional fields produce no
/// line at all.
pub fn render(fields: &FieldSet) -> String {
    let mut lines = vec![
        GROUP_HEADER.to_string(),
        format!("Version={}", FORMAT_VERSION),
        format!("Type={}", fields.app_type),
        format!("Name={}", fields.name),
    ];
    if let Some(comment) = &fields.comment {
        lines.push(format!("Comment={}", comment));
    }
    lines.push(format!("Exec={}", fields.exec));
    if let Some(icon) = &fields.icon {
        lines.push(format!("Icon={}", icon));
    }
    lines.push(format!("Terminal={}", fields.terminal));
    if !fields.categories.is_empty() {
        let mut joined = fields.categories.join(";");
        joined.push(';');
        lines.push(format!("Categories={}", joined));
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

/// Reads the `[Desktop Entry]` group of `content` back into a field set.
/// Keys outside the seven known ones are ignored.
pub fn parse(content: &str) -> Result<FieldSet> {
    let mut name = None;
    let mut comment = None;
    let mut exec = None;
    let mut icon = None;
    let mut terminal = None;
    let mut app_type = AppType::default();
    let mut categories = Vec::new();
    let mut seen_group = false;
    let mut in_group = false;

    for (idx, raw) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') { continue; }

        if line == GROUP_HEADER {
            seen_group = true;
            in_group = true;
            continue;
        }

        if line.starts_with('[') {
            in_group = false;
            continue;
        }

        if !in_group { continue; }

        let Some((key, value)) = line.split_once('=') else {
            return Err(Error::Parse {
                line: line_no,
                message: format!("expected Key=Value, found {:?}", line),
            });
        };
        let value = value.trim().to_string();

        match key.trim() {
            "Name" => name = Some(value),
            "Comment" => comment = Some(value),
            "Exec" => exec = Some(value),
            "Icon" => icon = Some(value),
            "Terminal" => {
                terminal = Some(match value.as_str() {
                    "true" => true,
                    "false" => false,
                    other => {
                        return Err(Error::Parse {
                            line: line_no,
                            message: format!("Terminal must be true or false, found {:?}", other),
                        });
                    }
                });
            }
            "Type" => {
                app_type = value.parse().map_err(|_| Error::Parse {
                    line: line_no,
                    message: format!("unknown Type {:?}", value),
                })?;
            }
            "Categories" => {
                categories = value
                    .split(';')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            _ => {}
        }
    }

    if !seen_group {
        return Err(Error::Parse { line: 0, message: format!("missing {} group", GROUP_HEADER) });
    }

    let missing = |key: &str| Error::Parse { line: 0, message: format!("missing required key {}", key) };

    Ok(FieldSet {
        name: name.ok_or_else(|| missing("Name"))?,
        comment,
        exec: exec.ok_or_else(|| missing("Exec"))?,
        icon,
        terminal: terminal.ok_or_else(|| missing("Terminal"))?,
        app_type,
        categories,
    })
}
