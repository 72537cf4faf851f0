use std::fs::{self, Permissions};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::destination::Destination;
use crate::entry;
use crate::error::{Error, Result};
use crate::model::{DestinationMode, FieldSet};

pub fn file_mode(mode: DestinationMode) -> u32 {
    match mode {
        DestinationMode::Local => 0o600,
        DestinationMode::Global => 0o644,
    }
}

/// Writes `fields` to `<dest>/<name>.desktop`, replacing any existing file.
///
/// The content goes to a temporary file next to the target which is then
/// renamed over it, so readers see either the old entry or the new one.
pub fn write(fields: &FieldSet, dest: &Destination) -> Result<PathBuf> {
    let target = dest.target_for(&fields.file_name());
    let content = entry::render(fields);

    if target.exists() {
        report_replaced(&target);
    }

    let write_err = |source| Error::Write { path: target.clone(), source };

    let mut tmp = NamedTempFile::new_in(&dest.dir).map_err(write_err)?;
    debug!("writing {:?} via {:?}", target, tmp.path());
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.as_file().sync_all().map_err(write_err)?;
    fs::set_permissions(tmp.path(), Permissions::from_mode(file_mode(dest.mode))).map_err(write_err)?;

    // On failure the temporary file is removed when `e.file` drops.
    tmp.persist(&target).map_err(|e| write_err(e.error))?;
    // The rename is only durable once the directory itself is synced.
    fs::File::open(&dest.dir).and_then(|dir| dir.sync_all()).map_err(write_err)?;

    info!("Wrote {:?}", target);
    Ok(target)
}

fn report_replaced(target: &Path) {
    match fs::read_to_string(target).map_err(Error::from).and_then(|c| entry::parse(&c)) {
        Ok(previous) => info!(
            "Replacing existing entry {:?} (Exec={})",
            target, previous.exec
        ),
        Err(e) => warn!("Replacing {:?}, which was not a readable entry: {}", target, e),
    }
}
