//! Shared-volume shortcut: link a pre-existing copy instead of downloading.

use crate::fetch::{run_checked, FetchError};
use crate::model::ModelPaths;
use crate::process::{ExternalCommand, ProcessRunner};
use std::path::{Path, PathBuf};

/// Environment variable naming the top directory of a shared dataset volume.
pub const VOLUME_TOP_DIR_ENV: &str = "CVM_VOLUME_TOP_DIR";

/// Returns `<volume_top_dir>/<model_dir>` if it exists as a directory.
/// An unset or empty `volume_top_dir` never matches.
pub fn find_volume_copy(volume_top_dir: Option<&str>, paths: &ModelPaths) -> Option<PathBuf> {
    let top = volume_top_dir.filter(|v| !v.is_empty())?;
    let candidate = Path::new(top).join(paths.model_dir_name());
    if candidate.is_dir() {
        Some(candidate)
    } else {
        tracing::debug!("no shared copy at {}", candidate.display());
        None
    }
}

/// `ln -s <candidate> .` in the working directory.
pub fn link_volume_copy(
    runner: &dyn ProcessRunner,
    work_dir: &Path,
    candidate: &Path,
) -> Result<(), FetchError> {
    tracing::info!("linking shared copy {}", candidate.display());
    run_checked(
        runner,
        ExternalCommand::new("ln", work_dir)
            .arg("-s")
            .arg(candidate)
            .arg("."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SJQBN;
    use crate::process::RecordingRunner;
    use std::ffi::OsString;

    #[test]
    fn finds_existing_directory() {
        let vol = tempfile::tempdir().unwrap();
        std::fs::create_dir(vol.path().join("sjqbn")).unwrap();
        let paths = ModelPaths::new(&SJQBN, "X", "sjqbn");
        let top = vol.path().to_str().unwrap();
        assert_eq!(
            find_volume_copy(Some(top), &paths),
            Some(vol.path().join("sjqbn"))
        );
    }

    #[test]
    fn ignores_unset_empty_and_missing() {
        let vol = tempfile::tempdir().unwrap();
        let paths = ModelPaths::new(&SJQBN, "X", "sjqbn");
        assert_eq!(find_volume_copy(None, &paths), None);
        assert_eq!(find_volume_copy(Some(""), &paths), None);
        let top = vol.path().to_str().unwrap();
        assert_eq!(find_volume_copy(Some(top), &paths), None);
    }

    #[test]
    fn regular_file_is_not_a_copy() {
        let vol = tempfile::tempdir().unwrap();
        std::fs::write(vol.path().join("sjqbn"), b"").unwrap();
        let paths = ModelPaths::new(&SJQBN, "X", "sjqbn");
        let top = vol.path().to_str().unwrap();
        assert_eq!(find_volume_copy(Some(top), &paths), None);
    }

    #[test]
    fn link_runs_ln() {
        let work = tempfile::tempdir().unwrap();
        let runner = RecordingRunner::new();
        link_volume_copy(&runner, work.path(), Path::new("/vol/sjqbn")).unwrap();
        let calls = runner.calls();
        assert_eq!(calls[0].program, "ln");
        assert_eq!(
            calls[0].args,
            vec![
                OsString::from("-s"),
                OsString::from("/vol/sjqbn"),
                OsString::from(".")
            ]
        );
    }
}
