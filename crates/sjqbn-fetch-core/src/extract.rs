//! `mkdir` and `tar` invocations around the download.

use crate::fetch::{run_checked, FetchError};
use crate::model::ModelPaths;
use crate::process::{ExternalCommand, ProcessRunner};
use std::path::Path;

/// `mkdir -p <model_dir>` unless the model directory already exists.
/// Returns whether a command was run.
pub fn ensure_model_dir(
    runner: &dyn ProcessRunner,
    work_dir: &Path,
    paths: &ModelPaths,
) -> Result<bool, FetchError> {
    if paths.model_dir_in(work_dir).is_dir() {
        return Ok(false);
    }
    tracing::debug!("creating model directory {}", paths.model_dir());
    run_checked(
        runner,
        ExternalCommand::new("mkdir", work_dir)
            .arg("-p")
            .arg(paths.model_dir()),
    )?;
    Ok(true)
}

/// `tar -zxvf <tarball>` in the working directory.
pub fn extract_tarball(
    runner: &dyn ProcessRunner,
    work_dir: &Path,
    paths: &ModelPaths,
) -> Result<(), FetchError> {
    tracing::info!("extracting {}", paths.tarball());
    run_checked(
        runner,
        ExternalCommand::new("tar", work_dir)
            .arg("-zxvf")
            .arg(paths.tarball()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SJQBN;
    use crate::process::RecordingRunner;
    use std::ffi::OsString;

    #[test]
    fn mkdir_only_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ModelPaths::new(&SJQBN, "X", "sjqbn");
        let runner = RecordingRunner::new();

        assert!(ensure_model_dir(&runner, dir.path(), &paths).unwrap());
        let calls = runner.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, "mkdir");
        assert_eq!(
            calls[0].args,
            vec![OsString::from("-p"), OsString::from("./sjqbn")]
        );
        assert_eq!(calls[0].cwd, dir.path());

        std::fs::create_dir(dir.path().join("sjqbn")).unwrap();
        let runner = RecordingRunner::new();
        assert!(!ensure_model_dir(&runner, dir.path(), &paths).unwrap());
        assert!(runner.calls().is_empty());
    }

    #[test]
    fn tar_failure_propagates_status() {
        let dir = tempfile::tempdir().unwrap();
        let paths = ModelPaths::new(&SJQBN, "X", "sjqbn");
        let runner = RecordingRunner::new().fail_with("tar", 2);
        let err = extract_tarball(&runner, dir.path(), &paths).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(
            runner.calls()[0].args,
            vec![
                OsString::from("-zxvf"),
                OsString::from("./sjqbn/model_SJQ_dll0.01.nc.tar.gz")
            ]
        );
    }
}
