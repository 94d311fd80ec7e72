//! The fetch flow.
//!
//! Terminal on the first branch that applies:
//! config invalid → fail; shared-volume copy → link and stop; data file
//! present → skip; otherwise download the tarball and extract it.
//!
//! After a successful branch, each configured `data_file` is looked up in
//! the resulting model directory. Missing ones are reported as events; they
//! do not fail the run.

mod error;

pub use error::FetchError;

use crate::config::{load_config, DatasetEntry};
use crate::downloader::download_to_file;
use crate::extract::{ensure_model_dir, extract_tarball};
use crate::model::{ModelPaths, ModelSpec};
use crate::process::{ExternalCommand, ProcessRunner};
use crate::volume::{find_volume_copy, link_volume_copy};
use std::path::{Path, PathBuf};

/// Inputs read once from the process environment.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Directory the model directory (or link) is created in.
    pub work_dir: PathBuf,
    /// Value of `CVM_VOLUME_TOP_DIR`, if set.
    pub volume_top_dir: Option<String>,
}

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A shared copy was linked into the working directory.
    Linked { target: PathBuf },
    /// The data file was already there; nothing fetched.
    AlreadyPresent { data_file: PathBuf },
    /// Tarball downloaded and extracted.
    Downloaded {
        url: String,
        tarball: PathBuf,
        bytes: u64,
    },
}

/// Progress notifications for user-facing output.
#[derive(Debug, Clone, Copy)]
pub enum FetchEvent<'a> {
    /// Config loaded; the flow is about to start.
    Starting,
    Linking { target: &'a Path },
    Downloading { tarball: &'a str, url: &'a str },
    Extracting { tarball: &'a str },
    /// A configured dataset file is not in the model directory.
    DatasetMissing { label: &'a str, file: &'a Path },
}

pub struct Fetcher<'a> {
    model: ModelSpec,
    paths: ModelPaths,
    runner: &'a dyn ProcessRunner,
    datasets: Vec<DatasetEntry>,
}

impl<'a> Fetcher<'a> {
    pub fn new(model: ModelSpec, paths: ModelPaths, runner: &'a dyn ProcessRunner) -> Self {
        Self {
            model,
            paths,
            runner,
            datasets: Vec::new(),
        }
    }

    /// Dataset files expected inside the model directory once fetched.
    pub fn with_datasets(mut self, datasets: Vec<DatasetEntry>) -> Self {
        self.datasets = datasets;
        self
    }

    pub fn run(
        &self,
        request: &FetchRequest,
        on_event: &mut dyn FnMut(FetchEvent<'_>),
    ) -> Result<FetchOutcome, FetchError> {
        let outcome = self.run_inner(request, on_event)?;
        let model_dir = match &outcome {
            FetchOutcome::Linked { target } => target.clone(),
            _ => self.paths.model_dir_in(&request.work_dir),
        };
        self.check_datasets(&model_dir, on_event);
        Ok(outcome)
    }

    fn check_datasets(&self, model_dir: &Path, on_event: &mut dyn FnMut(FetchEvent<'_>)) {
        for entry in &self.datasets {
            let file = model_dir.join(&entry.file);
            if file.is_file() {
                tracing::debug!("dataset {} present at {}", entry.label, file.display());
                continue;
            }
            tracing::info!("dataset {} not found at {}", entry.label, file.display());
            on_event(FetchEvent::DatasetMissing {
                label: &entry.label,
                file: &file,
            });
        }
    }

    fn run_inner(
        &self,
        request: &FetchRequest,
        on_event: &mut dyn FnMut(FetchEvent<'_>),
    ) -> Result<FetchOutcome, FetchError> {
        let work_dir = request.work_dir.as_path();
        tracing::info!(
            "fetching {} into {}",
            self.model.id,
            self.paths.model_dir_in(work_dir).display()
        );
        on_event(FetchEvent::Starting);

        if let Some(target) = find_volume_copy(request.volume_top_dir.as_deref(), &self.paths) {
            on_event(FetchEvent::Linking { target: &target });
            link_volume_copy(self.runner, work_dir, &target)?;
            return Ok(FetchOutcome::Linked { target });
        }

        ensure_model_dir(self.runner, work_dir, &self.paths)?;

        let data_file = self.paths.data_file_in(work_dir);
        if data_file.is_file() {
            tracing::info!("{} already present, skipping download", data_file.display());
            return Ok(FetchOutcome::AlreadyPresent { data_file });
        }

        let url = self.paths.archive_url();
        let tarball_rel = self.paths.tarball();
        let tarball = self.paths.tarball_in(work_dir);
        on_event(FetchEvent::Downloading {
            tarball: &tarball_rel,
            url: &url,
        });
        let bytes = download_to_file(&url, &tarball)?;

        on_event(FetchEvent::Extracting {
            tarball: &tarball_rel,
        });
        extract_tarball(self.runner, work_dir, &self.paths)?;

        Ok(FetchOutcome::Downloaded {
            url,
            tarball,
            bytes,
        })
    }
}

/// Load the config at `config_path` and run the fetch flow for `model`.
/// A config error is returned before anything else is touched.
pub fn fetch_with_config(
    config_path: &Path,
    model: ModelSpec,
    request: &FetchRequest,
    runner: &dyn ProcessRunner,
    on_event: &mut dyn FnMut(FetchEvent<'_>),
) -> Result<FetchOutcome, FetchError> {
    let config = load_config(config_path, &model)?;
    tracing::debug!("derived paths: {:?}", config.paths);
    Fetcher::new(model, config.paths, runner)
        .with_datasets(config.settings.datasets)
        .run(request, on_event)
}

/// Run `command` and turn spawn failures or non-zero exits into [`FetchError`].
pub(crate) fn run_checked(
    runner: &dyn ProcessRunner,
    command: ExternalCommand,
) -> Result<(), FetchError> {
    let status = runner
        .run(&command)
        .map_err(|source| FetchError::CommandSpawn {
            command: command.to_string(),
            source,
        })?;
    if !status.success() {
        return Err(FetchError::CommandFailed {
            command: command.to_string(),
            code: status.code,
        });
    }
    Ok(())
}
