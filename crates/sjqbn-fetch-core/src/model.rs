//! Model identity and the paths derived from it.
//!
//! Every path the fetcher touches is a pure function of the two config
//! values and the [`ModelSpec`] constant, so derivation lives here and the
//! rest of the crate only consumes [`ModelPaths`].

use std::path::{Path, PathBuf};

/// Suffix of the compressed archive published next to each data file.
pub const TARBALL_SUFFIX: &str = ".tar.gz";

/// Fixed description of one dataset variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSpec {
    /// Identifier appended to `model_data_path` on the remote side.
    pub id: &'static str,
    /// Name of the extracted dataset file inside the model directory.
    pub data_file: &'static str,
}

/// The San Joaquin basin model shipped as a single NetCDF grid.
pub const SJQBN: ModelSpec = ModelSpec {
    id: "SJQBN",
    data_file: "model_SJQ_dll0.01.nc",
};

impl ModelSpec {
    /// Archive file name, e.g. `model_SJQ_dll0.01.nc.tar.gz`.
    pub fn tarball_name(&self) -> String {
        format!("{}{}", self.data_file, TARBALL_SUFFIX)
    }
}

/// Paths derived from `model_data_path`, `model_dir` and a [`ModelSpec`].
///
/// `model_dir` is kept in its `./<value>` form because that is what gets
/// passed to `mkdir` and `tar`. Filesystem checks resolve it against an
/// explicit working directory instead of the process cwd.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelPaths {
    remote_base: String,
    model_dir: String,
    data_file: String,
    tarball: String,
}

impl ModelPaths {
    pub fn new(model: &ModelSpec, model_data_path: &str, model_dir: &str) -> Self {
        Self {
            remote_base: format!("{}/{}", model_data_path, model.id),
            model_dir: format!("./{}", model_dir),
            data_file: model.data_file.to_string(),
            tarball: model.tarball_name(),
        }
    }

    /// Remote base path: `<model_data_path>/<model id>`.
    pub fn remote_base(&self) -> &str {
        &self.remote_base
    }

    /// Local model directory in `./<model_dir>` form.
    pub fn model_dir(&self) -> &str {
        &self.model_dir
    }

    /// Model directory name without the leading `./`.
    pub fn model_dir_name(&self) -> &str {
        self.model_dir.strip_prefix("./").unwrap_or(&self.model_dir)
    }

    /// Data file relative to the working directory, e.g. `./dir/model_SJQ_dll0.01.nc`.
    pub fn data_file(&self) -> String {
        format!("{}/{}", self.model_dir, self.data_file)
    }

    /// Tarball relative to the working directory.
    pub fn tarball(&self) -> String {
        format!("{}/{}", self.model_dir, self.tarball)
    }

    /// Full URL of the archive: `<remote base>/<model_dir>/<tarball name>`.
    pub fn archive_url(&self) -> String {
        format!(
            "{}/{}/{}",
            self.remote_base,
            self.model_dir_name(),
            self.tarball
        )
    }

    pub fn model_dir_in(&self, work_dir: &Path) -> PathBuf {
        work_dir.join(self.model_dir_name())
    }

    pub fn data_file_in(&self, work_dir: &Path) -> PathBuf {
        self.model_dir_in(work_dir).join(&self.data_file)
    }

    pub fn tarball_in(&self, work_dir: &Path) -> PathBuf {
        self.model_dir_in(work_dir).join(&self.tarball)
    }
}
