#![allow(dead_code)]

pub mod archive_server;

use std::path::Path;

/// Write a `./config` file the way a CVM model install ships it.
pub fn write_config(work_dir: &Path, model_data_path: &str, model_dir: &str) {
    let text = format!(
        "# SJQBN model configuration\n\
         utm_zone = 11\n\
         model_data_path = {}\n\
         model_dir = {}\n\
         interpolation = on\n",
        model_data_path, model_dir
    );
    std::fs::write(work_dir.join("config"), text).expect("write config");
}
