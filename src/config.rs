use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::engine_types::PrimeResult;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// この値未満の素数を求める。
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// ベンチマークを回す秒数。
    #[serde(default = "default_duration_secs")]
    pub duration_secs: f64,
    /// 見つかった素数をすべて表示するか。
    #[serde(default)]
    pub show_results: bool,
}

fn default_limit() -> usize {
    1_000_000
}

fn default_duration_secs() -> f64 {
    5.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            limit: default_limit(),
            duration_secs: default_duration_secs(),
            show_results: false,
        }
    }
}

pub const SETTINGS_FILE: &str = "settings.toml";

pub fn load_config(path: &Path) -> PrimeResult<Config> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    let cfg = toml::from_str(&contents)?;
    Ok(cfg)
}

/// 設定ファイルがあれば読み込み、なければデフォルト設定を返す（ファイルは作らない）。
pub fn load_config_or_default(path: &Path) -> PrimeResult<Config> {
    if path.exists() {
        log::info!("Loading settings from {}", path.display());
        load_config(path)
    } else {
        Ok(Config::default())
    }
}

pub fn save_config(cfg: &Config, path: &Path) -> PrimeResult<()> {
    let toml_str = toml::to_string_pretty(cfg)?;
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(toml_str.as_bytes())?;
    writer.flush()?;
    Ok(())
}
