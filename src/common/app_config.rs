// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.
use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

static CONFIG: OnceLock<CatalogPairsConfig> = OnceLock::new();

fn default_log_level() -> String {
    "info".to_string()
}

pub fn init_from_path(path: impl AsRef<Path>) -> Result<&'static CatalogPairsConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let path = path.as_ref().to_path_buf();
    let cfg = CatalogPairsConfig::load_from_file(&path)?;
    let _ = CONFIG.set(cfg);
    CONFIG
        .get()
        .ok_or_else(|| anyhow!("config not initialized after set"))
}

pub fn init_from_env_or_default() -> Result<&'static CatalogPairsConfig> {
    if let Some(cfg) = CONFIG.get() {
        return Ok(cfg);
    }
    let path = config_path_from_env_or_default()?;
    init_from_path(path)
}

pub fn config() -> Result<&'static CatalogPairsConfig> {
    init_from_env_or_default()
}

fn config_path_from_env_or_default() -> Result<PathBuf> {
    if let Ok(p) = std::env::var("CATALOG_PAIRS_CONFIG")
        && !p.trim().is_empty()
    {
        return Ok(PathBuf::from(p.trim()));
    }

    let candidates = [PathBuf::from("catalog_pairs.toml")];
    for p in candidates {
        if p.exists() {
            return Ok(p);
        }
    }

    Err(anyhow!(
        "missing config file: set $CATALOG_PAIRS_CONFIG or create ./catalog_pairs.toml"
    ))
}

#[derive(Clone, Debug, Deserialize)]
pub struct CatalogPairsConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Optional full tracing EnvFilter expression.
    /// If set, this takes precedence over `log_level`.
    /// Example: "catalog_pairs=debug"
    #[serde(default)]
    pub log_filter: Option<String>,

    #[serde(default)]
    pub runtime: RuntimeConfig,

    #[serde(default)]
    pub debug: DebugConfig,
}

impl CatalogPairsConfig {
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read config file: {}", path.display()))?;
        let cfg: CatalogPairsConfig =
            toml::from_str(&s).with_context(|| format!("parse toml: {}", path.display()))?;
        if cfg.runtime.chunk_size == 0 {
            return Err(anyhow!(
                "invalid runtime.chunk_size in {}: must be greater than 0",
                path.display()
            ));
        }
        Ok(cfg)
    }

    /// Filter expression handed to the tracing subscriber.
    pub fn effective_log_filter(&self) -> &str {
        self.log_filter
            .as_deref()
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(&self.log_level)
    }
}

impl Default for CatalogPairsConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_filter: None,
            runtime: RuntimeConfig::default(),
            debug: DebugConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct RuntimeConfig {
    /// Upper bound on rows per output chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
}

fn default_chunk_size() -> usize {
    super::config::DEFAULT_CHUNK_SIZE
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            chunk_size: default_chunk_size(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct DebugConfig {
    #[serde(default)]
    pub exec_node_output: bool,
}

#[cfg(test)]
mod tests {
    use super::CatalogPairsConfig;

    #[test]
    fn test_runtime_chunk_size_default() {
        let cfg: CatalogPairsConfig = toml::from_str(
            r#"
[runtime]
"#,
        )
        .expect("parse config");
        assert_eq!(cfg.runtime.chunk_size, 4096);
        assert!(!cfg.debug.exec_node_output);
    }

    #[test]
    fn test_runtime_chunk_size_can_be_overridden() {
        let cfg: CatalogPairsConfig = toml::from_str(
            r#"
[runtime]
chunk_size = 2

[debug]
exec_node_output = true
"#,
        )
        .expect("parse config");
        assert_eq!(cfg.runtime.chunk_size, 2);
        assert!(cfg.debug.exec_node_output);
    }

    #[test]
    fn test_log_filter_takes_precedence_over_level() {
        let cfg: CatalogPairsConfig = toml::from_str(
            r#"
log_level = "warn"
log_filter = "catalog_pairs=trace"
"#,
        )
        .expect("parse config");
        assert_eq!(cfg.effective_log_filter(), "catalog_pairs=trace");

        let cfg: CatalogPairsConfig = toml::from_str("log_level = \"warn\"").expect("parse");
        assert_eq!(cfg.effective_log_filter(), "warn");
    }

    #[test]
    fn test_zero_chunk_size_is_rejected() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("catalog_pairs.toml");
        std::fs::write(&path, "[runtime]\nchunk_size = 0\n").expect("write config");
        let err = CatalogPairsConfig::load_from_file(&path).expect_err("expected error");
        assert!(err.to_string().contains("chunk_size"), "err={err}");
    }
}
