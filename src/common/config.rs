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
use std::sync::OnceLock;

use crate::catalog_pairs_config::config as catalog_pairs_app_config;
use crate::catalog_pairs_logging::debug;

pub(crate) const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Resolver settings taken from the config file. Captured on first use and
/// never re-read.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ResolverSettings {
    pub(crate) chunk_size: usize,
    pub(crate) exec_node_output: bool,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            exec_node_output: false,
        }
    }
}

static RESOLVER_SETTINGS: OnceLock<ResolverSettings> = OnceLock::new();

pub(crate) fn resolver_settings() -> ResolverSettings {
    *RESOLVER_SETTINGS.get_or_init(|| match catalog_pairs_app_config() {
        Ok(cfg) => ResolverSettings {
            chunk_size: cfg.runtime.chunk_size.max(1),
            exec_node_output: cfg.debug.exec_node_output,
        },
        Err(err) => {
            debug!("catalog_pairs config unavailable, using built-in defaults: {err:#}");
            ResolverSettings::default()
        }
    })
}
