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
//! Distinct key set over one column of a relation.
//!
//! Responsibilities:
//! - Collects the distinct non-null values of a key column as encoded rows.
//! - Answers set-membership probes for anti/semi style filters.
//!
//! Key exported interfaces:
//! - Types: `DistinctKeySet`.

use hashbrown::HashSet;

use crate::catalog_pairs_logging::debug;
use crate::exec::error::PairError;
use crate::exec::hash_table::key_rows::JoinKeyEncoder;
use crate::exec::relation::Relation;

/// Distinct non-null values of one relation column. Duplicate input rows
/// collapse to one entry, so membership never depends on input cardinality.
pub(crate) struct DistinctKeySet {
    encoder: JoinKeyEncoder,
    keys: HashSet<Box<[u8]>>,
}

impl DistinctKeySet {
    pub(crate) fn build(relation: &Relation, column: &str) -> Result<Self, PairError> {
        let idx = relation.column_index(column)?;
        let data_type = relation.column_type(column)?;
        let encoder = JoinKeyEncoder::try_new(&data_type).map_err(|_| {
            PairError::type_mismatch(
                relation.name(),
                column,
                "a row-encodable key type",
                &data_type,
            )
        })?;

        let mut keys = HashSet::new();
        for chunk in relation.chunks() {
            let encoded = encoder
                .encode(&chunk.column(idx).map_err(PairError::Exec)?)
                .map_err(PairError::Exec)?;
            for row in 0..encoded.len() {
                if let Some(key) = encoded.key(row)
                    && !keys.contains(key)
                {
                    keys.insert(Box::from(key));
                }
            }
        }
        debug!(
            "distinct key set {}.{}: source_rows={} distinct={}",
            relation.name(),
            column,
            relation.num_rows(),
            keys.len()
        );
        Ok(Self { encoder, keys })
    }

    pub(crate) fn encoder(&self) -> &JoinKeyEncoder {
        &self.encoder
    }

    pub(crate) fn contains(&self, key: &[u8]) -> bool {
        self.keys.contains(key)
    }

    pub(crate) fn len(&self) -> usize {
        self.keys.len()
    }
}
