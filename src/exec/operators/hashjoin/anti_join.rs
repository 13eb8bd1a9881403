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
//! Left anti join against a distinct key set.
//!
//! Responsibilities:
//! - Keeps probe rows whose key is absent from a `DistinctKeySet`.
//! - Null probe keys never match, so such rows are kept.
//!
//! Key exported interfaces:
//! - Functions: `left_anti_join`.

use arrow::array::BooleanArray;
use arrow::compute::filter_record_batch;

use crate::catalog_pairs_logging::debug;
use crate::exec::chunk::Chunk;
use crate::exec::error::PairError;
use crate::exec::operators::setop::distinct_set::DistinctKeySet;
use crate::exec::relation::Relation;

/// Rows of `probe` whose `probe_key` does not occur in `keys`. All probe
/// columns are kept; callers project afterwards.
pub(crate) fn left_anti_join(
    probe: &Relation,
    probe_key: &str,
    keys: &DistinctKeySet,
    output_name: &str,
) -> Result<Relation, PairError> {
    let key_idx = probe.column_index(probe_key)?;
    let key_type = probe.column_type(probe_key)?;
    let set_type = keys.encoder().data_type();
    if &key_type != set_type {
        return Err(PairError::type_mismatch(
            probe.name(),
            probe_key,
            format!("{set_type} (type of the anti join key set)"),
            &key_type,
        ));
    }

    let mut out_chunks = Vec::with_capacity(probe.chunks().len());
    for chunk in probe.chunks() {
        let encoded = keys
            .encoder()
            .encode(&chunk.column(key_idx).map_err(PairError::Exec)?)
            .map_err(PairError::Exec)?;
        let keep = BooleanArray::from(
            (0..encoded.len())
                .map(|row| encoded.key(row).is_none_or(|k| !keys.contains(k)))
                .collect::<Vec<_>>(),
        );
        if keep.true_count() == 0 {
            continue;
        }
        out_chunks.push(Chunk::new(filter_record_batch(&chunk.batch, &keep)?));
    }

    let out = Relation::from_chunks(output_name, probe.schema(), out_chunks)?;
    debug!(
        "left anti join {}: probe={} rows={} key_set={} output_rows={}",
        output_name,
        probe.name(),
        probe.num_rows(),
        keys.len(),
        out.num_rows()
    );
    Ok(out)
}
