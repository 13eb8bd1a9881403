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
//! Keyed inner hash join over whole relations.
//!
//! Responsibilities:
//! - Hashes the build relation on its key column, probes every probe chunk in order.
//! - Emits one output row per (probe row, matching build row) pair; duplicates are kept.
//! - Projects the join output down to the requested probe and build columns.
//!
//! Key exported interfaces:
//! - Types: `HashJoinSpec`.
//! - Functions: `inner_hash_join`.

use std::sync::Arc;

use arrow::datatypes::{FieldRef, Schema};

use super::join_hash_table::JoinHashTable;
use super::join_probe_utils::{build_join_batch, concat_build_columns};
use crate::catalog_pairs_logging::debug;
use crate::exec::chunk::Chunk;
use crate::exec::error::PairError;
use crate::exec::hash_table::key_rows::JoinKeyEncoder;
use crate::exec::relation::Relation;

/// Equi-join on one key column per side, plus the columns each side contributes.
#[derive(Clone, Debug)]
pub(crate) struct HashJoinSpec<'a> {
    pub(crate) probe_key: &'a str,
    pub(crate) build_key: &'a str,
    pub(crate) probe_output: &'a [&'a str],
    pub(crate) build_output: &'a [&'a str],
}

pub(crate) fn check_key_types(
    probe: &Relation,
    probe_key: &str,
    build: &Relation,
    build_key: &str,
) -> Result<JoinKeyEncoder, PairError> {
    let probe_type = probe.column_type(probe_key)?;
    let build_type = build.column_type(build_key)?;
    if probe_type != build_type {
        return Err(PairError::type_mismatch(
            probe.name(),
            probe_key,
            format!("{} (type of {}.{})", build_type, build.name(), build_key),
            &probe_type,
        ));
    }
    JoinKeyEncoder::try_new(&build_type).map_err(|_| {
        PairError::type_mismatch(build.name(), build_key, "a row-encodable key type", &build_type)
    })
}

/// Probe row indices are gathered as `u32`.
fn check_probe_chunk_rows(rows: usize) -> Result<(), PairError> {
    if rows > u32::MAX as usize {
        return Err(PairError::Exec(format!(
            "join probe chunk too large: rows={} limit={}",
            rows,
            u32::MAX
        )));
    }
    Ok(())
}

/// Inner-join `probe` with `build`. Rows whose key is null or has no match on
/// the other side are dropped.
pub(crate) fn inner_hash_join(
    probe: &Relation,
    build: &Relation,
    spec: &HashJoinSpec<'_>,
    output_name: &str,
) -> Result<Relation, PairError> {
    let encoder = check_key_types(probe, spec.probe_key, build, spec.build_key)?;
    let probe_key_idx = probe.column_index(spec.probe_key)?;
    let build_key_idx = build.column_index(spec.build_key)?;
    let probe_columns = probe.require_columns(spec.probe_output)?;
    let build_columns = build.require_columns(spec.build_output)?;

    let mut fields: Vec<FieldRef> = Vec::with_capacity(probe_columns.len() + build_columns.len());
    for name in spec.probe_output {
        fields.push(probe.field(name)?);
    }
    for name in spec.build_output {
        fields.push(build.field(name)?);
    }
    for (i, field) in fields.iter().enumerate() {
        if fields[..i].iter().any(|f| f.name() == field.name()) {
            return Err(PairError::Exec(format!(
                "duplicate output column '{}' in join {}",
                field.name(),
                output_name
            )));
        }
    }
    let output_schema = Arc::new(Schema::new(fields));

    if probe.is_empty() || build.is_empty() {
        debug!(
            "inner hash join {}: empty input (probe_rows={} build_rows={})",
            output_name,
            probe.num_rows(),
            build.num_rows()
        );
        return Ok(Relation::empty(output_name, output_schema));
    }

    let build_keys = build
        .chunks()
        .iter()
        .map(|c| c.column(build_key_idx))
        .collect::<Result<Vec<_>, _>>()
        .map_err(PairError::Exec)?;
    let table = JoinHashTable::build(&encoder, &build_keys).map_err(PairError::Exec)?;
    let build_types = spec
        .build_output
        .iter()
        .map(|c| build.column_type(c))
        .collect::<Result<Vec<_>, _>>()?;
    let build_values = concat_build_columns(build.chunks(), &build_columns, &build_types)
        .map_err(PairError::Exec)?;

    let mut out_chunks = Vec::with_capacity(probe.chunks().len());
    for chunk in probe.chunks() {
        check_probe_chunk_rows(chunk.len())?;
        let keys = encoder
            .encode(&chunk.column(probe_key_idx).map_err(PairError::Exec)?)
            .map_err(PairError::Exec)?;
        let mut probe_indices = Vec::new();
        let mut build_indices = Vec::new();
        for row in 0..keys.len() {
            let Some(key) = keys.key(row) else {
                continue;
            };
            let Some(group_id) = table.lookup(key) else {
                continue;
            };
            for build_row in table.group_rows(group_id) {
                probe_indices.push(row as u32);
                build_indices.push(build_row);
            }
        }
        if probe_indices.is_empty() {
            continue;
        }
        let batch = build_join_batch(
            chunk,
            &probe_columns,
            &build_values,
            &probe_indices,
            &build_indices,
            &output_schema,
        )
        .map_err(PairError::Exec)?;
        out_chunks.push(Chunk::new(batch));
    }

    let out = Relation::from_chunks(output_name, output_schema, out_chunks)?;
    debug!(
        "inner hash join {}: probe={} rows={} build={} rows={} groups={} output_rows={}",
        output_name,
        probe.name(),
        probe.num_rows(),
        build.name(),
        table.row_count(),
        table.group_count(),
        out.num_rows()
    );
    Ok(out)
}
