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
//! Utility functions for hash-join probe output construction.
//!
//! Responsibilities:
//! - Concatenates build-side output columns so build rows are addressable by global row id.
//! - Gathers matched probe/build row index pairs into joined output batches.
//!
//! Key exported interfaces:
//! - Functions: `concat_build_columns`, `build_join_batch`.

use arrow::array::{Array, ArrayRef, UInt32Array, new_empty_array};
use arrow::compute::{concat, take};
use arrow::datatypes::{DataType, SchemaRef};
use arrow::record_batch::RecordBatch;

use crate::exec::chunk::Chunk;

/// Concatenate column `idx` of every build chunk into one array.
pub(crate) fn concat_build_columns(
    chunks: &[Chunk],
    column_indices: &[usize],
    column_types: &[DataType],
) -> Result<Vec<ArrayRef>, String> {
    let mut out = Vec::with_capacity(column_indices.len());
    for (&idx, data_type) in column_indices.iter().zip(column_types) {
        if chunks.is_empty() {
            out.push(new_empty_array(data_type));
            continue;
        }
        let parts = chunks
            .iter()
            .map(|c| c.column(idx))
            .collect::<Result<Vec<_>, _>>()?;
        let refs: Vec<&dyn Array> = parts.iter().map(|a| a.as_ref()).collect();
        out.push(concat(&refs).map_err(|e| e.to_string())?);
    }
    Ok(out)
}

/// Build joined rows from matched probe/build row index pairs.
///
/// Output columns are the selected probe columns followed by the selected
/// build columns, in the order of `output_schema`.
pub(crate) fn build_join_batch(
    probe: &Chunk,
    probe_columns: &[usize],
    build_columns: &[ArrayRef],
    probe_indices: &[u32],
    build_indices: &[u32],
    output_schema: &SchemaRef,
) -> Result<RecordBatch, String> {
    if probe_indices.len() != build_indices.len() {
        return Err(format!(
            "join index length mismatch: probe={} build={}",
            probe_indices.len(),
            build_indices.len()
        ));
    }
    let expected = probe_columns.len() + build_columns.len();
    if output_schema.fields().len() != expected {
        return Err(format!(
            "join output schema has {} fields, expected {}",
            output_schema.fields().len(),
            expected
        ));
    }

    let probe_take = UInt32Array::from(probe_indices.to_vec());
    let build_take = UInt32Array::from(build_indices.to_vec());
    let mut columns = Vec::with_capacity(expected);
    for &idx in probe_columns {
        let col = probe.column(idx)?;
        columns.push(take(col.as_ref(), &probe_take, None).map_err(|e| e.to_string())?);
    }
    for col in build_columns {
        columns.push(take(col.as_ref(), &build_take, None).map_err(|e| e.to_string())?);
    }
    RecordBatch::try_new(output_schema.clone(), columns).map_err(|e| e.to_string())
}
