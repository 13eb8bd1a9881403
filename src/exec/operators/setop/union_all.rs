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
//! UNION ALL by column name.
//!
//! Responsibilities:
//! - Validates that every input carries exactly the expected column-name set.
//! - Reorders each input's columns by name into the output order, then concatenates chunks.
//!
//! Key exported interfaces:
//! - Functions: `union_all_by_name`.
//!
//! Current limitations:
//! - No type widening: same-named columns must already share a data type.

use std::sync::Arc;

use arrow::datatypes::{Field, Schema};
use arrow::record_batch::RecordBatch;

use crate::catalog_pairs_logging::debug;
use crate::exec::chunk::Chunk;
use crate::exec::error::PairError;
use crate::exec::relation::Relation;

/// Column indices of `input` in `columns` order, failing unless the input's
/// column-name set is exactly `columns`.
fn align_by_name(input: &Relation, columns: &[&str]) -> Result<Vec<usize>, PairError> {
    let actual = input.column_names();
    let mismatch = || {
        PairError::schema_mismatch(
            input.name(),
            format!("union by name expects columns {columns:?}, got {actual:?}"),
        )
    };
    if actual.len() != columns.len() {
        return Err(mismatch());
    }
    columns
        .iter()
        .map(|c| match input.column_index(c) {
            Err(PairError::MissingColumn { .. }) => Err(mismatch()),
            other => other,
        })
        .collect()
}

/// Concatenate `inputs` aligned by column name. The output schema follows
/// `columns` order; a column is nullable if it is nullable in any input.
pub(crate) fn union_all_by_name(
    output_name: &str,
    inputs: &[Relation],
    columns: &[&str],
) -> Result<Relation, PairError> {
    let Some(first) = inputs.first() else {
        return Err(PairError::Exec(format!(
            "union {output_name} requires at least one input"
        )));
    };

    let mut alignments = Vec::with_capacity(inputs.len());
    for input in inputs {
        alignments.push(align_by_name(input, columns)?);
    }

    let mut fields = Vec::with_capacity(columns.len());
    for name in columns {
        let base = first.field(name)?;
        let mut nullable = base.is_nullable();
        for input in &inputs[1..] {
            let field = input.field(name)?;
            if field.data_type() != base.data_type() {
                return Err(PairError::type_mismatch(
                    input.name(),
                    name,
                    format!("{} (type of {}.{})", base.data_type(), first.name(), name),
                    field.data_type(),
                ));
            }
            nullable |= field.is_nullable();
        }
        fields.push(Field::new(*name, base.data_type().clone(), nullable));
    }
    let output_schema = Arc::new(Schema::new(fields));

    let mut out_chunks = Vec::new();
    for (input, indices) in inputs.iter().zip(&alignments) {
        for chunk in input.chunks() {
            if chunk.is_empty() {
                continue;
            }
            let cols = indices
                .iter()
                .map(|&idx| chunk.column(idx))
                .collect::<Result<Vec<_>, _>>()
                .map_err(PairError::Exec)?;
            let batch = RecordBatch::try_new(Arc::clone(&output_schema), cols)?;
            out_chunks.push(Chunk::new(batch));
        }
    }

    let out = Relation::from_chunks(output_name, output_schema, out_chunks)?;
    debug!(
        "union all by name {}: inputs={} output_rows={}",
        output_name,
        inputs
            .iter()
            .map(|r| format!("{}:{}", r.name(), r.num_rows()))
            .collect::<Vec<_>>()
            .join(","),
        out.num_rows()
    );
    Ok(out)
}
