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
//! Projection by column name with optional typed null literals.
//!
//! Key exported interfaces:
//! - Types: `ProjectExpr`.
//! - Functions: `project`.

use std::sync::Arc;

use arrow::array::new_null_array;
use arrow::datatypes::{DataType, Field, FieldRef, Schema};
use arrow::record_batch::RecordBatch;

use crate::exec::chunk::Chunk;
use crate::exec::error::PairError;
use crate::exec::relation::Relation;

#[derive(Clone, Debug)]
pub(crate) enum ProjectExpr<'a> {
    /// Pass an input column through unchanged.
    Column(&'a str),
    /// A null literal of `data_type`, named `name`.
    NullLiteral { name: &'a str, data_type: DataType },
}

enum ResolvedExpr {
    Column(usize),
    Null(DataType),
}

pub(crate) fn project(
    input: &Relation,
    exprs: &[ProjectExpr<'_>],
    output_name: &str,
) -> Result<Relation, PairError> {
    let mut fields: Vec<FieldRef> = Vec::with_capacity(exprs.len());
    let mut resolved = Vec::with_capacity(exprs.len());
    for expr in exprs {
        match expr {
            ProjectExpr::Column(name) => {
                resolved.push(ResolvedExpr::Column(input.column_index(name)?));
                fields.push(input.field(name)?);
            }
            ProjectExpr::NullLiteral { name, data_type } => {
                resolved.push(ResolvedExpr::Null(data_type.clone()));
                fields.push(Arc::new(Field::new(*name, data_type.clone(), true)));
            }
        }
    }
    let output_schema = Arc::new(Schema::new(fields));

    let mut out_chunks = Vec::with_capacity(input.chunks().len());
    for chunk in input.chunks() {
        let mut columns = Vec::with_capacity(resolved.len());
        for expr in &resolved {
            match expr {
                ResolvedExpr::Column(idx) => {
                    columns.push(chunk.column(*idx).map_err(PairError::Exec)?);
                }
                ResolvedExpr::Null(data_type) => {
                    columns.push(new_null_array(data_type, chunk.len()));
                }
            }
        }
        let batch = RecordBatch::try_new(Arc::clone(&output_schema), columns)?;
        out_chunks.push(Chunk::new(batch));
    }
    Relation::from_chunks(output_name, output_schema, out_chunks)
}
