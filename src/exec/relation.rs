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
//! Named relations: a schema plus zero or more chunks sharing it.
//!
//! Relations are the unit the resolver consumes and produces. Column lookup
//! is by name against the relation schema, so a relation with zero chunks
//! still answers schema questions.

use std::sync::Arc;

use arrow::array::RecordBatch;
use arrow::compute::concat_batches;
use arrow::datatypes::{DataType, FieldRef, SchemaRef};

use crate::exec::chunk::Chunk;
use crate::exec::error::PairError;

#[derive(Clone, Debug)]
pub struct Relation {
    name: Arc<str>,
    schema: SchemaRef,
    chunks: Vec<Chunk>,
}

impl Relation {
    /// Build a relation from record batches that must all carry `schema`'s fields.
    pub fn try_new(
        name: impl Into<String>,
        schema: SchemaRef,
        batches: Vec<RecordBatch>,
    ) -> Result<Self, PairError> {
        Self::from_chunks(name, schema, batches.into_iter().map(Chunk::new).collect())
    }

    pub fn from_batch(name: impl Into<String>, batch: RecordBatch) -> Self {
        let schema = batch.schema();
        Self {
            name: Arc::from(name.into()),
            schema,
            chunks: vec![Chunk::new(batch)],
        }
    }

    pub fn empty(name: impl Into<String>, schema: SchemaRef) -> Self {
        Self {
            name: Arc::from(name.into()),
            schema,
            chunks: Vec::new(),
        }
    }

    pub fn from_chunks(
        name: impl Into<String>,
        schema: SchemaRef,
        chunks: Vec<Chunk>,
    ) -> Result<Self, PairError> {
        let name: String = name.into();
        for (idx, chunk) in chunks.iter().enumerate() {
            let chunk_schema = chunk.schema();
            if chunk_schema.fields() != schema.fields() {
                return Err(PairError::schema_mismatch(
                    &name,
                    format!(
                        "chunk {} columns {:?} do not match relation columns {:?}",
                        idx,
                        field_names(chunk_schema.fields().iter()),
                        field_names(schema.fields().iter())
                    ),
                ));
            }
        }
        Ok(Self {
            name: Arc::from(name),
            schema,
            chunks,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> SchemaRef {
        Arc::clone(&self.schema)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn num_rows(&self) -> usize {
        self.chunks.iter().map(Chunk::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        field_names(self.schema.fields().iter())
    }

    pub fn logical_bytes(&self) -> usize {
        self.chunks.iter().map(Chunk::logical_bytes).sum()
    }

    /// Resolve `column` to its index, rejecting absent and duplicated names.
    pub fn column_index(&self, column: &str) -> Result<usize, PairError> {
        let mut found = None;
        for (idx, field) in self.schema.fields().iter().enumerate() {
            if field.name() != column {
                continue;
            }
            if found.is_some() {
                return Err(PairError::AmbiguousColumn {
                    relation: self.name.to_string(),
                    column: column.to_string(),
                });
            }
            found = Some(idx);
        }
        found.ok_or_else(|| PairError::missing_column(&self.name, column))
    }

    pub fn field(&self, column: &str) -> Result<FieldRef, PairError> {
        let idx = self.column_index(column)?;
        Ok(Arc::clone(&self.schema.fields()[idx]))
    }

    pub fn column_type(&self, column: &str) -> Result<DataType, PairError> {
        Ok(self.field(column)?.data_type().clone())
    }

    pub fn require_columns(&self, columns: &[&str]) -> Result<Vec<usize>, PairError> {
        columns.iter().map(|c| self.column_index(c)).collect()
    }

    pub(crate) fn renamed(mut self, name: &str) -> Self {
        self.name = Arc::from(name);
        self
    }

    /// Re-slice chunks so none exceeds `max_rows`; empty chunks are dropped.
    pub fn rechunk(self, max_rows: usize) -> Self {
        let max_rows = max_rows.max(1);
        let mut chunks = Vec::with_capacity(self.chunks.len());
        for chunk in self.chunks {
            let len = chunk.len();
            if len == 0 {
                continue;
            }
            if len <= max_rows {
                chunks.push(chunk);
                continue;
            }
            let mut offset = 0;
            while offset < len {
                let length = max_rows.min(len - offset);
                chunks.push(chunk.slice(offset, length));
                offset += length;
            }
        }
        Self {
            name: self.name,
            schema: self.schema,
            chunks,
        }
    }

    /// Concatenate all chunks into one batch carrying the relation schema.
    pub fn to_batch(&self) -> Result<RecordBatch, PairError> {
        let batches = self.chunks.iter().map(|c| &c.batch);
        Ok(concat_batches(&self.schema, batches)?)
    }
}

fn field_names<'a>(fields: impl Iterator<Item = &'a FieldRef>) -> Vec<String> {
    fields.map(|f| f.name().to_string()).collect()
}
