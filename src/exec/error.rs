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
use std::fmt;

use arrow::datatypes::DataType;
use arrow::error::ArrowError;

/// Failure surfaced by the pair resolver or one of its operators.
///
/// Referential-integrity gaps (dangling ids) are never errors; they drop rows.
#[derive(Debug, Clone, PartialEq)]
pub enum PairError {
    /// A required column is absent from an input relation.
    MissingColumn { relation: String, column: String },
    /// A required column name appears more than once in a relation schema.
    AmbiguousColumn { relation: String, column: String },
    /// A column exists but its type cannot be used where it is referenced.
    TypeMismatch {
        relation: String,
        column: String,
        expected: String,
        actual: DataType,
    },
    /// A chunk or union input does not carry the expected column layout.
    SchemaMismatch { relation: String, detail: String },
    /// Arrow kernel failure or broken engine invariant.
    Exec(String),
}

impl PairError {
    pub(crate) fn missing_column(relation: &str, column: &str) -> Self {
        Self::MissingColumn {
            relation: relation.to_string(),
            column: column.to_string(),
        }
    }

    pub(crate) fn type_mismatch(
        relation: &str,
        column: &str,
        expected: impl Into<String>,
        actual: &DataType,
    ) -> Self {
        Self::TypeMismatch {
            relation: relation.to_string(),
            column: column.to_string(),
            expected: expected.into(),
            actual: actual.clone(),
        }
    }

    pub(crate) fn schema_mismatch(relation: &str, detail: impl Into<String>) -> Self {
        Self::SchemaMismatch {
            relation: relation.to_string(),
            detail: detail.into(),
        }
    }
}

impl fmt::Display for PairError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingColumn { relation, column } => {
                write!(f, "missing column '{column}' in relation '{relation}'")
            }
            Self::AmbiguousColumn { relation, column } => {
                write!(f, "ambiguous column '{column}' in relation '{relation}'")
            }
            Self::TypeMismatch {
                relation,
                column,
                expected,
                actual,
            } => write!(
                f,
                "type mismatch for column '{column}' in relation '{relation}': expected {expected}, got {actual}"
            ),
            Self::SchemaMismatch { relation, detail } => {
                write!(f, "schema mismatch in relation '{relation}': {detail}")
            }
            Self::Exec(message) => write!(f, "execution failed: {message}"),
        }
    }
}

impl std::error::Error for PairError {}

impl From<ArrowError> for PairError {
    fn from(err: ArrowError) -> Self {
        Self::Exec(err.to_string())
    }
}
