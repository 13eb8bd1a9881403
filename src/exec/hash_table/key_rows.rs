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
//! Row-format key encoding for single-column join keys.
//!
//! Responsibilities:
//! - Converts a key column of any row-encodable Arrow type into comparable byte rows.
//! - Tracks key nulls so callers can apply `=` semantics (null never matches).
//! - Canonicalises float keys so `-0.0 = 0.0` and `NaN = NaN`.
//!
//! Key exported interfaces:
//! - Types: `JoinKeyEncoder`, `EncodedKeys`.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, AsArray};
use arrow::buffer::NullBuffer;
use arrow::datatypes::{DataType, Float32Type, Float64Type};
use arrow::row::{RowConverter, Rows, SortField};

/// Encoder for one key column type. Both sides of a join must use the same
/// encoder so equal values produce equal bytes.
pub(crate) struct JoinKeyEncoder {
    data_type: DataType,
    converter: RowConverter,
}

impl JoinKeyEncoder {
    pub(crate) fn try_new(data_type: &DataType) -> Result<Self, String> {
        let fields = vec![SortField::new(data_type.clone())];
        if !RowConverter::supports_fields(&fields) {
            return Err(format!("join key type {data_type} is not row-encodable"));
        }
        let converter = RowConverter::new(fields).map_err(|e| e.to_string())?;
        Ok(Self {
            data_type: data_type.clone(),
            converter,
        })
    }

    pub(crate) fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub(crate) fn encode(&self, keys: &ArrayRef) -> Result<EncodedKeys, String> {
        if keys.data_type() != &self.data_type {
            return Err(format!(
                "join key type mismatch: encoder={} array={}",
                self.data_type,
                keys.data_type()
            ));
        }
        let rows = self
            .converter
            .convert_columns(&[canonical_float_keys(keys)])
            .map_err(|e| e.to_string())?;
        Ok(EncodedKeys {
            rows,
            nulls: keys.logical_nulls(),
        })
    }
}

/// The row format orders floats by their bits, so signed zeros and NaN
/// payloads would otherwise encode to distinct keys.
fn canonical_float_keys(keys: &ArrayRef) -> ArrayRef {
    match keys.data_type() {
        DataType::Float32 => Arc::new(
            keys.as_primitive::<Float32Type>()
                .unary::<_, Float32Type>(|v| {
                    if v.is_nan() {
                        f32::NAN
                    } else if v == 0.0 {
                        0.0
                    } else {
                        v
                    }
                }),
        ),
        DataType::Float64 => Arc::new(
            keys.as_primitive::<Float64Type>()
                .unary::<_, Float64Type>(|v| {
                    if v.is_nan() {
                        f64::NAN
                    } else if v == 0.0 {
                        0.0
                    } else {
                        v
                    }
                }),
        ),
        _ => Arc::clone(keys),
    }
}

/// Encoded key rows for one chunk.
pub(crate) struct EncodedKeys {
    rows: Rows,
    nulls: Option<NullBuffer>,
}

impl EncodedKeys {
    pub(crate) fn len(&self) -> usize {
        self.rows.num_rows()
    }

    /// Encoded key bytes, or `None` for a null key.
    pub(crate) fn key(&self, row: usize) -> Option<&[u8]> {
        if self.nulls.as_ref().is_some_and(|n| n.is_null(row)) {
            return None;
        }
        Some(self.rows.row(row).data())
    }
}
