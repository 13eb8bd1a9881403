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
//! Relation builders shared by resolver unit tests.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, BooleanArray, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema};

use super::{
    ASSOCIATIONS, CATEGORIES, CATEGORY_ID, CATEGORY_NAME, PRODUCT_ID, PRODUCT_NAME, PRODUCTS,
};
use crate::exec::relation::Relation;

pub(crate) type Pair = (String, Option<String>);

pub(crate) fn pair(product: &str, category: Option<&str>) -> Pair {
    (product.to_string(), category.map(str::to_string))
}

/// Products carry an extra `in_stock` column the resolver must ignore.
pub(crate) fn products(rows: &[(i64, &str)]) -> Relation {
    let schema = Arc::new(Schema::new(vec![
        Field::new(PRODUCT_ID, DataType::Int64, false),
        Field::new(PRODUCT_NAME, DataType::Utf8, false),
        Field::new("in_stock", DataType::Boolean, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.0))) as ArrayRef,
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.1))) as ArrayRef,
            Arc::new(BooleanArray::from(vec![true; rows.len()])) as ArrayRef,
        ],
    )
    .expect("products batch");
    Relation::from_batch(PRODUCTS, batch)
}

pub(crate) fn categories(rows: &[(i64, &str)]) -> Relation {
    let schema = Arc::new(Schema::new(vec![
        Field::new(CATEGORY_ID, DataType::Int64, false),
        Field::new(CATEGORY_NAME, DataType::Utf8, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.0))) as ArrayRef,
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.1))) as ArrayRef,
        ],
    )
    .expect("categories batch");
    Relation::from_batch(CATEGORIES, batch)
}

pub(crate) fn associations(rows: &[(i64, i64)]) -> Relation {
    let schema = Arc::new(Schema::new(vec![
        Field::new(PRODUCT_ID, DataType::Int64, false),
        Field::new(CATEGORY_ID, DataType::Int64, false),
    ]));
    let batch = RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.0))) as ArrayRef,
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.1))) as ArrayRef,
        ],
    )
    .expect("associations batch");
    Relation::from_batch(ASSOCIATIONS, batch)
}

/// `(product_name, category_name)` rows, sorted for multiset comparison.
pub(crate) fn collect_pairs(rel: &Relation) -> Vec<Pair> {
    let product_idx = rel.column_index(PRODUCT_NAME).expect("product_name");
    let category_idx = rel.column_index(CATEGORY_NAME).expect("category_name");
    let mut out = Vec::with_capacity(rel.num_rows());
    for chunk in rel.chunks() {
        let names = chunk.column(product_idx).expect("product column");
        let names = names
            .as_any()
            .downcast_ref::<StringArray>()
            .expect("utf8 product_name");
        let cats = chunk.column(category_idx).expect("category column");
        let cats = cats
            .as_any()
            .downcast_ref::<StringArray>()
            .expect("utf8 category_name");
        for row in 0..chunk.len() {
            let category = (!cats.is_null(row)).then(|| cats.value(row).to_string());
            out.push((names.value(row).to_string(), category));
        }
    }
    out.sort();
    out
}
