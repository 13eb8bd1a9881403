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
//! Common utilities and helpers for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int64Array, RecordBatch, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use tempfile::TempDir;

use catalog_pairs::Relation;
use catalog_pairs::catalog_pairs_config;
use catalog_pairs::catalog_pairs_logging;

/// Test configuration for integration tests.
pub struct TestConfig {
    /// Temporary directory for test artifacts
    pub temp_dir: TempDir,
    /// Test config path
    pub config_path: PathBuf,
}

impl TestConfig {
    /// Create a new test configuration with a small output chunk size.
    pub fn new() -> anyhow::Result<Self> {
        let temp_dir = tempfile::tempdir()?;
        let config_path = temp_dir.path().join("test_catalog_pairs.toml");

        let config_content = r#"
log_level = "debug"

[runtime]
chunk_size = 3

[debug]
exec_node_output = true
"#;

        std::fs::write(&config_path, config_content)?;

        Ok(Self {
            temp_dir,
            config_path,
        })
    }

    /// Initialize logging for tests, writing into the temp directory.
    pub fn init_logging(&self) {
        // SAFETY: integration tests set this before any logging thread starts.
        unsafe {
            std::env::set_var(
                "CATALOG_PAIRS_LOG_FILE",
                self.temp_dir.path().join("catalog_pairs.log"),
            );
        }
        catalog_pairs_logging::init_with_level("debug");
    }

    /// Load the test configuration.
    pub fn load_config(
        &self,
    ) -> anyhow::Result<&'static catalog_pairs_config::CatalogPairsConfig> {
        catalog_pairs_config::init_from_path(&self.config_path)
    }
}

impl Default for TestConfig {
    fn default() -> Self {
        Self::new().expect("Failed to create test config")
    }
}

pub type Pair = (String, Option<String>);

pub fn pair(product: &str, category: Option<&str>) -> Pair {
    (product.to_string(), category.map(str::to_string))
}

pub fn products_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("product_id", DataType::Int64, false),
        Field::new("product_name", DataType::Utf8, false),
    ]))
}

pub fn categories_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("category_id", DataType::Int64, false),
        Field::new("category_name", DataType::Utf8, false),
    ]))
}

pub fn associations_schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("product_id", DataType::Int64, false),
        Field::new("category_id", DataType::Int64, false),
    ]))
}

fn id_name_batch(schema: &SchemaRef, rows: &[(i64, String)]) -> RecordBatch {
    RecordBatch::try_new(
        Arc::clone(schema),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.0))) as ArrayRef,
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.1.as_str()))) as ArrayRef,
        ],
    )
    .expect("id/name batch")
}

fn id_pair_batch(schema: &SchemaRef, rows: &[(i64, i64)]) -> RecordBatch {
    RecordBatch::try_new(
        Arc::clone(schema),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.0))) as ArrayRef,
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.1))) as ArrayRef,
        ],
    )
    .expect("id pair batch")
}

fn owned(rows: &[(i64, &str)]) -> Vec<(i64, String)> {
    rows.iter().map(|(id, n)| (*id, n.to_string())).collect()
}

/// Split `rows` into relation chunks of at most `chunk_rows` rows.
fn chunked<T: Clone>(rows: &[T], chunk_rows: usize) -> Vec<Vec<T>> {
    if rows.is_empty() {
        return Vec::new();
    }
    rows.chunks(chunk_rows.max(1)).map(<[T]>::to_vec).collect()
}

pub fn products(rows: &[(i64, &str)]) -> Relation {
    products_chunked(&owned(rows), usize::MAX)
}

pub fn categories(rows: &[(i64, &str)]) -> Relation {
    categories_chunked(&owned(rows), usize::MAX)
}

pub fn associations(rows: &[(i64, i64)]) -> Relation {
    associations_chunked(rows, usize::MAX)
}

pub fn products_chunked(rows: &[(i64, String)], chunk_rows: usize) -> Relation {
    let schema = products_schema();
    let batches = chunked(rows, chunk_rows)
        .iter()
        .map(|c| id_name_batch(&schema, c))
        .collect();
    Relation::try_new("products", schema, batches).expect("products relation")
}

pub fn categories_chunked(rows: &[(i64, String)], chunk_rows: usize) -> Relation {
    let schema = categories_schema();
    let batches = chunked(rows, chunk_rows)
        .iter()
        .map(|c| id_name_batch(&schema, c))
        .collect();
    Relation::try_new("categories", schema, batches).expect("categories relation")
}

pub fn associations_chunked(rows: &[(i64, i64)], chunk_rows: usize) -> Relation {
    let schema = associations_schema();
    let batches = chunked(rows, chunk_rows)
        .iter()
        .map(|c| id_pair_batch(&schema, c))
        .collect();
    Relation::try_new("associations", schema, batches).expect("associations relation")
}

/// Result rows sorted for unordered (multiset) comparison.
pub fn collect_pairs(rel: &Relation) -> Vec<Pair> {
    let batch = rel.to_batch().expect("concat result");
    let names = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("utf8 product_name");
    let cats = batch
        .column(1)
        .as_any()
        .downcast_ref::<StringArray>()
        .expect("utf8 category_name");
    let mut out: Vec<Pair> = (0..batch.num_rows())
        .map(|row| {
            let category = (!cats.is_null(row)).then(|| cats.value(row).to_string());
            (names.value(row).to_string(), category)
        })
        .collect();
    out.sort();
    out
}

/// Assert that a result is Ok and return the value.
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a result is Err.
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
}
