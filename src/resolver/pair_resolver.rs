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
//! Plan/execute entry points for pair resolution.
//!
//! Responsibilities:
//! - Validates required columns and column types of the three inputs up front.
//! - Runs associated-pairs extraction, orphan-product extraction and the union by name.
//! - Re-chunks the result to the configured output chunk size.
//!
//! Key exported interfaces:
//! - Types: `PairResolver`, `PairPlan`.

use std::fmt::Write as _;
use std::sync::Arc;

use arrow::datatypes::{DataType, Field, Schema, SchemaRef};

use super::associated_pairs::{ASSOCIATED_PAIRS, associated_pairs};
use super::orphan_products::{ORPHAN_PRODUCTS, orphan_products};
use super::{
    ASSOCIATIONS, CATEGORIES, CATEGORY_ID, CATEGORY_NAME, PAIR_COLUMNS, PRODUCT_CATEGORY_PAIRS,
    PRODUCT_ID, PRODUCT_NAME, PRODUCTS,
};
use crate::catalog_pairs_logging::{debug, info};
use crate::common::config;
use crate::exec::error::PairError;
use crate::exec::operators::hashjoin::check_key_types;
use crate::exec::operators::setop::union_all_by_name;
use crate::exec::relation::Relation;

const NAME_TYPES: &str = "Utf8 or LargeUtf8";

fn check_name_type(relation: &Relation, column: &str) -> Result<DataType, PairError> {
    let data_type = relation.column_type(column)?;
    match data_type {
        DataType::Utf8 | DataType::LargeUtf8 => Ok(data_type),
        other => Err(PairError::type_mismatch(
            relation.name(),
            column,
            NAME_TYPES,
            &other,
        )),
    }
}

/// Stateless resolver. Settings are fixed at construction; planning and
/// executing never consult the config file or the environment.
#[derive(Clone, Copy, Debug)]
pub struct PairResolver {
    chunk_size: usize,
    debug_output: bool,
}

impl Default for PairResolver {
    /// Built-in settings: 4096-row output chunks, no plan dump.
    fn default() -> Self {
        Self::with_options(config::DEFAULT_CHUNK_SIZE, false)
    }
}

impl PairResolver {
    /// Resolver using `runtime.chunk_size` and `debug.exec_node_output` from
    /// the config, as captured the first time any resolver read it.
    pub fn new() -> Self {
        let settings = config::resolver_settings();
        Self::with_options(settings.chunk_size, settings.exec_node_output)
    }

    pub fn with_chunk_size(chunk_size: usize) -> Self {
        Self::with_options(chunk_size, false)
    }

    /// `debug_output` logs the executed plan and output stats at `info`.
    pub fn with_options(chunk_size: usize, debug_output: bool) -> Self {
        Self {
            chunk_size: chunk_size.max(1),
            debug_output,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn debug_output(&self) -> bool {
        self.debug_output
    }

    /// Validate the inputs and capture them in a plan. Nothing is joined yet.
    ///
    /// Inputs are renamed to their roles (`products`, `categories`,
    /// `associations`) so errors name the role rather than the caller's label.
    pub fn plan(
        &self,
        products: &Relation,
        categories: &Relation,
        associations: &Relation,
    ) -> Result<PairPlan, PairError> {
        let products = products.clone().renamed(PRODUCTS);
        let categories = categories.clone().renamed(CATEGORIES);
        let associations = associations.clone().renamed(ASSOCIATIONS);

        products.require_columns(&[PRODUCT_ID, PRODUCT_NAME])?;
        categories.require_columns(&[CATEGORY_ID, CATEGORY_NAME])?;
        associations.require_columns(&[PRODUCT_ID, CATEGORY_ID])?;

        let product_name = products.field(PRODUCT_NAME)?;
        check_name_type(&products, PRODUCT_NAME)?;
        let category_name_type = check_name_type(&categories, CATEGORY_NAME)?;
        check_key_types(&associations, PRODUCT_ID, &products, PRODUCT_ID)?;
        check_key_types(&associations, CATEGORY_ID, &categories, CATEGORY_ID)?;

        let output_schema = Arc::new(Schema::new(vec![
            Field::new(
                PRODUCT_NAME,
                product_name.data_type().clone(),
                product_name.is_nullable(),
            ),
            Field::new(CATEGORY_NAME, category_name_type.clone(), true),
        ]));

        Ok(PairPlan {
            products,
            categories,
            associations,
            category_name_type,
            output_schema,
            chunk_size: self.chunk_size,
            debug_output: self.debug_output,
        })
    }

    /// `plan` followed by `execute`.
    pub fn resolve(
        &self,
        products: &Relation,
        categories: &Relation,
        associations: &Relation,
    ) -> Result<Relation, PairError> {
        self.plan(products, categories, associations)?.execute()
    }
}

/// Validated inputs for one resolution. Holds shared handles to the input
/// chunks; executing it any number of times yields the same row multiset.
#[derive(Clone, Debug)]
pub struct PairPlan {
    products: Relation,
    categories: Relation,
    associations: Relation,
    category_name_type: DataType,
    output_schema: SchemaRef,
    chunk_size: usize,
    debug_output: bool,
}

impl PairPlan {
    /// Schema of the relation `execute` returns.
    pub fn output_schema(&self) -> SchemaRef {
        Arc::clone(&self.output_schema)
    }

    pub fn execute(&self) -> Result<Relation, PairError> {
        let pairs = associated_pairs(&self.products, &self.categories, &self.associations)?;
        let orphans = orphan_products(
            &self.products,
            &self.associations,
            &self.category_name_type,
        )?;
        let pair_rows = pairs.num_rows();
        let orphan_rows = orphans.num_rows();

        let result = union_all_by_name(PRODUCT_CATEGORY_PAIRS, &[pairs, orphans], &PAIR_COLUMNS)?
            .rechunk(self.chunk_size);

        if self.debug_output {
            info!(
                "pair resolution output: rows={} chunks={} bytes={} associated={} orphan={}\n{}",
                result.num_rows(),
                result.chunks().len(),
                result.logical_bytes(),
                pair_rows,
                orphan_rows,
                self.explain()
            );
        } else {
            debug!(
                "pair resolution output: rows={} chunks={} associated={} orphan={}",
                result.num_rows(),
                result.chunks().len(),
                pair_rows,
                orphan_rows
            );
        }
        Ok(result)
    }

    /// Render the operator tree this plan executes.
    pub fn explain(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "UNION ALL BY NAME {} [{}]",
            PRODUCT_CATEGORY_PAIRS,
            PAIR_COLUMNS.join(", ")
        );
        let _ = writeln!(
            out,
            "  HASH JOIN INNER {ASSOCIATED_PAIRS} ON {CATEGORY_ID} = {CATEGORIES}.{CATEGORY_ID}"
        );
        let _ = writeln!(
            out,
            "    HASH JOIN INNER ON {PRODUCT_ID} = {PRODUCTS}.{PRODUCT_ID}"
        );
        let _ = writeln!(out, "      {}", scan_line(&self.associations));
        let _ = writeln!(out, "      {}", scan_line(&self.products));
        let _ = writeln!(out, "    {}", scan_line(&self.categories));
        let _ = writeln!(
            out,
            "  PROJECT {ORPHAN_PRODUCTS} [{PRODUCT_NAME}, NULL::{} AS {CATEGORY_NAME}]",
            self.category_name_type
        );
        let _ = writeln!(out, "    LEFT ANTI JOIN ON {PRODUCT_ID}");
        let _ = writeln!(out, "      {}", scan_line(&self.products));
        let _ = writeln!(out, "      DISTINCT {ASSOCIATIONS}.{PRODUCT_ID}");
        let _ = write!(out, "        {}", scan_line(&self.associations));
        out
    }
}

fn scan_line(relation: &Relation) -> String {
    format!(
        "SCAN {} rows={} chunks={}",
        relation.name(),
        relation.num_rows(),
        relation.chunks().len()
    )
}
