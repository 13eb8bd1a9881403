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
//! Product/category pair resolution.
//!
//! `PairResolver` turns three catalog relations (products, categories and the
//! product-category association table) into `(product_name, category_name)`
//! rows: one row per association that resolves to both a product and a
//! category, plus one `(product_name, NULL)` row per product that never
//! appears in the association table.
//!
//! A product whose associations all reference missing categories yields no
//! row at all: it is neither a resolved pair nor an unassociated product.

mod associated_pairs;
mod orphan_products;
mod pair_resolver;
#[cfg(test)]
pub(crate) mod test_util;

pub use pair_resolver::{PairPlan, PairResolver};

use crate::exec::error::PairError;
use crate::exec::relation::Relation;

pub const PRODUCT_ID: &str = "product_id";
pub const PRODUCT_NAME: &str = "product_name";
pub const CATEGORY_ID: &str = "category_id";
pub const CATEGORY_NAME: &str = "category_name";

pub const PRODUCTS: &str = "products";
pub const CATEGORIES: &str = "categories";
pub const ASSOCIATIONS: &str = "associations";
pub const PRODUCT_CATEGORY_PAIRS: &str = "product_category_pairs";

/// Output columns, in output order.
pub const PAIR_COLUMNS: [&str; 2] = [PRODUCT_NAME, CATEGORY_NAME];

/// Resolve all `(product_name, category_name)` pairs with the built-in
/// resolver settings. Reads no config file and no environment.
pub fn get_product_category_pairs(
    products: &Relation,
    categories: &Relation,
    associations: &Relation,
) -> Result<Relation, PairError> {
    PairResolver::default().resolve(products, categories, associations)
}
