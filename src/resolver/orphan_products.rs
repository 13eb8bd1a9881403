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
use arrow::datatypes::DataType;

use super::{CATEGORY_NAME, PRODUCT_ID, PRODUCT_NAME};
use crate::exec::error::PairError;
use crate::exec::operators::hashjoin::left_anti_join;
use crate::exec::operators::project::{ProjectExpr, project};
use crate::exec::operators::setop::DistinctKeySet;
use crate::exec::relation::Relation;

pub(crate) const ORPHAN_PRODUCTS: &str = "orphan_products";

/// `(product_name, NULL)` for every product whose id never occurs in the
/// association table, regardless of whether those associations resolve.
pub(crate) fn orphan_products(
    products: &Relation,
    associations: &Relation,
    category_name_type: &DataType,
) -> Result<Relation, PairError> {
    let associated_ids = DistinctKeySet::build(associations, PRODUCT_ID)?;
    let orphans = left_anti_join(products, PRODUCT_ID, &associated_ids, ORPHAN_PRODUCTS)?;
    project(
        &orphans,
        &[
            ProjectExpr::Column(PRODUCT_NAME),
            ProjectExpr::NullLiteral {
                name: CATEGORY_NAME,
                data_type: category_name_type.clone(),
            },
        ],
        ORPHAN_PRODUCTS,
    )
}
