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
use super::{CATEGORY_ID, CATEGORY_NAME, PRODUCT_ID, PRODUCT_NAME};
use crate::exec::error::PairError;
use crate::exec::operators::hashjoin::{HashJoinSpec, inner_hash_join};
use crate::exec::relation::Relation;

const ASSOCIATED_PRODUCTS: &str = "associated_products";
pub(crate) const ASSOCIATED_PAIRS: &str = "associated_pairs";

/// Every `(product_name, category_name)` reachable through an association row.
///
/// Association rows whose product or category does not exist are dropped.
/// Duplicate association rows produce duplicate output rows.
pub(crate) fn associated_pairs(
    products: &Relation,
    categories: &Relation,
    associations: &Relation,
) -> Result<Relation, PairError> {
    let with_products = inner_hash_join(
        associations,
        products,
        &HashJoinSpec {
            probe_key: PRODUCT_ID,
            build_key: PRODUCT_ID,
            probe_output: &[CATEGORY_ID],
            build_output: &[PRODUCT_NAME],
        },
        ASSOCIATED_PRODUCTS,
    )?;
    inner_hash_join(
        &with_products,
        categories,
        &HashJoinSpec {
            probe_key: CATEGORY_ID,
            build_key: CATEGORY_ID,
            probe_output: &[PRODUCT_NAME],
            build_output: &[CATEGORY_NAME],
        },
        ASSOCIATED_PAIRS,
    )
}
