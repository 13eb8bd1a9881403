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
//! Resolution must not depend on config files that appear after resolvers
//! and plans are built.

use catalog_pairs::{PairResolver, get_product_category_pairs};

use crate::common::{associations, categories, collect_pairs, products};

mod common;

#[test]
fn test_config_file_created_later_is_ignored() {
    let work_dir = tempfile::tempdir().expect("tempdir");
    std::env::set_current_dir(work_dir.path()).expect("enter temp dir");
    // SAFETY: single test in this binary, no other threads read the environment.
    unsafe {
        std::env::remove_var("CATALOG_PAIRS_CONFIG");
    }

    let products = products(&[(1, "a"), (2, "b"), (3, "c"), (4, "d"), (5, "e")]);
    let categories = categories(&[(10, "Tools")]);
    let associations = associations(&[(1, 10)]);

    let resolver = PairResolver::new();
    assert_eq!(resolver.chunk_size(), 4096);
    let plan = resolver
        .plan(&products, &categories, &associations)
        .expect("plan");
    let before = plan.execute().expect("execute");
    let free_before =
        get_product_category_pairs(&products, &categories, &associations).expect("resolve");
    assert_eq!(before.chunks().len(), 1);
    assert_eq!(free_before.chunks().len(), 1);

    std::fs::write(
        work_dir.path().join("catalog_pairs.toml"),
        "[runtime]\nchunk_size = 1\n\n[debug]\nexec_node_output = true\n",
    )
    .expect("write config");

    let after = plan.execute().expect("execute");
    let free_after =
        get_product_category_pairs(&products, &categories, &associations).expect("resolve");
    assert_eq!(after.chunks().len(), before.chunks().len());
    assert_eq!(free_after.chunks().len(), free_before.chunks().len());
    assert_eq!(collect_pairs(&after), collect_pairs(&before));
    assert_eq!(collect_pairs(&free_after), collect_pairs(&free_before));

    // Settings were captured on first read; the new file is not picked up.
    let resolver = PairResolver::new();
    assert_eq!(resolver.chunk_size(), 4096);
    assert!(!resolver.debug_output());
}
