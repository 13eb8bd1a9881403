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
//! Hash-table primitives for join key indexing.
//!
//! Responsibilities:
//! - Builds key groups and row-reference chains from build-side key arrays.
//! - Skips null build keys so lookups follow `=` semantics.
//!
//! Key exported interfaces:
//! - Types: `JoinHashTable`.

use arrow::array::ArrayRef;
use hashbrown::HashMap;

use crate::exec::hash_table::key_rows::JoinKeyEncoder;

const ROW_NONE: u32 = u32::MAX;

/// Hash-table container for join key groups and build-row reference chains.
///
/// Build rows are numbered globally across build chunks in input order; each
/// group chains its rows head to tail so lookups return them in build order.
pub(crate) struct JoinHashTable {
    groups: HashMap<Box<[u8]>, u32>,
    group_head: Vec<u32>,
    group_tail: Vec<u32>,
    row_next: Vec<u32>,
    row_count: usize,
}

impl JoinHashTable {
    pub(crate) fn build(encoder: &JoinKeyEncoder, key_arrays: &[ArrayRef]) -> Result<Self, String> {
        let total_rows: usize = key_arrays.iter().map(|a| a.len()).sum();
        if total_rows >= ROW_NONE as usize {
            return Err(format!(
                "join build side too large: rows={} limit={}",
                total_rows, ROW_NONE
            ));
        }
        let mut table = Self {
            groups: HashMap::new(),
            group_head: Vec::new(),
            group_tail: Vec::new(),
            row_next: vec![ROW_NONE; total_rows],
            row_count: total_rows,
        };

        let mut row_base = 0usize;
        for keys in key_arrays {
            let encoded = encoder.encode(keys)?;
            for row in 0..encoded.len() {
                let Some(key) = encoded.key(row) else {
                    continue;
                };
                table.insert(key, (row_base + row) as u32);
            }
            row_base += encoded.len();
        }
        Ok(table)
    }

    fn insert(&mut self, key: &[u8], row: u32) {
        if let Some(&group_id) = self.groups.get(key) {
            let tail = self.group_tail[group_id as usize];
            self.row_next[tail as usize] = row;
            self.group_tail[group_id as usize] = row;
            return;
        }
        let group_id = self.group_head.len() as u32;
        self.groups.insert(Box::from(key), group_id);
        self.group_head.push(row);
        self.group_tail.push(row);
    }

    pub(crate) fn row_count(&self) -> usize {
        self.row_count
    }

    pub(crate) fn group_count(&self) -> usize {
        self.group_head.len()
    }

    pub(crate) fn lookup(&self, key: &[u8]) -> Option<u32> {
        self.groups.get(key).copied()
    }

    /// Build rows of `group_id`, in build order.
    pub(crate) fn group_rows(&self, group_id: u32) -> GroupRows<'_> {
        let next = self
            .group_head
            .get(group_id as usize)
            .copied()
            .unwrap_or(ROW_NONE);
        GroupRows { table: self, next }
    }
}

pub(crate) struct GroupRows<'a> {
    table: &'a JoinHashTable,
    next: u32,
}

impl Iterator for GroupRows<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.next == ROW_NONE {
            return None;
        }
        let row = self.next;
        self.next = self.table.row_next[row as usize];
        Some(row)
    }
}
