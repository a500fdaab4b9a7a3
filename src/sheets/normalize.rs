// Copyright 2025 Webmobix Solutions AG
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUTHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::sheets::models::{Grid, SheetRow};
use serde_json::Value;

/// Converts instruction rows into a grid of string cells.
///
/// Row and column order is preserved and ragged rows are left ragged.
pub fn normalize_rows(rows: &[SheetRow]) -> Grid {
    rows.iter()
        .map(|row| row.cells.iter().map(cell_to_string).collect())
        .collect()
}

/// Canonical text form of a single cell value.
pub fn cell_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(num) => number_to_string(num),
        Value::Bool(flag) => flag.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

// Integral floats print without a fractional part ("3", not "3.0").
fn number_to_string(num: &serde_json::Number) -> String {
    if num.is_i64() || num.is_u64() {
        return num.to_string();
    }

    match num.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => num.to_string(),
    }
}

/// Length of the widest row, 0 for an empty grid.
pub fn grid_width(grid: &Grid) -> usize {
    grid.iter().map(Vec::len).max().unwrap_or(0)
}
