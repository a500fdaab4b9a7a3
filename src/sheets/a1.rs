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

//! A1 notation helpers.

/// Converts a zero-based column index to a column letter (0=A, 25=Z, 26=AA, ...).
pub fn column_index_to_letter(index: usize) -> String {
    let mut result = String::new();
    let mut n = index;

    loop {
        result.insert(0, (b'A' + (n % 26) as u8) as char);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }

    result
}

/// Converts column letters back to a zero-based index ("A"=0, "AA"=26).
///
/// Returns `None` for empty input, non-alphabetic characters, or overflow.
pub fn column_letter_to_index(letters: &str) -> Option<usize> {
    if letters.is_empty() {
        return None;
    }

    let mut value: usize = 0;
    for ch in letters.chars() {
        if !ch.is_ascii_alphabetic() {
            return None;
        }
        let digit = (ch.to_ascii_uppercase() as u8 - b'A') as usize + 1;
        value = value.checked_mul(26)?.checked_add(digit)?;
    }

    Some(value - 1)
}

/// Builds `{sheet}!{start}:{end}` for a block anchored at zero-based
/// `(start_row, start_column)` spanning `rows` x `cols` cells.
///
/// With `cols == 0` the end column sits one left of the start column. At
/// column zero that position has no letters and the end reference is just the
/// row number, e.g. `Sheet1!A1:0` for an empty block at the origin.
pub fn block_range_label(
    sheet: &str,
    start_row: usize,
    start_column: usize,
    rows: usize,
    cols: usize,
) -> String {
    let end_column = (start_column + cols)
        .checked_sub(1)
        .map(column_index_to_letter)
        .unwrap_or_default();

    format!(
        "{}!{}{}:{}{}",
        sheet,
        column_index_to_letter(start_column),
        start_row + 1,
        end_column,
        start_row + rows
    )
}
