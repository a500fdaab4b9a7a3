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

//! Executes a planned write and reports the extent it touched.

use crate::sheets::a1;
use crate::sheets::backend::SheetsBackend;
use crate::sheets::models::{
    CellsWrite, Grid, USER_ENTERED_VALUE_FIELDS, UpdateResult, ValueInputMode,
};
use crate::sheets::normalize::grid_width;
use crate::utils::SheetsError;
use tracing::debug;

/// Writes `grid` at an A1 range. The backend-reported extent is returned
/// unchanged since the backend may clip or extend the range.
pub async fn update_by_range<B>(
    backend: &B,
    spreadsheet_id: &str,
    range: &str,
    grid: &Grid,
) -> Result<UpdateResult, SheetsError>
where
    B: SheetsBackend + ?Sized,
{
    debug!("📝 Writing {} rows to range {}", grid.len(), range);

    let response = backend
        .update_values_by_range(spreadsheet_id, range, grid, ValueInputMode::UserEntered)
        .await?;

    Ok(UpdateResult {
        range_label: response.updated_range,
        rows_touched: response.updated_rows,
        cols_touched: response.updated_columns,
        cells_touched: response.updated_cells,
    })
}

/// Writes `grid` anchored at `(start_row, start_column)` on `sheet_id`.
///
/// The backend returns no extent for this call, so it is computed from the
/// grid. `sheet_name` labels the range; `Sheet{sheet_id}` is used without it.
pub async fn update_by_offset<B>(
    backend: &B,
    spreadsheet_id: &str,
    sheet_id: i32,
    sheet_name: Option<&str>,
    start_row: i32,
    start_column: i32,
    grid: &Grid,
) -> Result<UpdateResult, SheetsError>
where
    B: SheetsBackend + ?Sized,
{
    debug!(
        "📝 Writing {} rows to sheet {} at row {}, column {}",
        grid.len(),
        sheet_id,
        start_row,
        start_column
    );

    backend
        .batch_update_cells(
            spreadsheet_id,
            CellsWrite {
                sheet_id,
                start_row,
                start_column,
                grid,
                fields: USER_ENTERED_VALUE_FIELDS,
            },
        )
        .await?;

    let label = sheet_name
        .map(str::to_string)
        .unwrap_or_else(|| format!("Sheet{}", sheet_id));

    Ok(offset_extent(&label, start_row, start_column, grid))
}

/// Extent of an offset write: `rows x widest row`, labelled in A1 notation.
pub fn offset_extent(sheet_label: &str, start_row: i32, start_column: i32, grid: &Grid) -> UpdateResult {
    let rows = grid.len();
    let cols = grid_width(grid);

    UpdateResult {
        range_label: a1::block_range_label(
            sheet_label,
            start_row.max(0) as usize,
            start_column.max(0) as usize,
            rows,
            cols,
        ),
        rows_touched: rows as u64,
        cols_touched: cols as u64,
        cells_touched: (rows * cols) as u64,
    }
}
