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

//! Sequential batch update over an ordered list of instructions.

use crate::sheets::backend::SheetsBackend;
use crate::sheets::models::{BatchResult, UpdateInstruction, UpdateResult};
use crate::sheets::normalize::normalize_rows;
use crate::sheets::plan::{SheetTarget, UpdatePlan, plan_update};
use crate::sheets::resolver::resolve_sheet;
use crate::sheets::updater::{update_by_offset, update_by_range};
use crate::utils::{BatchUpdateError, SheetsError};
use tracing::{error, info};

const RANGE_SEPARATOR: &str = ", ";

pub struct BatchUpdater<'a, B: ?Sized> {
    backend: &'a B,
}

#[derive(Default)]
struct Totals {
    ranges: Vec<String>,
    rows: u64,
    columns: u64,
    cells: u64,
}

impl Totals {
    fn add(&mut self, result: UpdateResult) {
        self.ranges.push(result.range_label);
        self.rows += result.rows_touched;
        self.columns += result.cols_touched;
        self.cells += result.cells_touched;
    }
}

impl<'a, B> BatchUpdater<'a, B>
where
    B: SheetsBackend + ?Sized,
{
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Applies every instruction in input order.
    ///
    /// The first failure aborts the batch. Writes made by earlier
    /// instructions stay applied and later instructions never run.
    pub async fn run(
        &self,
        spreadsheet_id: &str,
        instructions: &[UpdateInstruction],
    ) -> Result<BatchResult, BatchUpdateError> {
        validate_batch(spreadsheet_id, instructions).map_err(BatchUpdateError::before_start)?;

        info!(
            "💾 Applying {} updates to spreadsheet {}",
            instructions.len(),
            spreadsheet_id
        );

        let mut totals = Totals::default();

        for (index, instruction) in instructions.iter().enumerate() {
            match self.apply(spreadsheet_id, instruction).await {
                Ok(result) => {
                    info!(
                        "✅ Update {} of {}: {} ({} cells)",
                        index + 1,
                        instructions.len(),
                        result.range_label,
                        result.cells_touched
                    );
                    totals.add(result);
                }
                Err(err) => {
                    error!(
                        "❌ Update {} of {} failed: {}",
                        index + 1,
                        instructions.len(),
                        err
                    );
                    return Err(BatchUpdateError::at(index, err));
                }
            }
        }

        Ok(BatchResult {
            spreadsheet_id: spreadsheet_id.to_string(),
            updated_range: totals.ranges.join(RANGE_SEPARATOR),
            updated_rows: totals.rows,
            updated_columns: totals.columns,
            updated_cells: totals.cells,
        })
    }

    async fn apply(
        &self,
        spreadsheet_id: &str,
        instruction: &UpdateInstruction,
    ) -> Result<UpdateResult, SheetsError> {
        let grid = normalize_rows(&instruction.data.rows);

        match plan_update(instruction)? {
            UpdatePlan::Range(plan) => {
                update_by_range(self.backend, spreadsheet_id, &plan.range, &grid).await
            }
            UpdatePlan::Offset(plan) => {
                let (sheet_id, sheet_name) = match plan.target {
                    SheetTarget::Id {
                        sheet_id,
                        sheet_name,
                    } => (sheet_id, sheet_name),
                    SheetTarget::Title(title) => {
                        let sheet = resolve_sheet(self.backend, spreadsheet_id, &title).await?;
                        (sheet.sheet_id, Some(title))
                    }
                };

                update_by_offset(
                    self.backend,
                    spreadsheet_id,
                    sheet_id,
                    sheet_name.as_deref(),
                    plan.start_row,
                    plan.start_column,
                    &grid,
                )
                .await
            }
        }
    }
}

/// Checks that run before any backend call.
pub fn validate_batch(
    spreadsheet_id: &str,
    instructions: &[UpdateInstruction],
) -> Result<(), SheetsError> {
    if spreadsheet_id.trim().is_empty() {
        return Err(SheetsError::validation("Spreadsheet ID is required"));
    }

    if instructions.is_empty() {
        return Err(SheetsError::validation("At least one update is required"));
    }

    Ok(())
}
