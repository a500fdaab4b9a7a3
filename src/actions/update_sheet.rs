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

use crate::auth::CredentialStore;
use crate::config::ActionConfig;
use crate::files::{ActionInputReader, ActionOutputWriter};
use crate::sheets::batch::validate_batch;
use crate::sheets::models::UpdateInstruction;
use crate::sheets::plan::{UpdatePlan, plan_update};
use crate::sheets::{BatchUpdater, GoogleSheetsClient};
use crate::utils::BatchUpdateError;
use anyhow::Result;
use tracing::info;

pub struct UpdateSheetAction;

impl UpdateSheetAction {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, config: &ActionConfig, credentials: &CredentialStore) -> Result<()> {
        info!("🔄 Executing update-sheet action");

        let input = ActionInputReader::new().read_update_input(&config.input_path)?;
        let spreadsheet_id = config
            .spreadsheet_id
            .clone()
            .unwrap_or(input.spreadsheet_id);

        if config.dry_run {
            let plans = Self::preview(&spreadsheet_id, &input.updates)?;
            info!(
                "🔍 [DRY RUN] Would apply {} updates to spreadsheet {}",
                plans.len(),
                spreadsheet_id
            );
            for (index, plan) in plans.iter().enumerate() {
                info!("  {}. {}", index + 1, plan);
            }
            return Ok(());
        }

        let client = GoogleSheetsClient::connect(credentials).await?;
        let result = BatchUpdater::new(&client)
            .run(&spreadsheet_id, &input.updates)
            .await?;

        info!(
            "🎉 Updated {} rows, {} columns, {} cells: {}",
            result.updated_rows, result.updated_columns, result.updated_cells, result.updated_range
        );

        ActionOutputWriter::new().write_output(&result, config.output_path.as_deref())
    }

    /// Describes how each instruction would be written, without backend calls.
    pub fn preview(
        spreadsheet_id: &str,
        updates: &[UpdateInstruction],
    ) -> Result<Vec<String>, BatchUpdateError> {
        validate_batch(spreadsheet_id, updates).map_err(BatchUpdateError::before_start)?;

        updates
            .iter()
            .enumerate()
            .map(|(index, update)| {
                let rows = update.data.rows.len();
                match plan_update(update).map_err(|err| BatchUpdateError::at(index, err))? {
                    UpdatePlan::Range(plan) => {
                        Ok(format!("range {} ({} rows)", plan.range, rows))
                    }
                    UpdatePlan::Offset(plan) => Ok(format!(
                        "sheet {} at row {}, column {} ({} rows)",
                        plan.target.describe(),
                        plan.start_row,
                        plan.start_column,
                        rows
                    )),
                }
            })
            .collect()
    }
}

impl Default for UpdateSheetAction {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::models::SheetData;
    use crate::utils::ErrorKind;
    use serde_json::json;

    #[test]
    fn preview_describes_each_path() {
        let updates = vec![
            UpdateInstruction {
                range: Some("Sheet1!A1:B2".to_string()),
                start_row: Some(10),
                data: SheetData::from_rows(vec![vec![json!("a")], vec![json!("b")]]),
                ..Default::default()
            },
            UpdateInstruction {
                sheet_name: Some("Data".to_string()),
                start_row: Some(3),
                data: SheetData::from_rows(vec![vec![json!("c")]]),
                ..Default::default()
            },
            UpdateInstruction {
                sheet_id: Some(4),
                ..Default::default()
            },
        ];

        let plans = UpdateSheetAction::preview("ss-1", &updates).unwrap();
        assert_eq!(
            plans,
            vec![
                "range Sheet1!A1:B2 (2 rows)",
                "sheet 'Data' (ID unresolved) at row 3, column 0 (1 rows)",
                "sheet ID 4 at row 0, column 0 (0 rows)",
            ]
        );
    }

    #[test]
    fn preview_rejects_empty_batch() {
        let err = UpdateSheetAction::preview("ss-1", &[]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.instruction, None);
    }

    #[test]
    fn preview_reports_failing_instruction() {
        let updates = vec![
            UpdateInstruction::default(),
            UpdateInstruction {
                sheet_id: Some(-1),
                ..Default::default()
            },
        ];

        let err = UpdateSheetAction::preview("ss-1", &updates).unwrap_err();
        assert_eq!(err.instruction, Some(1));
    }
}
