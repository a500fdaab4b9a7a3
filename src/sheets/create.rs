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

use crate::sheets::backend::SpreadsheetFactory;
use crate::sheets::models::{CreateSheetInput, CreateSheetOutput, NewSheet, NewSpreadsheet};
use crate::sheets::normalize::normalize_rows;
use crate::utils::{CreateSheetError, SheetsError};
use tracing::info;

const SPREADSHEET_URL_PREFIX: &str = "https://docs.google.com/spreadsheets/d/";

/// Builds the creation request: sheet `i` gets id `i` and defaults to the
/// title `Sheet{i+1}`. Data is attached only when at least one row is given.
pub fn build_new_spreadsheet(input: &CreateSheetInput) -> Result<NewSpreadsheet, SheetsError> {
    if input.title.trim().is_empty() {
        return Err(SheetsError::validation("Spreadsheet title is required"));
    }

    let sheets = input
        .sheets
        .iter()
        .enumerate()
        .map(|(index, sheet)| {
            let grid = sheet
                .data
                .as_ref()
                .filter(|data| !data.rows.is_empty())
                .map(|data| normalize_rows(&data.rows));

            Ok(NewSheet {
                sheet_id: i32::try_from(index)
                    .map_err(|_| SheetsError::validation("Too many sheets requested"))?,
                title: sheet
                    .title
                    .clone()
                    .filter(|title| !title.is_empty())
                    .unwrap_or_else(|| format!("Sheet{}", index + 1)),
                grid,
            })
        })
        .collect::<Result<Vec<_>, SheetsError>>()?;

    Ok(NewSpreadsheet {
        title: input.title.clone(),
        sheets,
    })
}

pub fn spreadsheet_url(spreadsheet_id: &str) -> String {
    format!("{}{}", SPREADSHEET_URL_PREFIX, spreadsheet_id)
}

/// Creates a spreadsheet with the requested sheets in a single backend call.
pub async fn create_spreadsheet<F>(
    factory: &F,
    input: &CreateSheetInput,
) -> Result<CreateSheetOutput, CreateSheetError>
where
    F: SpreadsheetFactory + ?Sized,
{
    let request = build_new_spreadsheet(input)?;

    info!(
        "➕ Creating spreadsheet '{}' with {} sheets",
        request.title,
        request.sheets.len()
    );

    let created = factory.create_spreadsheet(&request).await?;

    info!(
        "✅ Created spreadsheet '{}' with ID: {}",
        created.title.as_deref().unwrap_or(&request.title),
        created.spreadsheet_id
    );

    Ok(CreateSheetOutput {
        url: spreadsheet_url(&created.spreadsheet_id),
        title: created.title.unwrap_or(request.title),
        id: created.spreadsheet_id,
    })
}
