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

//! Request and response shapes shared by the sheet actions.
//!
//! Inputs use the host's camelCase JSON layout. Backend payloads are closed
//! records so that every field crossing the backend boundary is accounted for.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered rows of ordered string cells. Rows may differ in length.
pub type Grid = Vec<Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetRow {
    #[serde(default)]
    pub cells: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SheetData {
    #[serde(default)]
    pub rows: Vec<SheetRow>,
}

impl SheetData {
    pub fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        Self {
            rows: rows.into_iter().map(|cells| SheetRow { cells }).collect(),
        }
    }
}

/// One entry of a batch update.
///
/// `range` wins outright when present; otherwise the offset fields address
/// the write.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstruction {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sheet_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_row: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_column: Option<i32>,
    #[serde(default)]
    pub data: SheetData,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSheetInput {
    #[serde(default)]
    pub spreadsheet_id: String,
    #[serde(default)]
    pub updates: Vec<UpdateInstruction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetDescriptor {
    pub sheet_id: i32,
    pub title: String,
}

/// Spreadsheet metadata as reported by `GetSpreadsheet`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GetSpreadsheetResponse {
    pub sheets: Vec<SheetDescriptor>,
}

/// Extent reported by `UpdateValuesByRange`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateValuesResponse {
    pub updated_range: String,
    pub updated_rows: u64,
    pub updated_columns: u64,
    pub updated_cells: u64,
}

/// How the backend interprets values written through a range.
///
/// Range writes always go through `USER_ENTERED` so they parse the same way
/// as offset writes, which set `userEnteredValue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueInputMode {
    /// Values are parsed as if typed into the UI (numbers, dates, formulas).
    UserEntered,
}

impl ValueInputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueInputMode::UserEntered => "USER_ENTERED",
        }
    }
}

/// Field mask limiting offset writes to the entered value of each cell.
pub const USER_ENTERED_VALUE_FIELDS: &str = "userEnteredValue";

/// Arguments of a `BatchUpdateCells` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellsWrite<'a> {
    pub sheet_id: i32,
    pub start_row: i32,
    pub start_column: i32,
    pub grid: &'a Grid,
    pub fields: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateResult {
    pub range_label: String,
    pub rows_touched: u64,
    pub cols_touched: u64,
    pub cells_touched: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    pub spreadsheet_id: String,
    pub updated_range: String,
    pub updated_rows: u64,
    pub updated_columns: u64,
    pub updated_cells: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSheetInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<SheetData>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreateSheetInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sheets: Vec<NewSheetInput>,
}

/// A sheet to be created along with its spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSheet {
    pub sheet_id: i32,
    pub title: String,
    /// Written at row 0, column 0 when present.
    pub grid: Option<Grid>,
}

/// Arguments of a `CreateSpreadsheet` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSpreadsheet {
    pub title: String,
    pub sheets: Vec<NewSheet>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreatedSpreadsheet {
    pub spreadsheet_id: String,
    pub title: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSheetOutput {
    pub id: String,
    pub url: String,
    pub title: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_host_instruction_shape() {
        let input: UpdateSheetInput = serde_json::from_value(json!({
            "spreadsheetId": "abc",
            "updates": [
                {"sheetName": "Data", "startRow": 2, "data": {"rows": [{"cells": ["x", 1, true]}]}},
                {"range": "Sheet1!A1:B1", "data": {"rows": [{"cells": ["a", "b"]}]}}
            ]
        }))
        .unwrap();

        assert_eq!(input.spreadsheet_id, "abc");
        assert_eq!(input.updates.len(), 2);
        assert_eq!(input.updates[0].sheet_name.as_deref(), Some("Data"));
        assert_eq!(input.updates[0].start_row, Some(2));
        assert_eq!(input.updates[0].start_column, None);
        assert_eq!(input.updates[0].data.rows[0].cells.len(), 3);
        assert_eq!(input.updates[1].range.as_deref(), Some("Sheet1!A1:B1"));
    }

    #[test]
    fn batch_result_serializes_camel_case() {
        let result = BatchResult {
            spreadsheet_id: "abc".to_string(),
            updated_range: "Sheet1!A1:B2".to_string(),
            updated_rows: 2,
            updated_columns: 2,
            updated_cells: 4,
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(
            value,
            json!({
                "spreadsheetId": "abc",
                "updatedRange": "Sheet1!A1:B2",
                "updatedRows": 2,
                "updatedColumns": 2,
                "updatedCells": 4
            })
        );
    }

    #[test]
    fn range_writes_use_user_entered_input() {
        assert_eq!(ValueInputMode::UserEntered.as_str(), "USER_ENTERED");
    }

    #[test]
    fn spreadsheet_metadata_is_only_sheets() {
        let response = GetSpreadsheetResponse {
            sheets: vec![SheetDescriptor {
                sheet_id: 3,
                title: "Data".to_string(),
            }],
        };
        assert_eq!(response.sheets[0].sheet_id, 3);
        assert_eq!(GetSpreadsheetResponse::default().sheets, Vec::new());
    }
}
