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

//! In-memory backend that records calls, for engine tests.

use crate::sheets::backend::{SheetsBackend, SpreadsheetFactory};
use crate::sheets::models::{
    CellsWrite, CreatedSpreadsheet, GetSpreadsheetResponse, Grid, NewSpreadsheet,
    SheetDescriptor, UpdateValuesResponse, ValueInputMode,
};
use crate::utils::TransportError;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    GetSpreadsheet {
        spreadsheet_id: String,
    },
    UpdateValuesByRange {
        spreadsheet_id: String,
        range: String,
        grid: Grid,
        mode: ValueInputMode,
    },
    BatchUpdateCells {
        spreadsheet_id: String,
        sheet_id: i32,
        start_row: i32,
        start_column: i32,
        grid: Grid,
        fields: String,
    },
    CreateSpreadsheet {
        spreadsheet: NewSpreadsheet,
    },
}

#[derive(Default)]
pub struct MockBackend {
    sheets: Vec<SheetDescriptor>,
    range_responses: Mutex<VecDeque<UpdateValuesResponse>>,
    created_title: Option<String>,
    fail_on_call: Option<usize>,
    calls: Mutex<Vec<BackendCall>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheets(mut self, sheets: &[(i32, &str)]) -> Self {
        self.sheets = sheets
            .iter()
            .map(|(sheet_id, title)| SheetDescriptor {
                sheet_id: *sheet_id,
                title: title.to_string(),
            })
            .collect();
        self
    }

    /// Queues a response for the next `update_values_by_range` call.
    pub fn with_range_response(self, range: &str, rows: u64, cols: u64, cells: u64) -> Self {
        if let Ok(mut queue) = self.range_responses.lock() {
            queue.push_back(UpdateValuesResponse {
                updated_range: range.to_string(),
                updated_rows: rows,
                updated_columns: cols,
                updated_cells: cells,
            });
        }
        self
    }

    pub fn with_created_title(mut self, title: &str) -> Self {
        self.created_title = Some(title.to_string());
        self
    }

    /// Makes the n-th backend call (1-based, any operation) fail.
    pub fn failing_on_call(mut self, call: usize) -> Self {
        self.fail_on_call = Some(call);
        self
    }

    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: BackendCall, operation: &str) -> Result<(), TransportError> {
        let mut calls = self
            .calls
            .lock()
            .map_err(|_| TransportError::new(operation, "mock poisoned"))?;
        calls.push(call);
        if Some(calls.len()) == self.fail_on_call {
            return Err(TransportError::new(operation, "simulated outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl SheetsBackend for MockBackend {
    async fn get_spreadsheet(
        &self,
        spreadsheet_id: &str,
    ) -> Result<GetSpreadsheetResponse, TransportError> {
        self.record(
            BackendCall::GetSpreadsheet {
                spreadsheet_id: spreadsheet_id.to_string(),
            },
            "fetch spreadsheet metadata",
        )?;
        Ok(GetSpreadsheetResponse {
            sheets: self.sheets.clone(),
        })
    }

    async fn update_values_by_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        grid: &Grid,
        mode: ValueInputMode,
    ) -> Result<UpdateValuesResponse, TransportError> {
        self.record(
            BackendCall::UpdateValuesByRange {
                spreadsheet_id: spreadsheet_id.to_string(),
                range: range.to_string(),
                grid: grid.clone(),
                mode,
            },
            "update values by range",
        )?;

        let queued = self
            .range_responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front());

        Ok(queued.unwrap_or_else(|| UpdateValuesResponse {
            updated_range: range.to_string(),
            updated_rows: grid.len() as u64,
            updated_columns: grid.iter().map(Vec::len).max().unwrap_or(0) as u64,
            updated_cells: grid.iter().map(Vec::len).sum::<usize>() as u64,
        }))
    }

    async fn batch_update_cells(
        &self,
        spreadsheet_id: &str,
        write: CellsWrite<'_>,
    ) -> Result<(), TransportError> {
        self.record(
            BackendCall::BatchUpdateCells {
                spreadsheet_id: spreadsheet_id.to_string(),
                sheet_id: write.sheet_id,
                start_row: write.start_row,
                start_column: write.start_column,
                grid: write.grid.clone(),
                fields: write.fields.to_string(),
            },
            "batch update cells",
        )
    }
}

#[async_trait]
impl SpreadsheetFactory for MockBackend {
    async fn create_spreadsheet(
        &self,
        spreadsheet: &NewSpreadsheet,
    ) -> Result<CreatedSpreadsheet, TransportError> {
        self.record(
            BackendCall::CreateSpreadsheet {
                spreadsheet: spreadsheet.clone(),
            },
            "create spreadsheet",
        )?;
        Ok(CreatedSpreadsheet {
            spreadsheet_id: "new-spreadsheet-id".to_string(),
            title: self.created_title.clone(),
        })
    }
}
