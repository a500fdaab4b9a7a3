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

//! The remote operations the sheet actions depend on.
//!
//! Implementations own their retry policy; callers treat every error they
//! return as final.

use crate::sheets::models::{
    CellsWrite, CreatedSpreadsheet, GetSpreadsheetResponse, Grid, NewSpreadsheet,
    UpdateValuesResponse, ValueInputMode,
};
use crate::utils::TransportError;
use async_trait::async_trait;

#[async_trait]
pub trait SheetsBackend: Send + Sync {
    /// Fetches spreadsheet metadata including every sheet's id and title.
    async fn get_spreadsheet(
        &self,
        spreadsheet_id: &str,
    ) -> Result<GetSpreadsheetResponse, TransportError>;

    /// Replaces the cells addressed by an A1 range.
    async fn update_values_by_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        grid: &Grid,
        mode: ValueInputMode,
    ) -> Result<UpdateValuesResponse, TransportError>;

    /// Writes a grid anchored at a zero-based offset. Acknowledgement only.
    async fn batch_update_cells(
        &self,
        spreadsheet_id: &str,
        write: CellsWrite<'_>,
    ) -> Result<(), TransportError>;
}

#[async_trait]
pub trait SpreadsheetFactory: Send + Sync {
    async fn create_spreadsheet(
        &self,
        spreadsheet: &NewSpreadsheet,
    ) -> Result<CreatedSpreadsheet, TransportError>;
}
