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
use crate::sheets::create::build_new_spreadsheet;
use crate::sheets::{GoogleSheetsClient, create_spreadsheet};
use crate::utils::CreateSheetError;
use anyhow::Result;
use tracing::info;

pub struct CreateSheetAction;

impl CreateSheetAction {
    pub fn new() -> Self {
        Self
    }

    pub async fn execute(&self, config: &ActionConfig, credentials: &CredentialStore) -> Result<()> {
        info!("🔄 Executing create-sheet action");

        let input = ActionInputReader::new().read_create_input(&config.input_path)?;

        if config.dry_run {
            let request = build_new_spreadsheet(&input).map_err(CreateSheetError::from)?;
            info!(
                "🔍 [DRY RUN] Would create spreadsheet '{}' with {} sheets",
                request.title,
                request.sheets.len()
            );
            for sheet in &request.sheets {
                info!(
                    "  📋 {} (ID: {}, {} rows)",
                    sheet.title,
                    sheet.sheet_id,
                    sheet.grid.as_ref().map(Vec::len).unwrap_or(0)
                );
            }
            return Ok(());
        }

        let client = GoogleSheetsClient::connect(credentials).await?;
        let output = create_spreadsheet(&client, &input).await?;

        info!("🔗 {}", output.url);
        ActionOutputWriter::new().write_output(&output, config.output_path.as_deref())
    }
}

impl Default for CreateSheetAction {
    fn default() -> Self {
        Self::new()
    }
}
