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

//! Runtime settings shared by the sheet actions.

use std::path::PathBuf;

/// Settings for one action invocation, built from CLI flags.
///
/// Credentials are located separately through [`crate::auth::CredentialStore`].
#[derive(Debug, Clone)]
pub struct ActionConfig {
    /// JSON document holding the action input
    pub input_path: PathBuf,
    /// Where to write the JSON result; stdout when `None`
    pub output_path: Option<PathBuf>,
    /// Replaces the spreadsheet ID found in the input document
    pub spreadsheet_id: Option<String>,
    /// Plan and log without calling Google Sheets
    pub dry_run: bool,
}

impl ActionConfig {
    pub fn new(
        input_path: PathBuf,
        output_path: Option<PathBuf>,
        spreadsheet_id: Option<String>,
        dry_run: bool,
    ) -> Self {
        Self {
            input_path,
            output_path,
            spreadsheet_id,
            dry_run,
        }
    }

    /// Validates the configuration settings.
    ///
    /// # Errors
    ///
    /// * If the input path does not exist or is not a file
    /// * If the spreadsheet ID override is empty
    /// * If the output path's parent exists but is not a directory. A missing
    ///   parent is accepted since the output writer creates it.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !self.input_path.exists() {
            anyhow::bail!("Input file does not exist: {:?}", self.input_path);
        }

        if !self.input_path.is_file() {
            anyhow::bail!("Input path is not a file: {:?}", self.input_path);
        }

        if let Some(id) = &self.spreadsheet_id
            && id.trim().is_empty()
        {
            anyhow::bail!("Spreadsheet ID cannot be empty");
        }

        if let Some(output) = &self.output_path
            && let Some(parent) = output.parent()
            && parent.exists()
            && !parent.is_dir()
        {
            anyhow::bail!("Output directory is not a directory: {:?}", parent);
        }

        Ok(())
    }
}
