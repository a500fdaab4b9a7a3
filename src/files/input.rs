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

use crate::sheets::models::{CreateSheetInput, UpdateSheetInput};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub struct ActionInputReader;

impl ActionInputReader {
    pub fn new() -> Self {
        Self
    }

    pub fn read_update_input<P: AsRef<Path>>(&self, path: P) -> Result<UpdateSheetInput> {
        let input: UpdateSheetInput = self.read_json(path.as_ref())?;
        info!(
            "📂 Loaded {} updates for spreadsheet '{}'",
            input.updates.len(),
            input.spreadsheet_id
        );
        Ok(input)
    }

    pub fn read_create_input<P: AsRef<Path>>(&self, path: P) -> Result<CreateSheetInput> {
        let input: CreateSheetInput = self.read_json(path.as_ref())?;
        info!(
            "📂 Loaded spreadsheet '{}' with {} sheets",
            input.title,
            input.sheets.len()
        );
        Ok(input)
    }

    fn read_json<T: DeserializeOwned>(&self, path: &Path) -> Result<T> {
        debug!("📖 Reading action input: {:?}", path);

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {:?}", path))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse input file as JSON: {:?}", path))
    }
}

impl Default for ActionInputReader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn reads_update_input() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("update.json");
        fs::write(
            &path,
            r#"{
                "spreadsheetId": "ss-1",
                "updates": [
                    {"sheetId": 5, "startRow": 1, "startColumn": 2, "data": {"rows": [{"cells": ["a", 1]}]}}
                ]
            }"#,
        )?;

        let input = ActionInputReader::new().read_update_input(&path)?;
        assert_eq!(input.spreadsheet_id, "ss-1");
        assert_eq!(input.updates[0].sheet_id, Some(5));
        assert_eq!(input.updates[0].start_row, Some(1));
        assert_eq!(input.updates[0].start_column, Some(2));
        Ok(())
    }

    #[test]
    fn missing_fields_default_to_empty() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("update.json");
        fs::write(&path, "{}")?;

        let input = ActionInputReader::new().read_update_input(&path)?;
        assert!(input.spreadsheet_id.is_empty());
        assert!(input.updates.is_empty());
        Ok(())
    }

    #[test]
    fn reads_create_input() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("create.json");
        fs::write(
            &path,
            r#"{"title": "Budget", "sheets": [{"title": "Income", "data": {"rows": [{"cells": ["x"]}]}}, {}]}"#,
        )?;

        let input = ActionInputReader::new().read_create_input(&path)?;
        assert_eq!(input.title, "Budget");
        assert_eq!(input.sheets.len(), 2);
        assert_eq!(input.sheets[0].title.as_deref(), Some("Income"));
        assert!(input.sheets[1].data.is_none());
        Ok(())
    }

    #[test]
    fn reports_malformed_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();

        let err = ActionInputReader::new().read_update_input(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse input file"));
    }

    #[test]
    fn reports_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = ActionInputReader::new()
            .read_update_input(temp_dir.path().join("missing.json"))
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read input file"));
    }
}
