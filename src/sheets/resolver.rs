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

use crate::sheets::backend::SheetsBackend;
use crate::sheets::models::SheetDescriptor;
use crate::utils::SheetsError;
use tracing::debug;

/// Finds the sheet whose title matches `title` exactly (case-sensitive).
///
/// Fetches the spreadsheet metadata on every call; results are not cached.
pub async fn resolve_sheet<B>(
    backend: &B,
    spreadsheet_id: &str,
    title: &str,
) -> Result<SheetDescriptor, SheetsError>
where
    B: SheetsBackend + ?Sized,
{
    debug!("📋 Looking for worksheet: {}", title);

    let spreadsheet = backend.get_spreadsheet(spreadsheet_id).await?;

    match spreadsheet.sheets.into_iter().find(|s| s.title == title) {
        Some(sheet) => {
            debug!("✅ Found worksheet '{}' with ID: {}", title, sheet.sheet_id);
            Ok(sheet)
        }
        None => {
            debug!("❌ Worksheet '{}' not found", title);
            Err(SheetsError::SheetNotFound(title.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheets::mock::{BackendCall, MockBackend};
    use crate::utils::ErrorKind;

    fn backend() -> MockBackend {
        MockBackend::new().with_sheets(&[(0, "Sheet1"), (3, "Data")])
    }

    #[tokio::test]
    async fn resolves_matching_title() {
        let backend = backend();
        let sheet = resolve_sheet(&backend, "ss-1", "Data").await.unwrap();

        assert_eq!(sheet.sheet_id, 3);
        assert_eq!(sheet.title, "Data");
        assert_eq!(
            backend.calls(),
            vec![BackendCall::GetSpreadsheet {
                spreadsheet_id: "ss-1".to_string()
            }]
        );
    }

    #[tokio::test]
    async fn missing_title_is_not_found() {
        let err = resolve_sheet(&backend(), "ss-1", "Missing")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Sheet with name 'Missing' not found");
    }

    #[tokio::test]
    async fn title_match_is_case_sensitive() {
        let err = resolve_sheet(&backend(), "ss-1", "data").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn transport_failure_propagates() {
        let backend = backend().failing_on_call(1);
        let err = resolve_sheet(&backend, "ss-1", "Data").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }
}
