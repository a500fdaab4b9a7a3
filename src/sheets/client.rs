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

//! Google Sheets API backend.

use crate::auth::CredentialStore;
use crate::sheets::backend::{SheetsBackend, SpreadsheetFactory};
use crate::sheets::models::{
    CellsWrite, CreatedSpreadsheet, GetSpreadsheetResponse, Grid, NewSheet, NewSpreadsheet,
    SheetDescriptor, UpdateValuesResponse, ValueInputMode,
};
use crate::utils::TransportError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use google_sheets4::{
    FieldMask, Sheets,
    api::{
        BatchUpdateSpreadsheetRequest, CellData, ExtendedValue, GridCoordinate, GridData,
        Request, RowData, Sheet, SheetProperties, Spreadsheet, SpreadsheetProperties,
        UpdateCellsRequest, ValueRange,
    },
    hyper_rustls, yup_oauth2,
};
use hyper_util::{client::legacy::connect::HttpConnector, rt::TokioExecutor};
use std::future::Future;
use std::path::PathBuf;
use std::fmt::Display;
use tokio::time::{Duration, sleep, timeout};
use tracing::{debug, info, warn};

type SheetsHub = Sheets<hyper_rustls::HttpsConnector<HttpConnector>>;

const SCOPES: &[&str] = &["https://www.googleapis.com/auth/spreadsheets"];
const TRANSPORT_MAX_RETRIES: usize = 3;
const RATE_LIMIT_REASONS: &[&str] = &[
    "rateLimitExceeded",
    "userRateLimitExceeded",
    "RESOURCE_EXHAUSTED",
];
const TOKEN_CHECK_TIMEOUT: Duration = Duration::from_secs(30);

pub struct GoogleSheetsClient {
    hub: SheetsHub,
}

impl GoogleSheetsClient {
    fn is_retryable_status(status: u16) -> bool {
        status == 429 || (500..600).contains(&status)
    }

    fn mentions_rate_limit(message: &str) -> bool {
        RATE_LIMIT_REASONS
            .iter()
            .any(|reason| message.contains(reason))
    }

    /// Only rate limits and server-side failures are transient. Client
    /// errors are final even when their message contains digits like `500`.
    fn is_retryable_error(error: &google_sheets4::Error) -> bool {
        match error {
            google_sheets4::Error::Failure(response) => {
                Self::is_retryable_status(response.status().as_u16())
            }
            google_sheets4::Error::BadRequest(body) => {
                body.pointer("/error/code")
                    .and_then(serde_json::Value::as_u64)
                    .and_then(|code| u16::try_from(code).ok())
                    .is_some_and(Self::is_retryable_status)
                    || Self::mentions_rate_limit(&body.to_string())
            }
            other => Self::mentions_rate_limit(&other.to_string()),
        }
    }

    fn retry_delay(attempt: usize) -> Duration {
        let base_ms: u64 = 500;
        let exponent = attempt.saturating_sub(1) as u32;
        let multiplier = 2_u64.saturating_pow(exponent).min(16);
        Duration::from_millis(base_ms * multiplier)
    }

    async fn call_with_retry<T, F, Fut>(
        description: &str,
        mut operation: F,
    ) -> Result<T, TransportError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, google_sheets4::Error>>,
    {
        let mut attempt = 0usize;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err)
                    if attempt < TRANSPORT_MAX_RETRIES
                        && GoogleSheetsClient::is_retryable_error(&err) =>
                {
                    attempt += 1;
                    let delay = GoogleSheetsClient::retry_delay(attempt);
                    warn!(
                        "🔁 {} hit a transient Google error (attempt {}/{}), retrying in {:?}",
                        description, attempt, TRANSPORT_MAX_RETRIES, delay
                    );
                    sleep(delay).await;
                }
                Err(err) => {
                    return Err(TransportError::new(description, err.to_string()));
                }
            }
        }
    }

    /// Connects with the stored tokens.
    ///
    /// The token check is bounded by a timeout, so an empty or expired cache
    /// fails the connection instead of waiting on a browser sign-in.
    pub async fn connect(credentials: &CredentialStore) -> Result<Self> {
        info!("🔑 Initializing Google Sheets API connection...");

        let token_path = credentials.ensure_token_file()?;
        debug!("🔍 Using token cache at: {:?}", token_path);

        let client_secret = credentials
            .load_client_secret()
            .context("Failed to load client secret for Google Sheets API")?;

        let auth = Self::create_non_interactive_authenticator(client_secret, token_path)
            .await
            .context("Failed to create non-interactive Google Sheets authenticator")?;

        let client = hyper_util::client::legacy::Client::builder(TokioExecutor::new()).build(
            hyper_rustls::HttpsConnectorBuilder::new()
                .with_native_roots()?
                .https_or_http()
                .enable_http1()
                .build(),
        );

        info!("✅ Google Sheets API connection established");
        Ok(Self {
            hub: Sheets::new(client, auth),
        })
    }

    async fn create_non_interactive_authenticator(
        client_secret: yup_oauth2::ApplicationSecret,
        token_path: PathBuf,
    ) -> Result<yup_oauth2::authenticator::Authenticator<hyper_rustls::HttpsConnector<HttpConnector>>>
    {
        use google_sheets4::yup_oauth2::{InstalledFlowAuthenticator, InstalledFlowReturnMethod};

        let auth = InstalledFlowAuthenticator::builder(
            client_secret,
            InstalledFlowReturnMethod::HTTPRedirect,
        )
        .persist_tokens_to_disk(token_path)
        .build()
        .await
        .context("Failed to build non-interactive authenticator")?;

        // A token must already be obtainable from the cache.
        Self::require_cached_token(auth.token(SCOPES), TOKEN_CHECK_TIMEOUT).await?;

        Ok(auth)
    }

    async fn require_cached_token<T, E, Fut>(check: Fut, limit: Duration) -> Result<T>
    where
        E: Display,
        Fut: Future<Output = std::result::Result<T, E>>,
    {
        match timeout(limit, check).await {
            Ok(Ok(token)) => Ok(token),
            Ok(Err(e)) => {
                debug!("🔍 Authenticator test failed: {}", e);
                anyhow::bail!(
                    "Authenticator failed to get token without interactive auth: {}\n\
                    This means the stored tokens are invalid or expired.",
                    e
                )
            }
            Err(_) => anyhow::bail!(
                "Timed out after {:?} waiting for a cached token.\n\
                The stored tokens cannot be refreshed without an interactive sign-in.",
                limit
            ),
        }
    }

    fn grid_to_rows(grid: &Grid) -> Vec<RowData> {
        grid.iter()
            .map(|row| RowData {
                values: Some(
                    row.iter()
                        .map(|cell| CellData {
                            user_entered_value: Some(ExtendedValue {
                                string_value: Some(cell.clone()),
                                ..Default::default()
                            }),
                            ..Default::default()
                        })
                        .collect(),
                ),
            })
            .collect()
    }

    fn grid_to_values(grid: &Grid) -> Vec<Vec<serde_json::Value>> {
        grid.iter()
            .map(|row| {
                row.iter()
                    .map(|cell| serde_json::Value::String(cell.clone()))
                    .collect()
            })
            .collect()
    }

    fn new_sheet(sheet: &NewSheet) -> Sheet {
        Sheet {
            properties: Some(SheetProperties {
                sheet_id: Some(sheet.sheet_id),
                title: Some(sheet.title.clone()),
                ..Default::default()
            }),
            data: sheet.grid.as_ref().map(|grid| {
                vec![GridData {
                    start_row: Some(0),
                    start_column: Some(0),
                    row_data: Some(Self::grid_to_rows(grid)),
                    ..Default::default()
                }]
            }),
            ..Default::default()
        }
    }

    fn count(value: Option<i32>) -> u64 {
        value.unwrap_or(0).max(0) as u64
    }
}

#[async_trait]
impl SheetsBackend for GoogleSheetsClient {
    async fn get_spreadsheet(
        &self,
        spreadsheet_id: &str,
    ) -> Result<GetSpreadsheetResponse, TransportError> {
        let hub = &self.hub;
        let (_, spreadsheet) = Self::call_with_retry("fetch spreadsheet metadata", || {
            let hub = hub;
            let spreadsheet_id = spreadsheet_id.to_string();
            async move { hub.spreadsheets().get(&spreadsheet_id).doit().await }
        })
        .await?;

        let sheets = spreadsheet
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| {
                let properties = sheet.properties?;
                Some(SheetDescriptor {
                    sheet_id: properties.sheet_id?,
                    title: properties.title?,
                })
            })
            .collect();

        Ok(GetSpreadsheetResponse { sheets })
    }

    async fn update_values_by_range(
        &self,
        spreadsheet_id: &str,
        range: &str,
        grid: &Grid,
        mode: ValueInputMode,
    ) -> Result<UpdateValuesResponse, TransportError> {
        let hub = &self.hub;
        let value_range = ValueRange {
            range: Some(range.to_string()),
            values: Some(Self::grid_to_values(grid)),
            major_dimension: Some("ROWS".to_string()),
            ..Default::default()
        };

        let (_, response) = Self::call_with_retry("update values by range", || {
            let hub = hub;
            let spreadsheet_id = spreadsheet_id.to_string();
            let range = range.to_string();
            let values = value_range.clone();
            async move {
                hub.spreadsheets()
                    .values_update(values, &spreadsheet_id, &range)
                    .value_input_option(mode.as_str())
                    .doit()
                    .await
            }
        })
        .await?;

        Ok(UpdateValuesResponse {
            updated_range: response.updated_range.unwrap_or_else(|| range.to_string()),
            updated_rows: Self::count(response.updated_rows),
            updated_columns: Self::count(response.updated_columns),
            updated_cells: Self::count(response.updated_cells),
        })
    }

    async fn batch_update_cells(
        &self,
        spreadsheet_id: &str,
        write: CellsWrite<'_>,
    ) -> Result<(), TransportError> {
        let hub = &self.hub;
        let batch_request = BatchUpdateSpreadsheetRequest {
            requests: Some(vec![Request {
                update_cells: Some(UpdateCellsRequest {
                    start: Some(GridCoordinate {
                        sheet_id: Some(write.sheet_id),
                        row_index: Some(write.start_row),
                        column_index: Some(write.start_column),
                    }),
                    rows: Some(Self::grid_to_rows(write.grid)),
                    fields: Some(FieldMask::new(&[write.fields])),
                    ..Default::default()
                }),
                ..Default::default()
            }]),
            ..Default::default()
        };

        Self::call_with_retry("batch update cells", || {
            let hub = hub;
            let spreadsheet_id = spreadsheet_id.to_string();
            let request = batch_request.clone();
            async move {
                hub.spreadsheets()
                    .batch_update(request, &spreadsheet_id)
                    .doit()
                    .await
            }
        })
        .await?;

        Ok(())
    }
}

#[async_trait]
impl SpreadsheetFactory for GoogleSheetsClient {
    async fn create_spreadsheet(
        &self,
        spreadsheet: &NewSpreadsheet,
    ) -> Result<CreatedSpreadsheet, TransportError> {
        let hub = &self.hub;
        let request = Spreadsheet {
            properties: Some(SpreadsheetProperties {
                title: Some(spreadsheet.title.clone()),
                ..Default::default()
            }),
            sheets: if spreadsheet.sheets.is_empty() {
                None
            } else {
                Some(spreadsheet.sheets.iter().map(Self::new_sheet).collect())
            },
            ..Default::default()
        };

        let (_, created) = Self::call_with_retry("create spreadsheet", || {
            let hub = hub;
            let request = request.clone();
            async move { hub.spreadsheets().create(request).doit().await }
        })
        .await?;

        let spreadsheet_id = created.spreadsheet_id.ok_or_else(|| {
            TransportError::new("create spreadsheet", "response did not include a spreadsheet ID")
        })?;

        Ok(CreatedSpreadsheet {
            spreadsheet_id,
            title: created.properties.and_then(|p| p.title),
        })
    }
}
