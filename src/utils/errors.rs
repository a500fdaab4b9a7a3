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

use std::fmt;
use thiserror::Error;

/// Closed classification of every failure the sheet actions can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Input rejected before any backend call was attempted.
    Validation,
    /// A sheet title did not match any sheet in the spreadsheet.
    NotFound,
    /// A backend operation failed after the transport exhausted its retries.
    Transport,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ErrorKind::Validation => "validation",
            ErrorKind::NotFound => "not found",
            ErrorKind::Transport => "transport",
        };
        f.write_str(label)
    }
}

/// Failure reported by a backend once its retry budget is spent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{operation} failed: {message}")]
pub struct TransportError {
    pub operation: String,
    pub message: String,
}

impl TransportError {
    pub fn new(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SheetsError {
    #[error("{0}")]
    Validation(String),

    #[error("Sheet with name '{0}' not found")]
    SheetNotFound(String),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl SheetsError {
    pub fn validation(message: impl Into<String>) -> Self {
        SheetsError::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            SheetsError::Validation(_) => ErrorKind::Validation,
            SheetsError::SheetNotFound(_) => ErrorKind::NotFound,
            SheetsError::Transport(_) => ErrorKind::Transport,
        }
    }
}

/// Terminal failure of a batch update.
///
/// `instruction` is the zero-based position of the instruction that failed,
/// or `None` when the batch was rejected before the first instruction ran.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to update sheet: {source}")]
pub struct BatchUpdateError {
    pub instruction: Option<usize>,
    #[source]
    pub source: SheetsError,
}

impl BatchUpdateError {
    pub fn before_start(source: SheetsError) -> Self {
        Self {
            instruction: None,
            source,
        }
    }

    pub fn at(instruction: usize, source: SheetsError) -> Self {
        Self {
            instruction: Some(instruction),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to create Google Sheet: {source}")]
pub struct CreateSheetError {
    #[source]
    pub source: SheetsError,
}

impl CreateSheetError {
    pub fn kind(&self) -> ErrorKind {
        self.source.kind()
    }
}

impl From<SheetsError> for CreateSheetError {
    fn from(source: SheetsError) -> Self {
        Self { source }
    }
}

impl From<TransportError> for CreateSheetError {
    fn from(err: TransportError) -> Self {
        Self {
            source: SheetsError::Transport(err),
        }
    }
}
