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

//! Chooses how a single instruction is written.

use crate::sheets::models::UpdateInstruction;
use crate::utils::SheetsError;

/// Sheet id the backend assumes when none is given.
pub const DEFAULT_SHEET_ID: i32 = 0;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePlan {
    Range(RangePlan),
    Offset(OffsetPlan),
}

/// Write addressed by a caller-supplied A1 range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePlan {
    pub range: String,
}

/// Write anchored at a zero-based offset on one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffsetPlan {
    pub target: SheetTarget,
    pub start_row: i32,
    pub start_column: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SheetTarget {
    /// The id is known. `sheet_name` only labels the written range.
    Id {
        sheet_id: i32,
        sheet_name: Option<String>,
    },
    /// The id must be looked up from the sheet title.
    Title(String),
}

impl SheetTarget {
    pub fn describe(&self) -> String {
        match self {
            SheetTarget::Id {
                sheet_id,
                sheet_name: Some(name),
            } => format!("'{}' (ID: {})", name, sheet_id),
            SheetTarget::Id { sheet_id, .. } => format!("ID {}", sheet_id),
            SheetTarget::Title(title) => format!("'{}' (ID unresolved)", title),
        }
    }
}

/// Picks the write path for an instruction.
///
/// A present `range` always wins and every offset field is ignored.
/// Otherwise the offset path is used with `startRow`/`startColumn`
/// defaulting to 0.
pub fn plan_update(instruction: &UpdateInstruction) -> Result<UpdatePlan, SheetsError> {
    if let Some(range) = &instruction.range {
        return Ok(UpdatePlan::Range(RangePlan {
            range: range.clone(),
        }));
    }

    let start_row = non_negative("startRow", instruction.start_row.unwrap_or(0))?;
    let start_column = non_negative("startColumn", instruction.start_column.unwrap_or(0))?;

    let target = match (instruction.sheet_id, &instruction.sheet_name) {
        (Some(sheet_id), sheet_name) => SheetTarget::Id {
            sheet_id: non_negative("sheetId", sheet_id)?,
            sheet_name: sheet_name.clone(),
        },
        (None, Some(title)) => SheetTarget::Title(title.clone()),
        (None, None) => SheetTarget::Id {
            sheet_id: DEFAULT_SHEET_ID,
            sheet_name: None,
        },
    };

    Ok(UpdatePlan::Offset(OffsetPlan {
        target,
        start_row,
        start_column,
    }))
}

fn non_negative(field: &str, value: i32) -> Result<i32, SheetsError> {
    if value < 0 {
        return Err(SheetsError::validation(format!(
            "{} must be non-negative, got {}",
            field, value
        )));
    }
    Ok(value)
}
