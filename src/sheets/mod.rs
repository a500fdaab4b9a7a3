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

pub mod a1;
pub mod backend;
pub mod batch;
pub mod client;
pub mod create;
pub mod models;
pub mod normalize;
pub mod plan;
pub mod resolver;
pub mod updater;

#[cfg(test)]
pub(crate) mod mock;

pub use backend::{SheetsBackend, SpreadsheetFactory};
pub use batch::BatchUpdater;
pub use client::GoogleSheetsClient;
pub use create::create_spreadsheet;
