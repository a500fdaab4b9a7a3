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

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

pub struct ActionOutputWriter;

impl ActionOutputWriter {
    pub fn new() -> Self {
        Self
    }

    /// Writes `output` as pretty JSON to `path`, or to stdout without one.
    pub fn write_output<T: Serialize>(&self, output: &T, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => self.write_output_file(path, output),
            None => {
                let json_string = self.render(output)?;
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{}", json_string).context("Failed to write output to stdout")
            }
        }
    }

    pub fn write_output_file<P: AsRef<Path>, T: Serialize>(
        &self,
        file_path: P,
        output: &T,
    ) -> Result<()> {
        let file_path = file_path.as_ref();

        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        let json_string = self.render(output)?;
        fs::write(file_path, json_string)
            .with_context(|| format!("Failed to write file: {:?}", file_path))?;

        info!("✅ Wrote action output to: {:?}", file_path);
        Ok(())
    }

    fn render<T: Serialize>(&self, output: &T) -> Result<String> {
        serde_json::to_string_pretty(output).context("Failed to serialize JSON")
    }
}

impl Default for ActionOutputWriter {
    fn default() -> Self {
        Self::new()
    }
}
