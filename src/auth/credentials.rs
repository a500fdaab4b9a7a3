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

//! Locates the OAuth2 material the host left behind for the Sheets API.
//!
//! Tokens are produced by the host's own consent flow; this module only
//! finds and validates them, and never starts an interactive flow.

use anyhow::{Context, Result};
use google_sheets4::yup_oauth2::ApplicationSecret;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CACHE_DIR: &str = ".sheets-actions";
const TOKEN_FILE: &str = "tokens.json";
const CLIENT_SECRET_FILE: &str = "client_secret.json";

/// Google Cloud Console client secret file format
#[derive(Debug, Deserialize)]
struct GoogleClientSecretFile {
    installed: ApplicationSecret,
}

pub struct CredentialStore {
    token_path: Option<PathBuf>,
    client_secret_path: Option<PathBuf>,
}

impl CredentialStore {
    pub fn new(token_path: Option<PathBuf>, client_secret_path: Option<PathBuf>) -> Self {
        Self {
            token_path,
            client_secret_path,
        }
    }

    fn local_dir() -> PathBuf {
        PathBuf::from(".").join(CACHE_DIR)
    }

    fn home_dir() -> Option<PathBuf> {
        std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok()
            .map(|home| PathBuf::from(home).join(CACHE_DIR))
    }

    /// Resolves a usable token cache path.
    ///
    /// Search order:
    /// 1. `token_override` (if provided)
    /// 2. Local tokens: `./.sheets-actions/tokens.json`
    /// 3. Home tokens:  `~/.sheets-actions/tokens.json`
    pub fn resolve_token_path(token_override: Option<PathBuf>) -> Result<PathBuf> {
        if let Some(path) = token_override {
            Self::validate_token_file(&path)?;
            info!("🔐 Using authentication tokens at: {}", path.display());
            return Ok(path);
        }

        let mut candidates = vec![Self::local_dir().join(TOKEN_FILE)];
        if let Some(home) = Self::home_dir() {
            candidates.push(home.join(TOKEN_FILE));
        }

        match Self::first_valid_token(&candidates) {
            Some(path) => {
                info!("🔐 Using authentication tokens at: {}", path.display());
                Ok(path)
            }
            None => anyhow::bail!(
                "❌ No authentication tokens found.\n\n\
                Connect the Google account in the host first, or point to its token cache:\n\
                • Local directory:  ./{dir}/{file}\n\
                • Home directory:   ~/{dir}/{file}\n\
                • Custom location:  --token-path /path/to/tokens.json",
                dir = CACHE_DIR,
                file = TOKEN_FILE
            ),
        }
    }

    fn first_valid_token(candidates: &[PathBuf]) -> Option<PathBuf> {
        for candidate in candidates {
            if !candidate.exists() {
                debug!("🔍 No token file at {}", candidate.display());
                continue;
            }

            match Self::validate_token_file(candidate) {
                Ok(()) => return Some(candidate.clone()),
                Err(err) => warn!(
                    "⚠️  Token file {} is invalid: {}",
                    candidate.display(),
                    err
                ),
            }
        }
        None
    }

    /// Returns the configured token path, or searches the default locations.
    pub fn ensure_token_file(&self) -> Result<PathBuf> {
        Self::resolve_token_path(self.token_path.clone())
    }

    fn validate_token_file(token_path: &Path) -> Result<()> {
        if !token_path.exists() {
            anyhow::bail!("Token file not found at specified path: {:?}", token_path);
        }

        if !token_path.is_file() {
            anyhow::bail!("Token path is not a file: {:?}", token_path);
        }

        let metadata = fs::metadata(token_path)
            .with_context(|| format!("Failed to read token metadata: {:?}", token_path))?;

        if metadata.len() == 0 {
            anyhow::bail!("Token file is empty: {:?}", token_path);
        }

        Ok(())
    }

    fn find_client_secret_file(&self) -> Result<PathBuf> {
        if let Some(path) = &self.client_secret_path {
            if path.exists() {
                return Ok(path.clone());
            }
            anyhow::bail!("Custom client secret file not found: {:?}", path);
        }

        let local_path = Self::local_dir().join(CLIENT_SECRET_FILE);
        if local_path.exists() {
            debug!("🔑 Found local {}", CLIENT_SECRET_FILE);
            return Ok(local_path);
        }

        if let Some(home) = Self::home_dir() {
            let home_path = home.join(CLIENT_SECRET_FILE);
            if home_path.exists() {
                debug!("🔑 Found home {}", CLIENT_SECRET_FILE);
                return Ok(home_path);
            }
        }

        anyhow::bail!(
            "❌ No {file} file found.\n\n\
            Place the OAuth2 client secret used by the host in one of these locations:\n\
            • Local directory:  ./{dir}/{file}\n\
            • Home directory:   ~/{dir}/{file}\n\
            • Custom location:  --client-secret /path/to/{file}",
            dir = CACHE_DIR,
            file = CLIENT_SECRET_FILE
        )
    }

    /// Loads the application secret, with or without the `installed` wrapper.
    pub fn load_client_secret(&self) -> Result<ApplicationSecret> {
        let secret_path = self.find_client_secret_file()?;

        let secret_json = fs::read_to_string(&secret_path)
            .with_context(|| format!("Failed to read client secret from {:?}", secret_path))?;

        if let Ok(google_format) = serde_json::from_str::<GoogleClientSecretFile>(&secret_json) {
            return Ok(google_format.installed);
        }

        serde_json::from_str::<ApplicationSecret>(&secret_json).with_context(|| {
            format!(
                "Failed to parse client secret JSON from {:?}. Expected the Google Cloud Console \
                format with an 'installed' wrapper or a bare application secret.",
                secret_path
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SECRET: &str = r#"{
        "client_id": "id.apps.googleusercontent.com",
        "client_secret": "secret",
        "auth_uri": "https://accounts.google.com/o/oauth2/auth",
        "token_uri": "https://oauth2.googleapis.com/token",
        "redirect_uris": ["http://localhost"]
    }"#;

    #[test]
    fn explicit_token_path_must_exist() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("tokens.json");

        let err = CredentialStore::resolve_token_path(Some(missing)).unwrap_err();
        assert!(err.to_string().contains("Token file not found"));
    }

    #[test]
    fn explicit_token_path_rejects_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tokens.json");
        fs::write(&path, "").unwrap();

        let err = CredentialStore::resolve_token_path(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Token file is empty"));
    }

    #[test]
    fn explicit_token_path_rejects_directory() {
        let temp_dir = TempDir::new().unwrap();
        let err =
            CredentialStore::resolve_token_path(Some(temp_dir.path().to_path_buf())).unwrap_err();
        assert!(err.to_string().contains("not a file"));
    }

    #[test]
    fn store_uses_configured_token_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tokens.json");
        fs::write(&path, "[{}]").unwrap();

        let store = CredentialStore::new(Some(path.clone()), None);
        assert_eq!(store.ensure_token_file().unwrap(), path);
    }

    #[test]
    fn first_valid_token_skips_invalid_candidates() {
        let temp_dir = TempDir::new().unwrap();
        let empty = temp_dir.path().join("empty.json");
        let good = temp_dir.path().join("good.json");
        fs::write(&empty, "").unwrap();
        fs::write(&good, "[{}]").unwrap();

        let candidates = vec![temp_dir.path().join("missing.json"), empty, good.clone()];
        assert_eq!(CredentialStore::first_valid_token(&candidates), Some(good));
    }

    #[test]
    fn loads_wrapped_client_secret() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("client_secret.json");
        fs::write(&path, format!(r#"{{"installed": {}}}"#, SECRET)).unwrap();

        let store = CredentialStore::new(None, Some(path));
        let secret = store.load_client_secret().unwrap();
        assert_eq!(secret.client_id, "id.apps.googleusercontent.com");
    }

    #[test]
    fn loads_bare_client_secret() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("client_secret.json");
        fs::write(&path, SECRET).unwrap();

        let store = CredentialStore::new(None, Some(path));
        assert_eq!(store.load_client_secret().unwrap().client_secret, "secret");
    }

    #[test]
    fn malformed_client_secret_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("client_secret.json");
        fs::write(&path, "not json").unwrap();

        let store = CredentialStore::new(None, Some(path));
        let err = store.load_client_secret().unwrap_err();
        assert!(err.to_string().contains("Failed to parse client secret JSON"));
    }

    #[test]
    fn missing_custom_client_secret_is_reported() {
        let temp_dir = TempDir::new().unwrap();
        let store = CredentialStore::new(None, Some(temp_dir.path().join("nope.json")));
        let err = store.load_client_secret().unwrap_err();
        assert!(err.to_string().contains("Custom client secret file not found"));
    }
}
