use std::{
    fs::{self, File},
    io::BufReader,
    path::Path,
};

use log::info;
use serde::{Deserialize, Serialize};

use super::{client::ApiClient, error::ApiError, models::endpoints};

#[derive(Serialize, Debug)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Token as returned by `/auth/login` and as kept in the token file.
#[derive(Deserialize, Serialize, Debug, PartialEq)]
pub struct StoredToken {
    #[serde(alias = "accessToken", alias = "access_token")]
    pub token: String,
}

pub fn read_token(token_path: &Path) -> Result<Option<String>, ApiError> {
    if !token_path.exists() {
        return Ok(None);
    }
    let token_file = BufReader::new(File::open(token_path)?);
    let stored: StoredToken = serde_json::from_reader(token_file)?;
    Ok(Some(stored.token))
}

pub fn write_token(token_path: &Path, token: &str) -> Result<(), ApiError> {
    let token_file = File::create(token_path)?;
    serde_json::to_writer_pretty(
        token_file,
        &StoredToken {
            token: token.to_owned(),
        },
    )?;
    Ok(())
}

/// Removes the stored token. Returns whether there was one.
pub fn remove_token(token_path: &Path) -> Result<bool, ApiError> {
    if !token_path.exists() {
        return Ok(false);
    }
    fs::remove_file(token_path)?;
    info!("Removed token at {}", token_path.display());
    Ok(true)
}

impl ApiClient {
    /// Logs in and keeps the token both in the client and in `token_path`.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
        token_path: &Path,
    ) -> Result<(), ApiError> {
        let stored: StoredToken = self
            .post_json(endpoints::LOGIN, &LoginRequest { username, password })
            .await?;
        write_token(token_path, &stored.token)?;
        info!("Logged in as {}", username);
        self.set_token(Some(stored.token));
        Ok(())
    }
}
