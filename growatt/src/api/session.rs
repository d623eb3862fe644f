use serde::{Deserialize, Serialize};

use crate::{api::Api, prelude::*};

impl Api {
    /// Log in and keep the session cookie for the subsequent calls.
    #[instrument(skip_all, fields(username = username))]
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        #[derive(Serialize)]
        struct AuthRequest<'a> {
            username: &'a str,
            password: &'a str,
        }

        info!("logging in…");
        let response: AuthResponse = Self::send_sensitive(
            "login",
            self.client.post(self.url("login")).json(&AuthRequest { username, password }),
        )
        .await?;
        info!(expires_in = response.expires_in, "logged in");
        Ok(response)
    }

    #[instrument(skip_all)]
    pub async fn get_devices(&self, token: &str) -> Result<Vec<Device>> {
        info!("fetching…");
        let devices: Vec<Device> =
            Self::send("devices", self.client.get(self.url("devices")).bearer_auth(token)).await?;
        info!(n_devices = devices.len(), "fetched");
        Ok(devices)
    }
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct AuthResponse {
    pub token: String,

    /// Token lifetime in seconds.
    #[serde(rename = "expiresIn", default)]
    pub expires_in: Option<u64>,
}

#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub status: String,

    /// Vendor attributes that do not have a dedicated field.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Map<String, serde_json::Value>>,
}
