//! One-shot IP geolocation.
//!
//! The dashboard starts from the machine's approximate position, the way a
//! browser app would start from the device location. A terminal process has
//! no permission prompt, so the fix comes from an IP-geolocation lookup
//! ([IpApi](https://ip-api.com/)) instead. The lookup runs exactly once per
//! invocation with a bounded wait and no cached result reuse; success and
//! failure are both terminal.

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::error::GeolocateError;
use crate::model::Coordinates;

const IP_API_URL: &str = "http://ip-api.com/json";

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Geolocator {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl Geolocator {
    pub fn new(timeout: Duration) -> Self {
        Self {
            http: Client::new(),
            base_url: IP_API_URL.to_string(),
            timeout,
        }
    }

    #[cfg(test)]
    pub fn with_base_url(timeout: Duration, base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.to_string(),
            timeout,
        }
    }

    /// Request the current position once.
    ///
    /// Returns the fix rounded to 2 decimals, or the reason it could not be
    /// obtained. Callers must not retry; a failed fix means the dashboard
    /// falls back to manual search only.
    pub async fn locate(&self) -> Result<Coordinates, GeolocateError> {
        let url = format!("{}?fields=status,message,lat,lon", self.base_url);

        let position = tokio::time::timeout(self.timeout, self.lookup(&url))
            .await
            .map_err(|_| GeolocateError::Timeout)??;

        tracing::info!(
            lat = position.latitude,
            lon = position.longitude,
            "geolocation fix acquired"
        );

        Ok(position)
    }

    async fn lookup(&self, url: &str) -> Result<Coordinates, GeolocateError> {
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GeolocateError::Unavailable(e.to_string()))?;

        let status = res.status();
        if !status.is_success() {
            return Err(GeolocateError::Unavailable(format!(
                "lookup returned status {status}"
            )));
        }

        let body: IpApiResponse = res
            .json()
            .await
            .map_err(|e| GeolocateError::Unavailable(e.to_string()))?;

        if body.status != "success" {
            let reason = body.message.unwrap_or_else(|| "no reason given".to_string());
            tracing::warn!(%reason, "geolocation service refused the lookup");
            return Err(GeolocateError::Denied(reason));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => Ok(Coordinates::capture(lat, lon)),
            _ => Err(GeolocateError::Unavailable(
                "lookup succeeded without coordinates".to_string(),
            )),
        }
    }
}
