use gloo::net::http::Request;
use shared::{BookingError, ReservationMap, ReserveRequest, ReserveResponse};

use super::config::WidgetConfig;
use super::logging::Logger;

/// API client for the reservation server
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    reservations_path: String,
    reserve_path: String,
}

impl ApiClient {
    pub fn from_config(config: &WidgetConfig) -> Self {
        Self {
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            reservations_path: config.reservations_path.clone(),
            reserve_path: config.reserve_path.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Load the map of booked days. Any failure degrades to an empty map.
    pub async fn get_reservation_map(&self) -> ReservationMap {
        match self.fetch_reservation_map().await {
            Ok(map) if map.is_empty() => {
                Logger::debug_with_component("api", "No booked days yet");
                map
            }
            Ok(map) => {
                Logger::debug_with_component("api", &format!("Loaded {} booked days", map.len()));
                map
            }
            Err(e) => {
                Logger::warn_with_component("api", &format!("No reservations loaded, assuming none: {}", e));
                ReservationMap::default()
            }
        }
    }

    async fn fetch_reservation_map(&self) -> Result<ReservationMap, String> {
        let url = self.url(&self.reservations_path);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| format!("Failed to fetch reservations: {}", e))?;
        let body = response
            .text()
            .await
            .map_err(|e| format!("Failed to read reservations: {}", e))?;

        decode_reservation_map(response.status(), &body).map_err(|e| format!("{} ({})", e, url))
    }

    /// Post a reservation request. The body is read as JSON whatever the status code,
    /// since the server reports business failures in `{success, message}`.
    pub async fn submit_reservation(&self, request: &ReserveRequest) -> Result<ReserveResponse, BookingError> {
        let url = self.url(&self.reserve_path);

        let response = Request::post(&url)
            .json(request)
            .map_err(|e| BookingError::Transport(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| BookingError::Transport(format!("Network error: {}", e)))?;

        response
            .json::<ReserveResponse>()
            .await
            .map_err(|e| BookingError::Transport(format!("Failed to parse response ({}): {}", response.status(), e)))
    }
}

/// Turn a reservations response into a map. Only a 2xx JSON object is accepted.
fn decode_reservation_map(status: u16, body: &str) -> Result<ReservationMap, String> {
    if !(200..300).contains(&status) {
        return Err(format!("Server returned {}", status));
    }
    serde_json::from_str::<ReservationMap>(body).map_err(|e| format!("Failed to parse reservations: {}", e))
}
