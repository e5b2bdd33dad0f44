use chrono::NaiveDate;
use log::{debug, info};
use reqwest::Client;

use super::form::ReservationRequest;
use super::games::{Game, GamesResponse};
use super::shared_booking::{DayAvailability, DayResponse, ReserveResponse};
use crate::error::{BookingError, NetworkError};
use crate::settings::Settings;
use crate::utils::date::iso_date;

/// Thin client over the venue's REST server.
#[derive(Debug, Clone)]
pub struct VenueApi {
    client: Client,
    base_url: String,
}

impl VenueApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.api_base_url.clone())
    }

    /// Client for the installed settings.
    pub fn current() -> Self {
        Self::from_settings(Settings::current())
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    /// `GET /day/{YYYY-MM-DD}`
    pub async fn get_day(&self, date: NaiveDate) -> Result<DayAvailability, NetworkError> {
        let url = self.url(&format!("day/{}", iso_date(date)));
        debug!("Fetching availability from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(NetworkError::Status(response.status().as_u16()));
        }

        let body: DayResponse = response.json().await?;
        Ok(body.data.into())
    }

    /// `POST /reserve`. Anything but a 2xx with `success: true` is a failure.
    pub async fn reserve(&self, request: &ReservationRequest) -> Result<ReserveResponse, BookingError> {
        let url = self.url("reserve");
        info!(
            "Posting reservation for {} ({} hours) to {}",
            request.date,
            request.reservations.count(),
            url
        );

        let response = self.client.post(&url).json(request).send().await?;
        if !response.status().is_success() {
            return Err(BookingError::Status(response.status().as_u16()));
        }

        let body: ReserveResponse = response.json().await?;
        if !body.success {
            return Err(BookingError::Rejected);
        }
        Ok(body)
    }

    /// `GET /games`
    pub async fn list_games(&self) -> Result<Vec<Game>, NetworkError> {
        let url = self.url("games");
        debug!("Fetching game catalog from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(NetworkError::Status(response.status().as_u16()));
        }

        let body: GamesResponse = response.json().await?;
        Ok(body.data)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::data::form::BookingFormData;
    use crate::data::shared_booking::AvailableHours;
    use crate::data::slots::{FlatSelection, SlotSelection};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn request() -> ReservationRequest {
        let form = BookingFormData {
            fullname: "Ana".into(),
            email: "a@b.com".into(),
            ..Default::default()
        };
        let mut selection = FlatSelection::default();
        selection.toggle(10);
        ReservationRequest::new(&form, date(), &selection)
    }

    async fn reserve_answering(response: ResponseTemplate) -> Result<ReserveResponse, BookingError> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reserve"))
            .respond_with(response)
            .mount(&server)
            .await;
        VenueApi::new(server.uri()).reserve(&request()).await
    }

    #[test]
    fn urls_join_without_double_slashes() {
        let api = VenueApi::new("http://localhost:8000/");
        assert_eq!(api.url("reserve"), "http://localhost:8000/reserve");

        let api = VenueApi::new("https://arena.example/api");
        assert_eq!(api.url("day/2024-01-01"), "https://arena.example/api/day/2024-01-01");
    }

    #[tokio::test]
    async fn confirmed_reservation_is_ok() {
        let result = reserve_answering(
            ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": {"id": 7}})),
        )
        .await;
        let body = result.unwrap();
        assert!(body.success);
        assert_eq!(body.data, Some(json!({"id": 7})));
    }

    #[tokio::test]
    async fn unconfirmed_reservation_is_rejected() {
        let result =
            reserve_answering(ResponseTemplate::new(200).set_body_json(json!({"success": false}))).await;
        assert_eq!(result.unwrap_err(), BookingError::Rejected);
    }

    #[tokio::test]
    async fn server_error_on_reserve_keeps_the_status() {
        let result = reserve_answering(ResponseTemplate::new(500)).await;
        assert_eq!(result.unwrap_err(), BookingError::Status(500));
    }

    #[tokio::test]
    async fn reservation_posts_json_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/reserve"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        VenueApi::new(server.uri()).reserve(&request()).await.unwrap();

        let received = server.received_requests().await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
        assert_eq!(body["fullname"], "Ana");
        assert_eq!(body["date"], "2024-01-01");
        assert_eq!(body["reservations"], json!([10]));
    }

    #[tokio::test]
    async fn day_without_hours_gets_defaults() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/day/2024-01-01"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"price": 35}})))
            .mount(&server)
            .await;

        let day = VenueApi::new(server.uri()).get_day(date()).await.unwrap();
        assert_eq!(day.available_hours, AvailableHours::new(12, 20));
        assert!(day.devices.is_empty());
        assert_eq!(day.price, Some(35.0));
    }

    #[tokio::test]
    async fn missing_day_is_a_status_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/day/2024-01-01"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let result = VenueApi::new(server.uri()).get_day(date()).await;
        assert_eq!(result.unwrap_err(), NetworkError::Status(404));
    }

    #[tokio::test]
    async fn malformed_day_is_a_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/day/2024-01-01"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"devices": "four"}})),
            )
            .mount(&server)
            .await;

        let result = VenueApi::new(server.uri()).get_day(date()).await;
        assert!(matches!(result, Err(NetworkError::Decode(_))), "{result:?}");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        // nothing listens on port 1
        let result = VenueApi::new("http://127.0.0.1:1").list_games().await;
        assert!(matches!(result, Err(NetworkError::Transport(_))), "{result:?}");
    }
}
