use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use log::{debug, warn};

use super::api::VenueApi;
use super::shared_booking::DayAvailability;
use crate::error::NetworkError;

/// Where per-day availability comes from.
#[allow(async_fn_in_trait)]
pub trait AvailabilitySource {
    async fn fetch_day(&self, date: NaiveDate) -> Result<DayAvailability, NetworkError>;
}

#[derive(Debug, Clone)]
pub struct HttpAvailabilitySource {
    api: VenueApi,
}

impl HttpAvailabilitySource {
    pub fn new(api: VenueApi) -> Self {
        Self { api }
    }
}

impl AvailabilitySource for HttpAvailabilitySource {
    async fn fetch_day(&self, date: NaiveDate) -> Result<DayAvailability, NetworkError> {
        self.api.get_day(date).await
    }
}

/// Deterministic source answering every date with the same outcome.
#[derive(Debug, Clone)]
pub struct FixtureAvailabilitySource {
    outcome: Result<DayAvailability, NetworkError>,
    requests: Arc<AtomicUsize>,
}

impl FixtureAvailabilitySource {
    pub fn new(day: DayAvailability) -> Self {
        Self {
            outcome: Ok(day),
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn mock() -> Self {
        Self::new(DayAvailability::mock())
    }

    /// A source whose every request fails, as if the venue API were down.
    pub fn unreachable() -> Self {
        Self {
            outcome: Err(NetworkError::Transport("venue API unreachable".into())),
            requests: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn requests(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

impl AvailabilitySource for FixtureAvailabilitySource {
    async fn fetch_day(&self, _date: NaiveDate) -> Result<DayAvailability, NetworkError> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}

/// Loads a day's availability, substituting the mock dataset when the
/// source fails. Never errors.
#[derive(Debug, Clone)]
pub struct AvailabilityLoader<S> {
    source: S,
    initial: Option<(NaiveDate, DayAvailability)>,
}

pub type HttpAvailabilityLoader = AvailabilityLoader<HttpAvailabilitySource>;

impl HttpAvailabilityLoader {
    pub fn http(api: VenueApi) -> Self {
        Self::new(HttpAvailabilitySource::new(api))
    }
}

impl<S: AvailabilitySource> AvailabilityLoader<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            initial: None,
        }
    }

    /// Data already known for `date`; requests for that date skip the source.
    pub fn with_initial(mut self, date: NaiveDate, day: DayAvailability) -> Self {
        self.initial = Some((date, day));
        self
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub async fn load(&self, date: NaiveDate) -> DayAvailability {
        if let Some((initial_date, day)) = &self.initial {
            if *initial_date == date {
                debug!("Using initial availability for {}", date);
                return day.clone();
            }
        }

        match self.source.fetch_day(date).await {
            Ok(day) => day,
            Err(err) => {
                warn!("Error fetching availability for {}, using mock data: {}", date, err);
                DayAvailability::mock()
            }
        }
    }
}

/// Identifies one availability request by the date it was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub date: NaiveDate,
    generation: u64,
}

/// Keeps track of the latest availability request so that a slow answer for
/// a previously selected date cannot overwrite the current one.
#[derive(Debug, Clone, Default)]
pub struct RequestTracker {
    generation: u64,
    current: Option<RequestTicket>,
}

impl RequestTracker {
    pub fn issue(&mut self, date: NaiveDate) -> RequestTicket {
        self.generation += 1;
        let ticket = RequestTicket {
            date,
            generation: self.generation,
        };
        self.current = Some(ticket);
        ticket
    }

    pub fn is_current(&self, ticket: &RequestTicket) -> bool {
        self.current.as_ref() == Some(ticket)
    }

    pub fn in_flight(&self) -> bool {
        self.current.is_some()
    }

    /// Retires the ticket. Returns false if a newer request superseded it.
    pub fn complete(&mut self, ticket: &RequestTicket) -> bool {
        if self.is_current(ticket) {
            self.current = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::shared_booking::{AvailableHours, Device};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn failed_fetch_substitutes_mock_data() {
        let loader = AvailabilityLoader::new(FixtureAvailabilitySource::unreachable());
        let day = loader.load(date(2024, 1, 1)).await;

        assert_eq!(day.available_hours, AvailableHours::new(10, 20));
        assert_eq!(day.devices.len(), 4);
        assert_eq!(loader.source().requests(), 1);
    }

    #[tokio::test]
    async fn successful_fetch_is_returned_unchanged() {
        let fixture = DayAvailability {
            available_hours: AvailableHours::new(14, 18),
            devices: vec![Device::new(7, "Arena", vec![15])],
            price: None,
        };
        let loader = AvailabilityLoader::new(FixtureAvailabilitySource::new(fixture.clone()));
        assert_eq!(loader.load(date(2025, 6, 1)).await, fixture);
    }

    #[tokio::test]
    async fn initial_data_skips_the_source_for_its_date_only() {
        let today = date(2025, 3, 10);
        let initial = DayAvailability {
            available_hours: AvailableHours::new(11, 13),
            devices: vec![],
            price: None,
        };
        let loader = AvailabilityLoader::new(FixtureAvailabilitySource::mock())
            .with_initial(today, initial.clone());

        assert_eq!(loader.load(today).await, initial);
        assert_eq!(loader.source().requests(), 0);

        let tomorrow = loader.load(date(2025, 3, 11)).await;
        assert_eq!(tomorrow, DayAvailability::mock());
        assert_eq!(loader.source().requests(), 1);
    }

    #[test]
    fn superseded_requests_are_not_current() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue(date(2025, 1, 1));
        let second = tracker.issue(date(2025, 1, 2));

        assert!(!tracker.is_current(&first));
        assert!(!tracker.complete(&first));
        assert!(tracker.in_flight());
        assert!(tracker.complete(&second));
        assert!(!tracker.in_flight());
    }

    #[test]
    fn same_date_reissued_gets_a_new_ticket() {
        let mut tracker = RequestTracker::default();
        let first = tracker.issue(date(2025, 1, 1));
        let again = tracker.issue(date(2025, 1, 1));
        assert_ne!(first, again);
        assert!(tracker.is_current(&again));
    }
}
