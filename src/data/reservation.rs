use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use log::{error, info};

use super::api::VenueApi;
use super::availability::{AvailabilityLoader, AvailabilitySource, RequestTicket, RequestTracker};
use super::form::{validate, BookingFormData, ReservationRequest, ValidationPolicy};
use super::shared_booking::{AvailableHours, DayAvailability, Device, ReserveResponse};
use super::slots::{SlotSelection, SlotState, SummaryLine};
use crate::error::{BookingError, ValidationError};

/// Where confirmed reservations are sent.
#[allow(async_fn_in_trait)]
pub trait ReservationSink {
    async fn reserve(&self, request: &ReservationRequest) -> Result<ReserveResponse, BookingError>;
}

#[derive(Debug, Clone)]
pub struct HttpReservationSink {
    api: VenueApi,
}

impl HttpReservationSink {
    pub fn new(api: VenueApi) -> Self {
        Self { api }
    }
}

impl ReservationSink for HttpReservationSink {
    async fn reserve(&self, request: &ReservationRequest) -> Result<ReserveResponse, BookingError> {
        self.api.reserve(request).await
    }
}

/// In-memory sink that answers with a fixed outcome and keeps every request.
#[derive(Debug, Clone)]
pub struct StubReservationSink {
    outcome: Result<(), BookingError>,
    received: Arc<Mutex<Vec<ReservationRequest>>>,
}

impl StubReservationSink {
    pub fn accepting() -> Self {
        Self::with_outcome(Ok(()))
    }

    pub fn failing(err: BookingError) -> Self {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(outcome: Result<(), BookingError>) -> Self {
        Self {
            outcome,
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn received(&self) -> Vec<ReservationRequest> {
        self.received
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }
}

impl ReservationSink for StubReservationSink {
    async fn reserve(&self, request: &ReservationRequest) -> Result<ReserveResponse, BookingError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(request.clone());
        }
        self.outcome.clone().map(|()| ReserveResponse {
            success: true,
            data: None,
        })
    }
}

/// How the hourly price is determined.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Pricing {
    Fixed(f64),
    FromServer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitPhase {
    Idle,
    Submitting,
    Succeeded,
}

/// Message the view should show after a rejected or failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Invalid(ValidationError),
    BookingFailed,
}

/// State of one booking view: the day being shown, the slot grid, the form
/// and the submission state machine.
///
/// Every transition is synchronous so the same type drives the browser view
/// (around `spawn_local`) and the tests. `load` and `submit` chain the steps
/// for callers that can hold `&mut self` across the await.
#[derive(Debug, Clone)]
pub struct BookingSession<S: SlotSelection> {
    today: NaiveDate,
    date: NaiveDate,
    loading: bool,
    requests: RequestTracker,
    available_hours: AvailableHours,
    devices: Vec<Device>,
    server_price: Option<f64>,
    pricing: Pricing,
    selection: S,
    pending: Option<(NaiveDate, S)>,
    form: BookingFormData,
    blank_form: BookingFormData,
    policy: ValidationPolicy,
    phase: SubmitPhase,
    attempt: u64,
    notice: Option<Notice>,
}

impl<S: SlotSelection> BookingSession<S> {
    pub fn new(today: NaiveDate, pricing: Pricing, policy: ValidationPolicy) -> Self {
        Self {
            today,
            date: today,
            loading: true,
            requests: RequestTracker::default(),
            available_hours: AvailableHours::default(),
            devices: Vec::new(),
            server_price: None,
            pricing,
            selection: S::default(),
            pending: None,
            form: BookingFormData::default(),
            blank_form: BookingFormData::default(),
            policy,
            phase: SubmitPhase::Idle,
            attempt: 0,
            notice: None,
        }
    }

    /// Form the session starts with and returns to after a booking.
    pub fn with_blank_form(mut self, form: BookingFormData) -> Self {
        self.form = form.clone();
        self.blank_form = form;
        self
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn available_hours(&self) -> AvailableHours {
        self.available_hours
    }

    pub fn time_slots(&self) -> Vec<u32> {
        self.available_hours.slots()
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn selection(&self) -> &S {
        &self.selection
    }

    pub fn form(&self) -> &BookingFormData {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookingFormData {
        &mut self.form
    }

    pub fn phase(&self) -> SubmitPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    pub fn is_success(&self) -> bool {
        self.phase == SubmitPhase::Succeeded
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn price(&self) -> Option<f64> {
        match self.pricing {
            Pricing::Fixed(price) => Some(price),
            Pricing::FromServer => self.server_price,
        }
    }

    pub fn estimated_price(&self) -> Option<f64> {
        self.price().map(|price| price * self.selection.len() as f64)
    }

    pub fn summary(&self) -> Vec<SummaryLine> {
        self.selection.summary(&self.devices)
    }

    pub fn slot_state(&self, key: S::Key) -> SlotState {
        self.selection.state(&self.devices, key)
    }

    pub fn is_booked(&self, key: S::Key) -> bool {
        S::is_booked(&self.devices, key)
    }

    /// Moves to another date, never before today. Returns false when the
    /// date did not change.
    pub fn select_date(&mut self, date: NaiveDate) -> bool {
        let date = date.max(self.today);
        if date == self.date {
            return false;
        }
        self.date = date;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.date > self.today
    }

    /// Starts loading the current date. The grid is hidden until the
    /// matching `finish_load`.
    pub fn begin_load(&mut self) -> RequestTicket {
        self.loading = true;
        self.requests.issue(self.date)
    }

    /// Applies a loaded day unless a newer request superseded it. Returns
    /// whether the data was applied.
    pub fn finish_load(&mut self, ticket: RequestTicket, day: DayAvailability) -> bool {
        if !self.requests.complete(&ticket) {
            info!("Discarding stale availability for {}", ticket.date);
            return false;
        }
        self.available_hours = day.available_hours;
        self.devices = day.devices;
        self.server_price = day.price;
        self.selection.clear();
        self.loading = false;
        true
    }

    /// Toggles a slot. Adding a booked or out-of-window slot is refused.
    /// Returns whether the selection changed.
    pub fn toggle(&mut self, key: S::Key) -> bool {
        if !self.selection.is_selected(key)
            && !S::can_select(&self.available_hours, &self.devices, key)
        {
            return false;
        }
        self.selection.toggle(key);
        true
    }

    /// Validates and, when valid, moves to `Submitting` and returns the
    /// payload to post. On rejection the session is back to `Idle` with a
    /// notice set.
    pub fn begin_submit(&mut self) -> Option<ReservationRequest> {
        if self.is_submitting() {
            return None;
        }
        self.phase = SubmitPhase::Submitting;
        self.attempt += 1;
        self.notice = None;

        if let Err(err) = validate(&self.form, &self.selection, self.policy) {
            self.phase = SubmitPhase::Idle;
            self.notice = Some(Notice::Invalid(err));
            return None;
        }

        self.pending = Some((self.date, self.selection.clone()));
        Some(ReservationRequest::new(&self.form, self.date, &self.selection))
    }

    /// Reconciles the outcome of the attempt started by `begin_submit`.
    /// On success returns the attempt number to pass to `dismiss_success`.
    pub fn finish_submit(&mut self, outcome: Result<(), BookingError>) -> Option<u64> {
        if !self.is_submitting() {
            return None;
        }
        let (booked_date, pending) = self.pending.take().unwrap_or((self.date, S::default()));

        match outcome {
            Ok(()) => {
                // the grid may show another day by now
                if booked_date == self.date {
                    pending.merge_into(&mut self.devices);
                }
                self.selection.clear();
                self.form = self.blank_form.clone();
                self.phase = SubmitPhase::Succeeded;
                info!("Booked {} hours on {}", pending.len(), booked_date);
                Some(self.attempt)
            }
            Err(err) => {
                error!("Booking error: {}", err);
                self.phase = SubmitPhase::Idle;
                self.notice = Some(Notice::BookingFailed);
                None
            }
        }
    }

    /// Ends the success state of `attempt` once its confirmation has been
    /// shown. Returns false when a later attempt has started since.
    pub fn dismiss_success(&mut self, attempt: u64) -> bool {
        if !self.is_success() || attempt != self.attempt {
            return false;
        }
        self.phase = SubmitPhase::Idle;
        true
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub async fn load<A: AvailabilitySource>(&mut self, loader: &AvailabilityLoader<A>) {
        let ticket = self.begin_load();
        let day = loader.load(ticket.date).await;
        self.finish_load(ticket, day);
    }

    pub async fn submit<R: ReservationSink>(&mut self, sink: &R) -> Result<(), Notice> {
        let Some(request) = self.begin_submit() else {
            return Err(self.notice.unwrap_or(Notice::BookingFailed));
        };
        let outcome = sink.reserve(&request).await.map(|_| ());
        self.finish_submit(outcome);
        match self.notice {
            Some(notice) => Err(notice),
            None => Ok(()),
        }
    }
}
