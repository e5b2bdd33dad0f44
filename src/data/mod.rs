pub mod api;
pub mod availability;
pub mod form;
pub mod games;
pub mod reservation;
pub mod shared_booking;
pub mod slots;
