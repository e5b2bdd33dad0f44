pub mod footer;
pub mod header;
pub mod outbound_booking;
pub mod slot_grid;
pub mod spinner;
