pub mod booking;
pub mod game_detail;
pub mod games;
pub mod home;
