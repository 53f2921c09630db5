pub mod checkin;
pub(crate) mod embeds;
pub mod profile;
pub mod redeem;
pub mod register;
pub mod titles;
