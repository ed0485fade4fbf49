//! Public site pages.

pub(crate) mod booking;
pub(crate) mod calculator;
pub(crate) mod home;
pub(crate) mod info;
pub(crate) mod layout;
pub(crate) mod loyalty;
pub(crate) mod promotions;
pub(crate) mod reviews;
pub(crate) mod track;
