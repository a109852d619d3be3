#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Client side of the admin dashboard: login, bearer-token role gating and
//! the polled bookings view.

pub mod auth;
pub mod bookings;
pub mod error;
pub mod reports;
pub mod settings;
pub mod startup;
pub mod token;
