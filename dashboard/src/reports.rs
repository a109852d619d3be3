use std::collections::HashMap;

use gatewatch_core::{ArrivalStatus, Booking, BookingStatus};
use itertools::Itertools;

/// Per-status counts backing the report cards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportCounts {
    pub bookings: HashMap<BookingStatus, usize>,
    pub arrivals: HashMap<ArrivalStatus, usize>,
}

impl ReportCounts {
    pub fn booking_count(&self, status: BookingStatus) -> usize {
        self.bookings.get(&status).copied().unwrap_or(0)
    }

    pub fn arrival_count(&self, status: ArrivalStatus) -> usize {
        self.arrivals.get(&status).copied().unwrap_or(0)
    }
}

pub fn report_counts(bookings: &[Booking]) -> ReportCounts {
    ReportCounts {
        bookings: bookings.iter().map(|b| b.status).counts(),
        arrivals: bookings.iter().map(|b| b.arrival_status).counts(),
    }
}
