use chrono::NaiveTime;
use crate::domain::models::booking::Booking;

/// Half-open interval overlap: `[s1, e1)` and `[s2, e2)` overlap iff
/// `s1 < e2 && s2 < e1`. Touching intervals (`e1 == s2`) do not overlap.
pub fn overlaps(s1: NaiveTime, e1: NaiveTime, s2: NaiveTime, e2: NaiveTime) -> bool {
    s1 < e2 && s2 < e1
}

/// Filters a hall/date partition of approved bookings down to those that
/// overlap the proposed `[start, end)` interval.
///
/// Pure over its inputs: same partition and same interval always yield the
/// same result, whether called as a pre-check or on the commit path. The
/// caller is responsible for having validated `start < end` and for having
/// checked that the hall exists — an unknown hall simply yields an empty
/// partition here, which is indistinguishable from a free slot.
///
/// `exclude_booking_id` removes exactly that booking from consideration,
/// used when re-validating an edit or a re-approval against itself.
pub fn find_conflicts(
    existing: &[Booking],
    start: NaiveTime,
    end: NaiveTime,
    exclude_booking_id: Option<&str>,
) -> Vec<Booking> {
    existing
        .iter()
        .filter(|b| exclude_booking_id.is_none_or(|ex| ex != b.id))
        .filter(|b| overlaps(b.start_time, b.end_time, start, end))
        .cloned()
        .collect()
}
