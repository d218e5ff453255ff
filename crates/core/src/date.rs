//! Calendar-date helpers.
//!
//! Note dates follow the journal owner's wall-clock day in a fixed
//! reference timezone (UTC+9), not the server's UTC day: a note written at
//! 00:30 local time belongs to the new local day even though UTC is still
//! on the previous one.

use chrono::{FixedOffset, Utc};

use crate::types::LocalDate;

/// Reference timezone offset for server-assigned note dates, in hours east
/// of UTC.
const REFERENCE_OFFSET_HOURS: i32 = 9;

/// Current calendar date in the reference timezone.
///
/// `noteDate` is assigned from this at creation time and is never taken
/// from client input.
pub fn current_reference_date() -> LocalDate {
    let offset =
        FixedOffset::east_opt(REFERENCE_OFFSET_HOURS * 3600).expect("reference offset is in range");
    Utc::now().with_timezone(&offset).date_naive()
}
