//! Proleptic gregorian calendar arithmetic.
//!
//! Days are counted from the Unix epoch: epoch day 0 is 1970-01-01.  Every
//! function is total over the supported year range (±999,999,999); callers
//! validate months and days beforehand.

/// Whether `year` is a gregorian leap year.
pub fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1–12) of `year`.
pub fn length_of_month(year: i64, month: u8) -> u8 {
    debug_assert!((1..=12).contains(&month));
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Number of days in `year`.
pub fn length_of_year(year: i64) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Cumulative day-of-year offset at the start of each month (non-leap).
const MONTH_OFFSET: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

/// Day of year (1–366) of a valid date.
pub fn day_of_year(year: i64, month: u8, day: u8) -> u16 {
    let mut doy = MONTH_OFFSET[usize::from(month - 1)] + u16::from(day);
    if month > 2 && is_leap_year(year) {
        doy += 1;
    }
    doy
}

/// Epoch day of a valid date.
pub fn epoch_day(year: i64, month: u8, day: u8) -> i64 {
    let (m, d) = (i64::from(month), i64::from(day));
    let y = if m <= 2 { year - 1 } else { year };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146_097 + doe - 719_468
}

/// Decompose an epoch day into `(year, month, day)`.
pub fn date_of_epoch_day(epoch_day: i64) -> (i64, u8, u8) {
    let z = epoch_day + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
    let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
    let year = yoe + era * 400 + i64::from(month <= 2);
    (year, month, day)
}

/// ISO day of week (1 = Monday … 7 = Sunday) of an epoch day.
pub fn iso_day_of_week(epoch_day: i64) -> u8 {
    // 1970-01-01 was a Thursday
    ((epoch_day + 3).rem_euclid(7) + 1) as u8
}
