//! Humanised age ("19 years, 11 months, 28 days")

use chrono::{Datelike, Months, NaiveDate};

/// Calendar difference between two dates in whole years, months and days.
///
/// Months are added to `birth` with end-of-month clamping, so Jan 31 plus one month is
/// the last day of February.
pub fn calendar_delta(birth: NaiveDate, today: NaiveDate) -> (u32, u32, u32) {
    if today <= birth {
        return (0, 0, 0);
    }
    let mut months = i64::from(today.year() - birth.year()) * 12
        + (i64::from(today.month()) - i64::from(birth.month()));
    let mut anchor = add_months(birth, months);
    if anchor > today {
        months -= 1;
        anchor = add_months(birth, months);
    }
    let days = (today - anchor).num_days().max(0) as u32;
    let months = months.max(0) as u32;
    (months / 12, months % 12, days)
}

fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    u32::try_from(months)
        .ok()
        .and_then(|m| date.checked_add_months(Months::new(m)))
        .unwrap_or(date)
}

pub fn humanize_age(birth: NaiveDate, today: NaiveDate) -> String {
    let (years, months, days) = calendar_delta(birth, today);
    let cake = if months == 0 && days == 0 { " 🎂!!!" } else { "" };
    format!(
        "{}, {}, {}{cake}",
        unit(years, "year"),
        unit(months, "month"),
        unit(days, "day")
    )
}

fn unit(value: u32, name: &str) -> String {
    if value == 1 {
        format!("{value} {name}")
    } else {
        format!("{value} {name}s")
    }
}
