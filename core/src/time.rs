use anyhow::{anyhow, Result};
use chrono::{
    DateTime, Duration, Local, LocalResult, Months, NaiveDate, NaiveDateTime, TimeZone, Utc,
};

/// Parses a date typed on the command line.
///
/// Accepted forms: RFC 3339 timestamps, `YYYY-MM-DD HH:MM:SS` (local time),
/// `YYYY-MM-DD` (end of that local day), `today`/`tod`, `tomorrow`/`tom`,
/// and relative `+Nd`, `+Nw`, `+Nm`.
pub fn parse_human_date(input: &str) -> Result<DateTime<Utc>> {
    parse_human_date_at(input, Local::now().date_naive())
}

pub fn parse_human_date_at(input: &str, today: NaiveDate) -> Result<DateTime<Utc>> {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "today" | "tod" => return end_of_day(today),
        "tomorrow" | "tom" => return end_of_day(today + Duration::days(1)),
        _ => {}
    }

    if let Some(relative) = input.strip_prefix('+') {
        return end_of_day(shift_date(today, relative)?);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S") {
        return from_local(dt);
    }
    if let Ok(d) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return end_of_day(d);
    }

    Err(anyhow!("Could not parse date: {}", input))
}

fn shift_date(today: NaiveDate, relative: &str) -> Result<NaiveDate> {
    let (split, _) = relative
        .char_indices()
        .last()
        .ok_or_else(|| anyhow!("Invalid relative format: +{}", relative))?;
    let (num_str, unit) = relative.split_at(split);
    let count: u32 = num_str
        .parse()
        .map_err(|_| anyhow!("Invalid relative format: +{}", relative))?;

    let shifted = match unit {
        "d" => today.checked_add_signed(Duration::days(count.into())),
        "w" => today.checked_add_signed(Duration::weeks(count.into())),
        // Same clamping as monthly recurrence: Jan 31 + 1m -> last day of Feb.
        "m" => today.checked_add_months(Months::new(count)),
        _ => return Err(anyhow!("Unknown unit in relative time: {}", unit)),
    };
    shifted.ok_or_else(|| anyhow!("Date out of range: +{}", relative))
}

fn end_of_day(date: NaiveDate) -> Result<DateTime<Utc>> {
    let local_dt = date
        .and_hms_opt(23, 59, 59)
        .ok_or_else(|| anyhow!("Invalid time of day"))?;
    from_local(local_dt)
}

fn from_local(dt: NaiveDateTime) -> Result<DateTime<Utc>> {
    match Local.from_local_datetime(&dt) {
        LocalResult::Single(t) => Ok(t.with_timezone(&Utc)),
        // Ambiguous around a DST fold; take the earlier instant.
        LocalResult::Ambiguous(earliest, _) => Ok(earliest.with_timezone(&Utc)),
        LocalResult::None => Err(anyhow!("Local time {} does not exist", dt)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn local_date(dt: DateTime<Utc>) -> NaiveDate {
        dt.with_timezone(&Local).date_naive()
    }

    fn anchor() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()
    }

    #[test]
    fn test_keywords() {
        assert_eq!(local_date(parse_human_date_at("today", anchor()).unwrap()), anchor());
        assert_eq!(
            local_date(parse_human_date_at("tom", anchor()).unwrap()),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_relative() {
        let d = |s: &str| local_date(parse_human_date_at(s, anchor()).unwrap());
        assert_eq!(d("+3d"), NaiveDate::from_ymd_opt(2024, 2, 3).unwrap());
        assert_eq!(d("+1w"), NaiveDate::from_ymd_opt(2024, 2, 7).unwrap());
        assert_eq!(d("+1m"), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(parse_human_date_at("+3y", anchor()).is_err());
        assert!(parse_human_date_at("+d", anchor()).is_err());
        assert!(parse_human_date_at("+", anchor()).is_err());
    }

    #[test]
    fn test_rfc3339() {
        let dt = parse_human_date_at("2024-05-01T10:00:00+02:00", anchor()).unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap());
    }

    #[test]
    fn test_plain_date_is_end_of_local_day() {
        let dt = parse_human_date_at("2024-05-01", anchor()).unwrap();
        let local = dt.with_timezone(&Local);
        assert_eq!(local.date_naive(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(local.format("%H:%M:%S").to_string(), "23:59:59");
    }

    #[test]
    fn test_garbage() {
        assert!(parse_human_date_at("next tuesday-ish", anchor()).is_err());
    }
}
