use chrono::{DateTime, Datelike, Duration, NaiveDate, TimeZone, Utc};
use mongodb::bson::DateTime as BsonDateTime;

pub fn chrono_to_bson(dt: DateTime<Utc>) -> BsonDateTime {
    BsonDateTime::from_millis(dt.timestamp_millis())
}

/// Calendar week containing `day`: Sunday 00:00 UTC up to, not including,
/// the next Sunday 00:00 UTC. `None` when either bound falls outside the
/// representable date range.
pub fn week_bounds(day: NaiveDate) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    let offset = i64::from(day.weekday().num_days_from_sunday());
    let start_day = day.checked_sub_signed(Duration::days(offset))?;
    let start = Utc.from_utc_datetime(&start_day.and_time(chrono::NaiveTime::MIN));
    let end = start.checked_add_signed(Duration::days(7))?;
    Some((start, end))
}
