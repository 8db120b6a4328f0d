use crate::domain::Channel;
use crate::errors::ServerError;
use crate::query::filter::FilterOptions;
use crate::query::sort::{SortBy, SortOrder};
use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::HashMap;

/// Filter and ordering requested through a query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewQuery {
    pub filter: FilterOptions,
    pub sort_by: SortBy,
    pub order: SortOrder,
}

/// Decodes a raw query string. Blank values count as absent.
pub fn parse_query(query: Option<&str>) -> HashMap<String, String> {
    query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.trim().to_string()))
                .filter(|(_, v)| !v.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

pub fn parse_review_query(query: Option<&str>) -> Result<ReviewQuery, ServerError> {
    let params = parse_query(query);
    let get = |key: &str| param(&params, key);

    let min_rating = get("minRating")
        .map(|raw| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| bad_param("minRating", raw))
        })
        .transpose()?;

    let timeframe_days = get("timeframeDays")
        .map(|raw| raw.parse::<u32>().map_err(|_| bad_param("timeframeDays", raw)))
        .transpose()?;

    let approved_only = match get("approvedOnly") {
        None => false,
        Some(raw) => parse_flag(raw).ok_or_else(|| bad_param("approvedOnly", raw))?,
    };

    let start_date = get("startDate")
        .map(|raw| parse_date_bound(raw, NaiveTime::MIN).ok_or_else(|| bad_param("startDate", raw)))
        .transpose()?;
    let end_of_day = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or(NaiveTime::MIN);
    let end_date = get("endDate")
        .map(|raw| parse_date_bound(raw, end_of_day).ok_or_else(|| bad_param("endDate", raw)))
        .transpose()?;

    let sort_by = match get("sortBy") {
        None => SortBy::default(),
        Some(raw) => SortBy::parse(raw).ok_or_else(|| bad_param("sortBy", raw))?,
    };
    let order = match get("order") {
        None => SortOrder::default(),
        Some(raw) => SortOrder::parse(raw).ok_or_else(|| bad_param("order", raw))?,
    };

    Ok(ReviewQuery {
        filter: FilterOptions {
            min_rating,
            // known aliases ("booking.com") collapse to the canonical name;
            // anything else is matched verbatim and simply finds nothing
            channel: get("channel").map(|raw| {
                Channel::parse(raw)
                    .map(|c| c.as_str().to_string())
                    .unwrap_or_else(|| raw.to_string())
            }),
            category: get("category").map(str::to_string),
            start_date,
            end_date,
            timeframe_days,
            approved_only,
        },
        sort_by,
        order,
    })
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str)
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// RFC 3339 instant, or a bare `YYYY-MM-DD` pinned to `time_of_day` UTC.
fn parse_date_bound(raw: &str, time_of_day: NaiveTime) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_time(time_of_day)))
}

fn bad_param(name: &str, raw: &str) -> ServerError {
    ServerError::BadRequest(format!("Invalid {name}: {raw}"))
}
