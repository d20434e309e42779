// src/widgets/mod.rs
//! Form-widget value plumbing: splitting and joining the multi-input widgets
//! a form layer renders (date ranges, US phone numbers) without any of the
//! HTML itself, which stays with the host.

use chrono::{DateTime, LocalResult, NaiveDate, NaiveTime, TimeZone};
use std::collections::HashMap;
use std::fmt;

use crate::dates::{self, DATE_FORMAT};

/// A pair of optional timezone-aware bounds, `(from, to)`.
pub type DateRange<Tz> = (Option<DateTime<Tz>>, Option<DateTime<Tz>>);

// Formats users actually type into a date box.
const INPUT_DATE_FORMATS: &[&str] = &["%m/%d/%Y", "%m/%d/%y", "%Y-%m-%d", "%m-%d-%Y"];

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    INPUT_DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(text, f).ok())
}

fn make_datetime<Tz: TimeZone>(text: &str, time: NaiveTime, tz: &Tz) -> Option<DateTime<Tz>> {
    let naive = parse_date(text)?.and_time(time);
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => None,
    }
}

/// Turn the two text inputs of a date-range widget into datetimes in `tz`.
///
/// The lower bound gets the first moment of its day, the upper bound the last,
/// so `10/01/2024 → 10/31/2024` spans the whole of October. Unparsable or
/// empty text yields `None` for that bound rather than an error — invalid
/// search input just drops the bound.
pub fn parse_date_range<Tz: TimeZone>(
    from_text: Option<&str>,
    to_text: Option<&str>,
    tz: &Tz,
) -> DateRange<Tz> {
    let from = from_text
        .filter(|t| !t.trim().is_empty())
        .and_then(|t| make_datetime(t, NaiveTime::MIN, tz));
    let to = to_text
        .filter(|t| !t.trim().is_empty())
        .and_then(|t| make_datetime(t, dates::last_moment(), tz));
    (from, to)
}

/// Pull `{name}_0` / `{name}_1` out of posted form data and parse them.
pub fn date_range_from_form<Tz: TimeZone>(
    data: &HashMap<String, String>,
    name: &str,
    tz: &Tz,
) -> DateRange<Tz> {
    let from = data.get(&format!("{name}_0")).map(String::as_str);
    let to = data.get(&format!("{name}_1")).map(String::as_str);
    parse_date_range(from, to, tz)
}

/// Render a range back into the widget's two text values (`%m/%d/%Y`).
pub fn decompress_date_range<Tz>(range: &DateRange<Tz>) -> (Option<String>, Option<String>)
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let render = |dt: &DateTime<Tz>| dt.format(DATE_FORMAT).to_string();
    (range.0.as_ref().map(render), range.1.as_ref().map(render))
}

/// Build query filters for `field_name` from whichever bounds are present,
/// keyed `<field>__gte` / `<field>__lte`. i.e.:
///
/// ```ignore
/// let filters = date_range_filter(&dates, "expires_at");
/// queryset.filter(filters)
/// ```
pub fn date_range_filter<Tz: TimeZone>(
    range: &DateRange<Tz>,
    field_name: &str,
) -> HashMap<String, DateTime<Tz>> {
    let mut filters = HashMap::new();
    if let Some(from) = &range.0 {
        filters.insert(format!("{field_name}__gte"), from.clone());
    }
    if let Some(to) = &range.1 {
        filters.insert(format!("{field_name}__lte"), to.clone());
    }
    filters
}

/// Split a stored `aaa-bbb-cccc` US phone value into the widget's three
/// inputs. An absent or empty value leaves all three empty.
pub fn split_phone(value: Option<&str>) -> [Option<String>; 3] {
    match value {
        Some(v) if !v.is_empty() => {
            let mut parts = v.split('-');
            [parts.next(), parts.next(), parts.next()].map(|p| p.map(str::to_string))
        }
        _ => [None, None, None],
    }
}

/// Reassemble a phone value from posted inputs named `{name}_0` through
/// `{name}_2`. All three empty (or absent) means no value was entered.
pub fn phone_from_form(data: &HashMap<String, String>, name: &str) -> Option<String> {
    let mut value = [String::new(), String::new(), String::new()];
    for (key, posted) in data {
        // keys look like "{name}_1"; the index comes off the end
        let index = key
            .strip_prefix(name)
            .and_then(|rest| rest.strip_prefix('_'))
            .and_then(|idx| idx.parse::<usize>().ok());
        if let Some(i) = index {
            if i < value.len() {
                value[i] = posted.clone();
            }
        }
    }
    if value.iter().all(String::is_empty) {
        None
    } else {
        Some(format!("{}-{}-{}", value[0], value[1], value[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Timelike, Utc};

    fn tz() -> FixedOffset {
        FixedOffset::west_opt(6 * 3600).expect("valid offset")
    }

    #[test]
    fn range_bounds_get_start_and_end_of_day() {
        let (from, to) = parse_date_range(Some("10/01/2024"), Some("10/31/2024"), &tz());
        let from = from.expect("from parses");
        let to = to.expect("to parses");
        assert_eq!((from.hour(), from.minute(), from.second()), (0, 0, 0));
        assert_eq!((to.hour(), to.minute(), to.second()), (23, 59, 59));
        assert!(from < to);
    }

    #[test]
    fn unparsable_text_drops_the_bound_silently() {
        let (from, to) = parse_date_range(Some("not a date"), Some("10/31/2024"), &tz());
        assert!(from.is_none());
        assert!(to.is_some());

        let (from, to) = parse_date_range(Some(""), None, &tz());
        assert!(from.is_none());
        assert!(to.is_none());
    }

    #[test]
    fn iso_dates_parse_too() {
        let (from, _) = parse_date_range(Some("2024-10-01"), None, &tz());
        let from = from.expect("iso date parses");
        assert_eq!(from.date_naive(), NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
    }

    #[test]
    fn form_data_is_read_from_suffixed_keys() {
        let mut data = HashMap::new();
        data.insert("created_0".to_string(), "01/02/2024".to_string());
        data.insert("created_1".to_string(), "01/05/2024".to_string());
        let (from, to) = date_range_from_form(&data, "created", &Utc);
        assert!(from.is_some());
        assert!(to.is_some());

        let (from, to) = date_range_from_form(&data, "other_field", &Utc);
        assert!(from.is_none());
        assert!(to.is_none());
    }

    #[test]
    fn decompress_round_trips_to_widget_text() {
        let (from, to) = parse_date_range(Some("10/01/2024"), Some("10/31/2024"), &Utc);
        let (from_text, to_text) = decompress_date_range(&(from, to));
        assert_eq!(from_text.as_deref(), Some("10/01/2024"));
        assert_eq!(to_text.as_deref(), Some("10/31/2024"));

        let empty: DateRange<Utc> = (None, None);
        assert_eq!(decompress_date_range(&empty), (None, None));
    }

    #[test]
    fn filter_map_contains_only_present_bounds() {
        let (from, to) = parse_date_range(Some("10/01/2024"), None, &Utc);
        let filters = date_range_filter(&(from, to), "expires_at");
        assert_eq!(filters.len(), 1);
        assert!(filters.contains_key("expires_at__gte"));

        let both = parse_date_range(Some("10/01/2024"), Some("10/31/2024"), &Utc);
        let filters = date_range_filter(&both, "expires_at");
        assert_eq!(filters.len(), 2);
        assert!(filters.contains_key("expires_at__lte"));
    }

    #[test]
    fn phone_splits_and_rejoins() {
        assert_eq!(
            split_phone(Some("555-867-5309")),
            [Some("555".into()), Some("867".into()), Some("5309".into())]
        );
        assert_eq!(split_phone(None), [None, None, None]);
        assert_eq!(split_phone(Some("")), [None, None, None]);

        let mut data = HashMap::new();
        data.insert("phone_0".to_string(), "555".to_string());
        data.insert("phone_1".to_string(), "867".to_string());
        data.insert("phone_2".to_string(), "5309".to_string());
        assert_eq!(phone_from_form(&data, "phone").as_deref(), Some("555-867-5309"));
    }

    #[test]
    fn all_empty_phone_inputs_mean_no_value() {
        let mut data = HashMap::new();
        data.insert("phone_0".to_string(), String::new());
        data.insert("phone_1".to_string(), String::new());
        data.insert("phone_2".to_string(), String::new());
        assert_eq!(phone_from_form(&data, "phone"), None);
        assert_eq!(phone_from_form(&HashMap::new(), "phone"), None);
    }
}
