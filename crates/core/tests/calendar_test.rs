use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};
use rstest::rstest;

use leavedesk_core::{
    calendar::{business_day_count, count_business_days, days_between, is_business_day},
    errors::HrError,
    memory::InMemoryStore,
    store::Store,
};

mod common;
use common::{date, holiday};

#[rstest]
// Monday..Tuesday
#[case(date(2025, 6, 9), date(2025, 6, 10), 2)]
// Friday..Monday spans a weekend
#[case(date(2025, 6, 13), date(2025, 6, 16), 2)]
// Saturday..Sunday
#[case(date(2025, 6, 14), date(2025, 6, 15), 0)]
// single business day
#[case(date(2025, 6, 11), date(2025, 6, 11), 1)]
// two full weeks
#[case(date(2025, 6, 2), date(2025, 6, 15), 10)]
fn test_business_day_count_without_holidays(
    #[case] start: NaiveDate,
    #[case] end: NaiveDate,
    #[case] expected: i32,
) {
    assert_eq!(business_day_count(start, end, &HashSet::new()).unwrap(), expected);
}

#[test]
fn test_business_day_count_excludes_holidays() {
    let holidays = HashSet::from([date(2025, 8, 15), date(2025, 8, 16)]);

    // Friday the 15th is a holiday; the 16th is a Saturday anyway
    assert_eq!(
        business_day_count(date(2025, 8, 11), date(2025, 8, 17), &holidays).unwrap(),
        4
    );
    assert!(!is_business_day(date(2025, 8, 15), &holidays));
    assert!(is_business_day(date(2025, 8, 14), &holidays));
}

#[test]
fn test_business_day_count_rejects_reversed_range() {
    let result = business_day_count(date(2025, 6, 10), date(2025, 6, 9), &HashSet::new());
    assert!(matches!(result, Err(HrError::Validation(_))));
}

#[test]
fn test_business_day_count_matches_weekday_filter() {
    let holidays = HashSet::from([date(2025, 10, 2), date(2025, 12, 25)]);
    let start = date(2025, 9, 1);

    for span in [0, 3, 17, 45, 120] {
        let end = start + chrono::Duration::days(span);
        let expected = days_between(start, end)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
            .filter(|d| !holidays.contains(d))
            .count() as i32;
        assert_eq!(business_day_count(start, end, &holidays).unwrap(), expected);
    }
}

#[tokio::test]
async fn test_count_business_days_reads_holiday_calendar() {
    let store = InMemoryStore::new();
    store.add_holiday(holiday(date(2025, 1, 14), "Pongal")).await;
    store.add_holiday(holiday(date(2025, 1, 26), "Republic Day")).await;

    let mut tx = store.begin().await.unwrap();
    // 13..17 January: Monday..Friday with Pongal on Tuesday
    let days = count_business_days(&mut tx, date(2025, 1, 13), date(2025, 1, 17))
        .await
        .unwrap();
    assert_eq!(days, 4);
}
