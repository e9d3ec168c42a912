//! Expense aggregation
//!
//! Pure, synchronous transformations from a flat list of expense records plus
//! a selection (time range, search text) into the values the screens show:
//! totals, per-category summaries, and filtered/sorted lists.
//!
//! Nothing here reads a clock. Every calendar question is answered in the time
//! zone of the `now` argument, so passing `chrono::Local::now()` gives host
//! calendar days while tests can pin a fixed offset.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, TimeZone, Utc};

use crate::models::{CategorySummary, Expense, Money, PeriodTotals, TimeRange};

/// Length of the rolling "last 7 days" window
pub const ROLLING_WEEK_HOURS: i64 = 7 * 24;

/// Whether a single expense falls inside `range` relative to `now`
pub fn in_range<Tz: TimeZone>(expense: &Expense, range: TimeRange, now: &DateTime<Tz>) -> bool {
    match range {
        TimeRange::Today => same_day(&expense.created_at, now),
        TimeRange::Last7Days => within_rolling_week(&expense.created_at, now),
        TimeRange::ThisMonth => same_month(&expense.created_at, now),
        TimeRange::ThisYear => {
            expense.created_at.with_timezone(&now.timezone()).year() == now.year()
        }
        TimeRange::AllTime => true,
    }
}

/// Keep the expenses that fall inside `range`, preserving input order
pub fn filter_by_range<Tz: TimeZone>(
    records: &[Expense],
    range: TimeRange,
    now: &DateTime<Tz>,
) -> Vec<Expense> {
    if range == TimeRange::AllTime {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|e| in_range(e, range, now))
        .cloned()
        .collect()
}

/// Exact sum of all amounts; zero for an empty list
pub fn sum_amount(records: &[Expense]) -> Money {
    records.iter().map(|e| e.amount).sum()
}

/// Group by exact category string, largest total first
///
/// Categories with equal totals keep the order in which they were first seen.
pub fn summarize_by_category(records: &[Expense]) -> Vec<CategorySummary> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut summaries: Vec<CategorySummary> = Vec::new();

    for expense in records {
        let slot = *index.entry(expense.category.as_str()).or_insert_with(|| {
            summaries.push(CategorySummary {
                category: expense.category.clone(),
                total_amount: Money::zero(),
                transaction_count: 0,
            });
            summaries.len() - 1
        });

        let summary = &mut summaries[slot];
        summary.total_amount += expense.amount;
        summary.transaction_count += 1;
    }

    // sort_by is stable, which gives the first-seen tie order
    summaries.sort_by(|a, b| b.total_amount.cmp(&a.total_amount));
    summaries
}

/// Share of `grand_total` taken by `part`, as a percentage
///
/// Returns exactly `0.0` when the grand total is zero.
pub fn percentage_of(part: Money, grand_total: Money) -> f64 {
    if grand_total.is_zero() {
        0.0
    } else {
        part.minor() as f64 / grand_total.minor() as f64 * 100.0
    }
}

/// Today, rolling-week and calendar-month totals
///
/// The windows overlap on purpose; each answers its own question.
pub fn compute_period_totals<Tz: TimeZone>(records: &[Expense], now: &DateTime<Tz>) -> PeriodTotals {
    let mut totals = PeriodTotals::default();

    for expense in records {
        if same_day(&expense.created_at, now) {
            totals.today += expense.amount;
        }
        if within_rolling_week(&expense.created_at, now) {
            totals.week += expense.amount;
        }
        if same_month(&expense.created_at, now) {
            totals.month += expense.amount;
        }
    }

    totals
}

/// Case-insensitive substring search on title or category
///
/// A blank query returns the input unchanged.
pub fn search_filter(records: &[Expense], query: &str) -> Vec<Expense> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|e| e.matches_lowercase(&needle))
        .cloned()
        .collect()
}

/// Newest first; records created at the same instant keep their order
pub fn sort_newest_first(records: &mut [Expense]) {
    records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}

fn same_day<Tz: TimeZone>(at: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    at.with_timezone(&now.timezone()).date_naive() == now.date_naive()
}

fn same_month<Tz: TimeZone>(at: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    let local = at.with_timezone(&now.timezone());
    local.year() == now.year() && local.month() == now.month()
}

fn within_rolling_week<Tz: TimeZone>(at: &DateTime<Utc>, now: &DateTime<Tz>) -> bool {
    *at >= now.with_timezone(&Utc) - Duration::hours(ROLLING_WEEK_HOURS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ExpenseId, UserId};
    use chrono::FixedOffset;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, s).unwrap()
    }

    fn expense(title: &str, category: &str, minor: i64, at: DateTime<Utc>) -> Expense {
        Expense {
            id: ExpenseId::new(),
            owner: UserId::new(),
            title: title.to_string(),
            category: category.to_string(),
            amount: Money::from_minor(minor),
            created_at: at,
        }
    }

    /// 2025-03-15 12:00 at UTC+1, i.e. 11:00 UTC
    fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 15, 12, 0, 0)
            .unwrap()
    }

    fn titles(records: &[Expense]) -> Vec<&str> {
        records.iter().map(|e| e.title.as_str()).collect()
    }

    #[test]
    fn test_empty_input_for_every_range() {
        for range in TimeRange::ALL {
            assert!(filter_by_range(&[], range, &now()).is_empty());
        }
        assert_eq!(sum_amount(&[]), Money::zero());
        assert_eq!(compute_period_totals(&[], &now()), PeriodTotals::default());
        assert!(summarize_by_category(&[]).is_empty());
    }

    #[test]
    fn test_last_seven_days_scenario() {
        let today = now().with_timezone(&Utc);
        let records = vec![
            expense("Coffee", "Food", 350, today),
            expense("Bus", "Transport", 240, today),
            expense("Shirt", "Shopping", 2499, today - Duration::days(8)),
        ];

        let week = filter_by_range(&records, TimeRange::Last7Days, &now());
        assert_eq!(titles(&week), vec!["Coffee", "Bus"]);
        assert_eq!(sum_amount(&week), Money::from_minor(590));
    }

    #[test]
    fn test_all_time_is_identity() {
        let records = vec![
            expense("a", "Food", 100, utc(2019, 1, 1, 0, 0, 0)),
            expense("b", "Food", 250, utc(2025, 3, 15, 10, 0, 0)),
        ];

        let all = filter_by_range(&records, TimeRange::AllTime, &now());
        assert_eq!(all, records);
        assert_eq!(sum_amount(&all), sum_amount(&records));
    }

    #[test]
    fn test_today_uses_the_local_calendar_day() {
        let records = vec![
            // 00:30 on the 15th locally, still the 14th in UTC
            expense("after midnight", "Food", 100, utc(2025, 3, 14, 23, 30, 0)),
            // 23:59 on the 14th locally
            expense("before midnight", "Food", 100, utc(2025, 3, 14, 22, 59, 0)),
            // 00:30 UTC on the 16th is 01:30 local on the 16th
            expense("tomorrow", "Food", 100, utc(2025, 3, 16, 0, 30, 0)),
        ];

        let today = filter_by_range(&records, TimeRange::Today, &now());
        assert_eq!(titles(&today), vec!["after midnight"]);
    }

    #[test]
    fn test_rolling_week_boundary_is_inclusive() {
        let cutoff = now().with_timezone(&Utc) - Duration::hours(168);
        let records = vec![
            expense("on edge", "Food", 100, cutoff),
            expense("just outside", "Food", 100, cutoff - Duration::seconds(1)),
            expense("just inside", "Food", 100, cutoff + Duration::seconds(1)),
        ];

        let week = filter_by_range(&records, TimeRange::Last7Days, &now());
        assert_eq!(titles(&week), vec!["on edge", "just inside"]);
    }

    #[test]
    fn test_rolling_week_is_not_day_aligned() {
        // seven calendar days back, one second before the cutoff hour
        let records = vec![expense("old", "Food", 100, utc(2025, 3, 8, 10, 59, 59))];
        assert!(filter_by_range(&records, TimeRange::Last7Days, &now()).is_empty());

        let records = vec![expense("edge day", "Food", 100, utc(2025, 3, 8, 11, 0, 0))];
        assert_eq!(filter_by_range(&records, TimeRange::Last7Days, &now()).len(), 1);
    }

    #[test]
    fn test_month_boundary_in_local_time() {
        let records = vec![
            // 2025-03-01 00:30 local
            expense("first of march", "Food", 100, utc(2025, 2, 28, 23, 30, 0)),
            // 2025-02-28 23:59:59 local
            expense("end of february", "Food", 100, utc(2025, 2, 28, 22, 59, 59)),
            // same month number, previous year
            expense("march last year", "Food", 100, utc(2024, 3, 10, 12, 0, 0)),
        ];

        let month = filter_by_range(&records, TimeRange::ThisMonth, &now());
        assert_eq!(titles(&month), vec!["first of march"]);
    }

    #[test]
    fn test_year_boundary_in_local_time() {
        let records = vec![
            // 2025-01-01 00:00 local
            expense("new year", "Food", 100, utc(2024, 12, 31, 23, 0, 0)),
            // 2024-12-31 23:59:59 local
            expense("old year", "Food", 100, utc(2024, 12, 31, 22, 59, 59)),
            expense("december", "Food", 100, utc(2025, 12, 1, 9, 0, 0)),
        ];

        let year = filter_by_range(&records, TimeRange::ThisYear, &now());
        assert_eq!(titles(&year), vec!["new year", "december"]);
    }

    #[test]
    fn test_filter_is_sound_and_complete() {
        let base = now().with_timezone(&Utc);
        let records: Vec<Expense> = (0..400)
            .map(|i| {
                expense(
                    &format!("e{}", i),
                    "Misc",
                    100 + i,
                    base - Duration::hours(i * 23),
                )
            })
            .collect();

        for range in TimeRange::ALL {
            let kept = filter_by_range(&records, range, &now());
            assert!(kept.iter().all(|e| in_range(e, range, &now())));

            let expected = records.iter().filter(|e| in_range(e, range, &now())).count();
            assert_eq!(kept.len(), expected, "{:?}", range);
        }
    }

    #[test]
    fn test_filter_preserves_order() {
        let base = now().with_timezone(&Utc);
        let records = vec![
            expense("c", "Food", 100, base - Duration::hours(1)),
            expense("a", "Food", 100, base - Duration::hours(3)),
            expense("b", "Food", 100, base - Duration::hours(2)),
        ];

        let today = filter_by_range(&records, TimeRange::Today, &now());
        assert_eq!(titles(&today), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_summaries_group_same_category() {
        let at = now().with_timezone(&Utc);
        let records = vec![
            expense("Coffee", "Food", 350, at),
            expense("Bagel", "Food", 150, at),
        ];

        let summaries = summarize_by_category(&records);
        assert_eq!(
            summaries,
            vec![CategorySummary {
                category: "Food".into(),
                total_amount: Money::from_minor(500),
                transaction_count: 2,
            }]
        );
    }

    #[test]
    fn test_summaries_are_case_sensitive_and_sorted() {
        let at = now().with_timezone(&Utc);
        let records = vec![
            expense("a", "food", 100, at),
            expense("b", "Food", 900, at),
            expense("c", "Rent", 50000, at),
            expense("d", "food", 300, at),
        ];

        let summaries = summarize_by_category(&records);
        let names: Vec<&str> = summaries.iter().map(|s| s.category.as_str()).collect();
        assert_eq!(names, vec!["Rent", "Food", "food"]);

        assert!(summaries
            .windows(2)
            .all(|w| w[0].total_amount >= w[1].total_amount));

        let total: Money = summaries.iter().map(|s| s.total_amount).sum();
        assert_eq!(total, sum_amount(&records));

        let count: usize = summaries.iter().map(|s| s.transaction_count).sum();
        assert_eq!(count, records.len());
    }

    #[test]
    fn test_summary_ties_keep_first_seen_order() {
        let at = now().with_timezone(&Utc);
        let records = vec![
            expense("a", "Books", 500, at),
            expense("b", "Games", 500, at),
            expense("c", "Apps", 500, at),
        ];

        let names: Vec<String> = summarize_by_category(&records)
            .into_iter()
            .map(|s| s.category)
            .collect();
        assert_eq!(names, vec!["Books", "Games", "Apps"]);
    }

    #[test]
    fn test_percentage_of_zero_total() {
        let pct = percentage_of(Money::zero(), Money::zero());
        assert_eq!(pct, 0.0);
        assert!(!pct.is_nan());
        assert_eq!(percentage_of(Money::from_minor(500), Money::zero()), 0.0);
    }

    #[test]
    fn test_percentage_of_share() {
        let pct = percentage_of(Money::from_minor(250), Money::from_minor(1000));
        assert!((pct - 25.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_period_totals_overlap() {
        let now_utc = now().with_timezone(&Utc);
        let records = vec![
            expense("today", "Food", 350, now_utc - Duration::hours(1)),
            // 2025-03-10: this week and this month
            expense("this week", "Food", 1000, now_utc - Duration::days(5)),
            // 2025-03-02: this month only
            expense("this month", "Food", 2000, now_utc - Duration::days(13)),
            // 2025-02-20: rolling week misses it, month misses it
            expense("last month", "Food", 4000, now_utc - Duration::days(23)),
        ];

        let totals = compute_period_totals(&records, &now());
        assert_eq!(totals.today, Money::from_minor(350));
        assert_eq!(totals.week, Money::from_minor(1350));
        assert_eq!(totals.month, Money::from_minor(3350));
    }

    #[test]
    fn test_week_can_exceed_month_early_in_the_month() {
        // 2 March: the rolling week reaches back into February
        let early = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2025, 3, 2, 12, 0, 0)
            .unwrap();
        let records = vec![expense("late feb", "Food", 700, utc(2025, 2, 27, 12, 0, 0))];

        let totals = compute_period_totals(&records, &early);
        assert_eq!(totals.week, Money::from_minor(700));
        assert_eq!(totals.month, Money::zero());
        assert_eq!(totals.today, Money::zero());
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let at = now().with_timezone(&Utc);
        let records = vec![
            expense("Coffee", "Food", 350, at),
            expense("Train", "Transport", 240, at),
            expense("Seafood platter", "Dining", 2000, at),
        ];

        let hits = search_filter(&records, "food");
        assert_eq!(titles(&hits), vec!["Coffee", "Seafood platter"]);

        let hits = search_filter(&records, "  TRAIN ");
        assert_eq!(titles(&hits), vec!["Train"]);

        assert!(search_filter(&records, "rent").is_empty());
    }

    #[test]
    fn test_blank_search_is_identity() {
        let at = now().with_timezone(&Utc);
        let records = vec![
            expense("b", "Food", 100, at),
            expense("a", "Food", 100, at),
        ];

        assert_eq!(search_filter(&records, ""), records);
        assert_eq!(search_filter(&records, "   \t"), records);
    }

    #[test]
    fn test_huge_stored_amounts_do_not_overflow() {
        let at = utc(2025, 3, 15, 10, 0, 0);
        let records = vec![
            expense("a", "Food", 9_223_372_036_854_775_800, at),
            expense("b", "Food", 100, at),
        ];
        let capped = Money::from_minor(i64::MAX);

        assert_eq!(sum_amount(&records), capped);
        assert_eq!(compute_period_totals(&records, &now()).month, capped);
        assert_eq!(summarize_by_category(&records)[0].total_amount, capped);
    }

    #[test]
    fn test_sort_newest_first() {
        let base = now().with_timezone(&Utc);
        let mut records = vec![
            expense("old", "Food", 100, base - Duration::days(3)),
            expense("new", "Food", 100, base),
            expense("tie-1", "Food", 100, base - Duration::days(1)),
            expense("tie-2", "Food", 100, base - Duration::days(1)),
        ];

        sort_newest_first(&mut records);
        assert_eq!(titles(&records), vec!["new", "tie-1", "tie-2", "old"]);
    }
}
