//! Day/month bucketing in the report timezone

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use chrono_tz::Tz;
use dealscope_domain::{DateBasis, EnrichedDeal, TimeBucket, TimeGranularity, TimeSeries};

use super::Accumulator;

/// Group deals into day or month buckets by their local calendar date.
///
/// Only non-empty buckets are returned, oldest first. Deals without the
/// basis timestamp are counted in `undated` and otherwise skipped.
pub fn bucket_by_time(
    deals: &[EnrichedDeal],
    granularity: TimeGranularity,
    basis: DateBasis,
    tz: Tz,
) -> TimeSeries {
    let mut groups: BTreeMap<NaiveDate, Accumulator> = BTreeMap::new();
    let mut undated = 0;

    for deal in deals {
        let Some(instant) = basis_instant(deal, basis) else {
            undated += 1;
            continue;
        };
        let start = bucket_start(local_date(instant, tz), granularity);
        groups.entry(start).or_default().add(deal);
    }

    let buckets = groups.into_iter().map(|(start, acc)| to_bucket(start, granularity, &acc)).collect();

    TimeSeries { granularity, basis, buckets, undated }
}

/// Zero-filled series covering `from..=to` (local dates).
///
/// Existing buckets are kept as-is; every missing day or month gets an empty
/// bucket. Returns nothing when `from` is after `to`.
pub fn fill_gaps(
    buckets: &[TimeBucket],
    from: NaiveDate,
    to: NaiveDate,
    granularity: TimeGranularity,
) -> Vec<TimeBucket> {
    let by_start: BTreeMap<NaiveDate, &TimeBucket> = buckets.iter().map(|b| (b.start, b)).collect();
    let last = bucket_start(to, granularity);

    let mut filled = Vec::new();
    let mut cursor = Some(bucket_start(from, granularity));
    while let Some(start) = cursor.filter(|start| *start <= last) {
        let bucket = by_start
            .get(&start)
            .map(|b| (*b).clone())
            .unwrap_or_else(|| to_bucket(start, granularity, &Accumulator::default()));
        filled.push(bucket);
        cursor = next_start(start, granularity);
    }
    filled
}

/// Calendar date of an instant in the given timezone.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// First date of the bucket containing `date`.
pub fn bucket_start(date: NaiveDate, granularity: TimeGranularity) -> NaiveDate {
    match granularity {
        TimeGranularity::Day => date,
        TimeGranularity::Month => date.with_day(1).unwrap_or(date),
    }
}

/// `2024-10-24` for days, `2024-10` for months.
pub fn bucket_label(start: NaiveDate, granularity: TimeGranularity) -> String {
    match granularity {
        TimeGranularity::Day => start.format("%Y-%m-%d").to_string(),
        TimeGranularity::Month => start.format("%Y-%m").to_string(),
    }
}

fn next_start(start: NaiveDate, granularity: TimeGranularity) -> Option<NaiveDate> {
    match granularity {
        TimeGranularity::Day => start.succ_opt(),
        TimeGranularity::Month => start.checked_add_months(Months::new(1)),
    }
}

fn basis_instant(deal: &EnrichedDeal, basis: DateBasis) -> Option<DateTime<Utc>> {
    match basis {
        DateBasis::Created => deal.created_at,
        DateBasis::Closed => deal.closed_at,
    }
}

fn to_bucket(start: NaiveDate, granularity: TimeGranularity, acc: &Accumulator) -> TimeBucket {
    TimeBucket {
        start,
        label: bucket_label(start, granularity),
        deal_count: acc.deal_count,
        total_amount: acc.total_amount,
        total_area_m2: acc.total_area_m2,
        avg_price_per_area: acc.avg_price_per_area(),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use chrono_tz::America::{Argentina::Buenos_Aires, Los_Angeles};
    use dealscope_domain::StageRef;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn deal(created_at: Option<DateTime<Utc>>, amount: f64, area: f64) -> EnrichedDeal {
        EnrichedDeal {
            id: "d".into(),
            name: "Deal".into(),
            amount,
            pipeline_id: "default".into(),
            stage: StageRef { id: "new".into(), label: "New".into(), resolved: true },
            created_at,
            closed_at: None,
            contact_ids: vec![],
            company_id: None,
            company_name: None,
            zone: None,
            line_items: vec![],
            total_area_m2: area,
            avg_price_per_area: (area > 0.0).then(|| amount / area),
            subtotal: 0.0,
            tax_total: 0.0,
            days_since_creation: 0,
        }
    }

    #[test]
    fn test_day_bucket_uses_report_timezone() {
        // 01:30 UTC on the 25th is still the 24th in Buenos Aires (UTC-3)
        let instant = Utc.with_ymd_and_hms(2024, 10, 25, 1, 30, 0).unwrap();
        let deals = vec![deal(Some(instant), 100.0, 1.0)];

        let series = bucket_by_time(&deals, TimeGranularity::Day, DateBasis::Created, Buenos_Aires);
        assert_eq!(series.buckets.len(), 1);
        assert_eq!(series.buckets[0].start, date(2024, 10, 24));
        assert_eq!(series.buckets[0].label, "2024-10-24");

        let utc = bucket_by_time(&deals, TimeGranularity::Day, DateBasis::Created, chrono_tz::UTC);
        assert_eq!(utc.buckets[0].start, date(2024, 10, 25));
    }

    #[test]
    fn test_dst_boundary_in_los_angeles() {
        // DST ends 2024-11-03 at 09:00 UTC; both instants are local Nov 3rd
        let before = Utc.with_ymd_and_hms(2024, 11, 3, 8, 30, 0).unwrap();
        let after = Utc.with_ymd_and_hms(2024, 11, 4, 7, 30, 0).unwrap();
        let deals = vec![deal(Some(before), 1.0, 0.0), deal(Some(after), 2.0, 0.0)];

        let series = bucket_by_time(&deals, TimeGranularity::Day, DateBasis::Created, Los_Angeles);
        assert_eq!(series.buckets.len(), 1);
        assert_eq!(series.buckets[0].start, date(2024, 11, 3));
        assert_eq!(series.buckets[0].deal_count, 2);
    }

    #[test]
    fn test_month_buckets_sorted_and_pooled() {
        let deals = vec![
            deal(Some(Utc.with_ymd_and_hms(2024, 11, 2, 12, 0, 0).unwrap()), 600.0, 1.0),
            deal(Some(Utc.with_ymd_and_hms(2024, 10, 5, 12, 0, 0).unwrap()), 1_000.0, 2.0),
            deal(Some(Utc.with_ymd_and_hms(2024, 10, 28, 12, 0, 0).unwrap()), 500.0, 0.0),
        ];

        let series = bucket_by_time(&deals, TimeGranularity::Month, DateBasis::Created, Buenos_Aires);
        let labels: Vec<&str> = series.buckets.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-10", "2024-11"]);

        let october = &series.buckets[0];
        assert_eq!(october.start, date(2024, 10, 1));
        assert_eq!(october.deal_count, 2);
        assert_eq!(october.total_amount, 1_500.0);
        assert_eq!(october.avg_price_per_area, Some(750.0));
    }

    #[test]
    fn test_missing_basis_date_is_counted_as_undated() {
        let deals = vec![deal(None, 1.0, 0.0), deal(Some(Utc::now()), 1.0, 0.0)];
        let closed = bucket_by_time(&deals, TimeGranularity::Day, DateBasis::Closed, Buenos_Aires);
        assert!(closed.buckets.is_empty());
        assert_eq!(closed.undated, 2);

        let created = bucket_by_time(&deals, TimeGranularity::Day, DateBasis::Created, Buenos_Aires);
        assert_eq!(created.undated, 1);
    }

    #[test]
    fn test_fill_gaps_days() {
        let deals = vec![deal(Some(Utc.with_ymd_and_hms(2024, 10, 3, 15, 0, 0).unwrap()), 5.0, 0.0)];
        let series = bucket_by_time(&deals, TimeGranularity::Day, DateBasis::Created, Buenos_Aires);

        let filled = fill_gaps(&series.buckets, date(2024, 10, 1), date(2024, 10, 7), TimeGranularity::Day);
        assert_eq!(filled.len(), 7);
        assert_eq!(filled[2].deal_count, 1);
        assert_eq!(filled.iter().map(|b| b.deal_count).sum::<usize>(), 1);
        assert_eq!(filled[6].label, "2024-10-07");
        assert_eq!(filled[0].avg_price_per_area, None);
    }

    #[test]
    fn test_fill_gaps_months_across_year_end() {
        let filled = fill_gaps(&[], date(2024, 11, 15), date(2025, 2, 3), TimeGranularity::Month);
        let labels: Vec<&str> = filled.iter().map(|b| b.label.as_str()).collect();
        assert_eq!(labels, vec!["2024-11", "2024-12", "2025-01", "2025-02"]);
    }

    #[test]
    fn test_fill_gaps_inverted_range_is_empty() {
        assert!(fill_gaps(&[], date(2024, 10, 2), date(2024, 10, 1), TimeGranularity::Day).is_empty());
    }
}
