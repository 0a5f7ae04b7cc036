//! Illustrative weekly and monthly series anchored on today's base price.
//! These are not historical quotes.

use crate::core::regions::signed_price;
use crate::domain::model::{ChartSeries, Charts};
use chrono::{Days, Local, NaiveDate};
use rand::Rng;

/// Day-6 ... today, offsets from the base price.
const WEEKLY_VARIANCE: [i64; 7] = [-450, -120, 220, -80, 300, 90, 0];

const MONTH_DAYS: u64 = 30;
const MONTH_START_DISCOUNT: i64 = 1500;
const MONTH_STEP_MIN: i64 = -300;
const MONTH_STEP_MAX: i64 = 400;

pub fn generate_charts(base_price: u64) -> Charts {
    generate_charts_for(base_price, Local::now().date_naive(), &mut rand::thread_rng())
}

pub fn generate_charts_for<R: Rng + ?Sized>(
    base_price: u64,
    today: NaiveDate,
    rng: &mut R,
) -> Charts {
    Charts {
        weekly: weekly_series(base_price, today),
        monthly: monthly_series(base_price, today, rng),
    }
}

fn weekly_series(base_price: u64, today: NaiveDate) -> ChartSeries {
    let base = signed_price(base_price);
    let mut labels = Vec::with_capacity(WEEKLY_VARIANCE.len());
    let mut data = Vec::with_capacity(WEEKLY_VARIANCE.len());

    for (days_back, variance) in (0..WEEKLY_VARIANCE.len() as u64).rev().zip(WEEKLY_VARIANCE) {
        labels.push(day_before(today, days_back).format("%a").to_string());
        data.push(base.saturating_add(variance));
    }

    ChartSeries { labels, data }
}

/// Random walk from a lower starting point that lands exactly on the base
/// price on the last day.
fn monthly_series<R: Rng + ?Sized>(base_price: u64, today: NaiveDate, rng: &mut R) -> ChartSeries {
    let base = signed_price(base_price);
    let mut labels = Vec::with_capacity(MONTH_DAYS as usize);
    let mut data = Vec::with_capacity(MONTH_DAYS as usize);
    let mut simulated = base.saturating_sub(MONTH_START_DISCOUNT);

    for days_back in (0..MONTH_DAYS).rev() {
        labels.push(day_before(today, days_back).format("%d %b").to_string());

        simulated = simulated.saturating_add(rng.gen_range(MONTH_STEP_MIN..=MONTH_STEP_MAX));
        if days_back == 0 {
            simulated = base;
        }
        data.push(simulated);
    }

    ChartSeries { labels, data }
}

fn day_before(today: NaiveDate, days: u64) -> NaiveDate {
    today.checked_sub_days(Days::new(days)).unwrap_or(today)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        // a Tuesday
        NaiveDate::from_ymd_opt(2026, 2, 17).unwrap()
    }

    #[test]
    fn test_weekly_series_pattern() {
        let charts = generate_charts_for(160_000, today(), &mut StdRng::seed_from_u64(7));

        assert_eq!(
            charts.weekly.labels,
            vec!["Wed", "Thu", "Fri", "Sat", "Sun", "Mon", "Tue"]
        );
        assert_eq!(
            charts.weekly.data,
            vec![159_550, 159_880, 160_220, 159_920, 160_300, 160_090, 160_000]
        );
    }

    #[test]
    fn test_monthly_series_shape() {
        let charts = generate_charts_for(160_000, today(), &mut StdRng::seed_from_u64(42));
        let monthly = &charts.monthly;

        assert_eq!(monthly.labels.len(), 30);
        assert_eq!(monthly.data.len(), 30);
        assert_eq!(monthly.labels[0], "19 Jan");
        assert_eq!(monthly.labels[29], "17 Feb");
        assert_eq!(*monthly.data.last().unwrap(), 160_000);

        // first point is one step away from base - 1500
        let first = monthly.data[0];
        assert!((158_500 - 300..=158_500 + 400).contains(&first));

        for pair in monthly.data[..29].windows(2) {
            let step = pair[1] - pair[0];
            assert!((MONTH_STEP_MIN..=MONTH_STEP_MAX).contains(&step), "step {}", step);
        }
    }

    #[test]
    fn test_today_variant_ends_on_base() {
        let charts = generate_charts(170_500);
        assert_eq!(*charts.weekly.data.last().unwrap(), 170_500);
        assert_eq!(*charts.monthly.data.last().unwrap(), 170_500);
    }

    #[test]
    fn test_oversized_base_does_not_overflow() {
        let mut rng = StdRng::seed_from_u64(7);
        let charts = generate_charts_for(u64::MAX, today(), &mut rng);

        assert_eq!(charts.weekly.data[5], i64::MAX);
        assert_eq!(charts.monthly.data.last(), Some(&i64::MAX));
    }
}
