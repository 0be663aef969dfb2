use chrono::{NaiveDate, TimeDelta};
use rand::Rng;
use crate::alignment::day_label;
use crate::models::kp::{DailyKp, HourlyKp, FORECAST_MARKER};

/// Produces placeholder days with quiet-range activity.
///
/// Every day holds exactly 8 samples at 3-hour steps with Kp drawn
/// uniformly from 1.0..=3.0 at one decimal of precision, so the shape is
/// fixed while the values vary per call. Labels follow the usual
/// relative-day rules and always carry the forecast marker.
///
/// # Arguments
///
/// * 'day_count' - number of consecutive days to produce
/// * 'start_date' - date of the first produced day
/// * 'today' - reference date for labeling
pub fn synthesize(day_count: usize, start_date: NaiveDate, today: NaiveDate) -> Vec<DailyKp> {
    let mut rng = rand::thread_rng();
    let mut days: Vec<DailyKp> = Vec::with_capacity(day_count);

    for i in 0..day_count {
        let date = start_date + TimeDelta::days(i as i64);

        let mut hourly: Vec<HourlyKp> = Vec::with_capacity(8);
        let mut max_kp: f64 = 0.0;
        for hour in (0..24u32).step_by(3) {
            let kp = rng.gen_range(10..=30) as f64 / 10.0;
            max_kp = max_kp.max(kp);
            hourly.push(HourlyKp { hour: format!("{:02}:00", hour), kp });
        }

        days.push(DailyKp {
            date,
            label: format!("{}{}", day_label(date, today), FORECAST_MARKER),
            max_kp,
            hourly,
        });
    }

    days
}
