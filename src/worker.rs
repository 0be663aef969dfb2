use std::thread;
use std::time::Duration;
use chrono::Local;
use log::{error, info};
use crate::config::Config;
use crate::models::kp::DailyKp;
use crate::service::ForecastService;

/// Runs the refresh loop: fetch the canonical window, emit one card per
/// day, sleep until the next round.
///
/// Failures the upstream reported are logged and the loop keeps going;
/// the next round retries. The cache inside the service bounds how often
/// the rounds actually reach upstream.
///
/// # Arguments
///
/// * 'config' - the application configuration
/// * 'service' - the wired forecast service
pub fn run(config: &Config, service: &ForecastService) {
    loop {
        match service.fetch_forecast() {
            Ok(days) => print_forecast(&days, "Forecast"),
            Err(e) => error!("{}", e),
        }

        thread::sleep(Duration::from_secs(config.forecast.refresh_interval_secs));
    }
}

/// Emits the window as one card line per day under a captioned rule
///
/// # Arguments
///
/// * 'days' - the canonical window
/// * 'caption' - the caption to print
fn print_forecast(days: &[DailyKp], caption: &str) {
    let report_time = format!("{}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    let caption = format!("{} {} ", report_time, caption);

    let mut msg = format!("{:=<120}\n", caption);
    for day in days {
        msg += &format!("{}\n", day);
    }

    info!("{}", msg);
}
