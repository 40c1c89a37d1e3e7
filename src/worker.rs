use chrono::{DateTime, Timelike, Utc};
use log::{error, info};
use crate::config::Config;
use crate::digest::{build_digest, Day};
use crate::manager_gismeteo::errors::WeatherError;
use crate::manager_telegram::Notifier;
use crate::models::forecast::ForecastSet;
use crate::status::RunStatus;

const BROKEN_NOTICE: &str = "Внимание! Селекторы сломаны: ";
const RECOVERY_NOTICE: &str = "Селекторы восстановились! Прогноз будет отправлен по расписанию.";

/// Runs one scheduled invocation given the fetch/extract outcome.
///
/// Implements the alerting state machine: a healthy→broken transition sends
/// one admin notice with the error detail, a broken→healthy transition sends
/// one recovery notice, and while the state is unchanged no admin messages
/// go out at all. The public digest is only sent on a successful extraction
/// during a scheduled hour. The status is mutated in place and persisted by
/// the caller on every path.
///
/// # Arguments
///
/// * 'config' - the loaded configuration
/// * 'outcome' - result of the fetch/extract step
/// * 'notifier' - delivery channel for digest and admin notices
/// * 'status' - run status loaded at start, updated here
/// * 'utc_now' - reference time for the whole run
pub fn run<N: Notifier>(
    config: &Config,
    outcome: Result<ForecastSet, WeatherError>,
    notifier: &N,
    status: &mut RunStatus,
    utc_now: DateTime<Utc>,
) {
    let local_now = utc_now.with_timezone(&config.schedule.utc_offset());
    let hour = local_now.hour();

    let forecast = match outcome {
        Ok(forecast) => forecast,
        Err(e) => {
            mark_broken(notifier, status, e.to_string());
            return;
        }
    };

    if status.extraction_broken {
        info!("extraction recovered");
        notifier.notify_admin(RECOVERY_NOTICE);
        status.extraction_broken = false;
    }
    status.last_success = Some(utc_now);
    status.last_error = None;

    if !config.schedule.send_hours.contains(&hour) {
        info!("hour {} not in send schedule, no digest", hour);
        return;
    }

    let (day, labels) = if hour == config.schedule.morning_hour {
        (Day::Today, &config.schedule.morning_labels)
    } else {
        (Day::Tomorrow, &config.schedule.evening_labels)
    };

    match build_digest(&forecast, local_now, day, labels) {
        Ok(message) => {
            notifier.notify_channel(&message);
            info!("digest sent for hour {}", hour);
        }
        // a sparse digest means the page changed under us as well
        Err(e) => mark_broken(notifier, status, e.to_string()),
    }
}

/// Records a failed run, notifying the administrator only on the
/// healthy→broken transition
///
/// # Arguments
///
/// * 'notifier' - delivery channel for the admin notice
/// * 'status' - run status to update
/// * 'detail' - error detail to report
fn mark_broken<N: Notifier>(notifier: &N, status: &mut RunStatus, detail: String) {
    if status.extraction_broken {
        info!("extraction still broken: {}", detail);
    } else {
        error!("extraction broke: {}", detail);
        notifier.notify_admin(&format!("{}{}", BROKEN_NOTICE, detail));
        status.extraction_broken = true;
    }
    status.last_error = Some(detail);
}
