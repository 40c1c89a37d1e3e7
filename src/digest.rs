use chrono::{DateTime, Datelike, FixedOffset, TimeDelta, Weekday};
use crate::errors::DigestError;
use crate::models::forecast::ForecastSet;

/// Which day a digest covers, relative to the shifted reference time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Day {
    Today,
    Tomorrow,
}

/// Builds the public forecast digest.
///
/// One line per requested time label found in the forecast, in requested
/// order; labels absent from the forecast are silently skipped. When fewer
/// than half of the requested labels make it into the message the digest
/// counts as failed, independent of the extractor's own threshold.
///
/// # Arguments
///
/// * 'forecast' - the extracted forecast
/// * 'now' - reference time, already shifted to the target timezone
/// * 'day' - whether the digest covers today or tomorrow
/// * 'labels' - ordered time labels to include
pub fn build_digest(
    forecast: &ForecastSet,
    now: DateTime<FixedOffset>,
    day: Day,
    labels: &[String],
) -> Result<String, DigestError> {

    let target = match day {
        Day::Today => now,
        Day::Tomorrow => now + TimeDelta::days(1),
    };
    let date_str = target.format("%d.%m");
    let weekday_str = weekday_ru(target.weekday());

    let lines: Vec<String> = labels
        .iter()
        .filter_map(|label| forecast.get(label))
        .map(|p| format!("{} - {}, {}, {}", p.time_label, p.temperature, p.precipitation, p.description))
        .collect();

    if lines.len() * 2 < labels.len() {
        return Err(DigestError::InsufficientData { got: lines.len(), want: labels.len() });
    }

    let (greeting, day_word, sign_off) = match day {
        Day::Today => ("Привет!\n", "сегодня", "Хорошего дня!"),
        Day::Tomorrow => ("", "завтра", "Хорошего вечера!"),
    };

    let mut message = format!("{}Погода на {} {}, {}\n", greeting, day_word, date_str, weekday_str);
    message += &lines.join("\n");
    message += &format!("\n{}", sign_off);

    Ok(message)
}

/// Russian lowercase weekday name, as the digest audience expects it
fn weekday_ru(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "понедельник",
        Weekday::Tue => "вторник",
        Weekday::Wed => "среда",
        Weekday::Thu => "четверг",
        Weekday::Fri => "пятница",
        Weekday::Sat => "суббота",
        Weekday::Sun => "воскресенье",
    }
}
