pub mod errors;

use std::time::Duration;
use scraper::{ElementRef, Html, Selector};
use ureq::Agent;
use crate::config::Weather;
use crate::manager_gismeteo::errors::WeatherError;
use crate::models::forecast::{ForecastPoint, ForecastSet};

const ROW_SELECTOR: &str = ".widget__row";
const TIME_SELECTOR: &str = ".widget__time";
const TEMPERATURE_SELECTOR: &str = ".unit_temperature_c";
const PRECIPITATION_SELECTOR: &str = ".weather-table__precipitation";
const DESCRIPTION_SELECTOR: &str = ".weather-table__description";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Struct for managing hourly forecasts published on gismeteo
pub struct Gismeteo {
    agent: Agent,
    url: String,
    min_points: usize,
}

impl Gismeteo {
    /// Returns a Gismeteo struct ready for fetching and extracting the
    /// hourly forecast page
    ///
    /// # Arguments
    ///
    /// * 'config' - the weather section of the configuration
    pub fn new(config: &Weather) -> Self {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        let agent = agent_config.into();

        Self { agent, url: config.url.to_string(), min_points: config.min_points }
    }

    /// Retrieves the raw forecast page. Single attempt, any network error,
    /// timeout or non-success status ends up as WeatherError::Transport.
    ///
    pub fn fetch_page(&self) -> Result<String, WeatherError> {
        let html = self.agent
            .get(&self.url)
            .header("User-Agent", USER_AGENT)
            .call()?
            .body_mut()
            .read_to_string()?;

        Ok(html)
    }

    /// Fetches the page and extracts the forecast in one go
    ///
    pub fn get_forecast(&self) -> Result<ForecastSet, WeatherError> {
        let html = self.fetch_page()?;
        extract_forecast(&html, self.min_points)
    }
}

struct RowSelectors {
    time: Selector,
    temperature: Selector,
    precipitation: Selector,
    description: Selector,
}

impl RowSelectors {
    fn new() -> Result<RowSelectors, WeatherError> {
        Ok(RowSelectors {
            time: selector(TIME_SELECTOR)?,
            temperature: selector(TEMPERATURE_SELECTOR)?,
            precipitation: selector(PRECIPITATION_SELECTOR)?,
            description: selector(DESCRIPTION_SELECTOR)?,
        })
    }
}

/// Extracts a ForecastSet from the raw page content.
///
/// Rows missing any required field are skipped rather than failing the
/// whole extraction. Only when the container selector matches nothing, or
/// the number of surviving points drops below the viability threshold, is
/// the extraction considered broken.
///
/// # Arguments
///
/// * 'html' - raw page content
/// * 'min_points' - viability threshold for the number of extracted points
pub fn extract_forecast(html: &str, min_points: usize) -> Result<ForecastSet, WeatherError> {
    let document = Html::parse_document(html);
    let rows = selector(ROW_SELECTOR)?;
    let row_selectors = RowSelectors::new()?;

    let candidates: Vec<ElementRef> = document.select(&rows).collect();
    if candidates.is_empty() {
        return Err(WeatherError::Extraction("no forecast rows found".to_string()));
    }

    let points: Vec<ForecastPoint> = candidates
        .iter()
        .filter_map(|row| parse_row(*row, &row_selectors))
        .collect();

    if points.len() < min_points {
        return Err(WeatherError::Extraction(
            format!("only {} of at least {} expected forecast points extracted",
                    points.len(), min_points)));
    }

    let mut forecast = ForecastSet::new();
    for point in points {
        forecast.insert(point);
    }

    Ok(forecast)
}

/// Parses one forecast row, returning None when any required field is
/// missing or empty
///
/// # Arguments
///
/// * 'row' - the row element to parse
/// * 'selectors' - pre-parsed selectors for the row fields
fn parse_row(row: ElementRef, selectors: &RowSelectors) -> Option<ForecastPoint> {
    let time_label = select_text(row, &selectors.time)?;
    let temperature = select_text(row, &selectors.temperature)?;
    let precipitation = select_text(row, &selectors.precipitation)?;
    let description = select_text(row, &selectors.description)?;

    Some(ForecastPoint {
        time_label,
        temperature,
        precipitation: normalize_precipitation(&precipitation),
        description,
    })
}

/// Returns the trimmed text of the first element matching the selector,
/// or None when there is no match or the text is empty
fn select_text(element: ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Turns the bare millimetre figure from the page into a readable phrase
///
/// # Arguments
///
/// * 'raw' - precipitation text as found on the page
fn normalize_precipitation(raw: &str) -> String {
    if raw == "0" {
        "без осадков".to_string()
    } else {
        format!("{} мм осадков", raw)
    }
}

fn selector(css: &str) -> Result<Selector, WeatherError> {
    Selector::parse(css)
        .map_err(|e| WeatherError::Extraction(format!("selector '{}': {}", css, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(time: &str, temp: &str, rain: &str, desc: &str) -> String {
        format!(r#"<div class="widget__row">
            <div class="widget__time">{time}</div>
            <span class="unit unit_temperature_c">{temp}</span>
            <div class="weather-table__precipitation">{rain}</div>
            <div class="weather-table__description">{desc}</div>
        </div>"#)
    }

    fn page(rows: &[String]) -> String {
        format!(r#"<html><body><div class="widget">{}</div></body></html>"#, rows.join("\n"))
    }

    fn full_day() -> Vec<String> {
        ["00:00", "03:00", "06:00", "09:00", "12:00", "15:00", "18:00", "21:00"]
            .iter()
            .map(|t| row(t, "+21", "0", "Ясно"))
            .collect()
    }

    #[test]
    fn extracts_all_complete_rows() {
        let forecast = extract_forecast(&page(&full_day()), 8).unwrap();

        assert_eq!(forecast.len(), 8);
        let point = forecast.get("06:00").unwrap();
        assert_eq!(point.temperature, "+21");
        assert_eq!(point.description, "Ясно");
    }

    #[test]
    fn normalizes_precipitation() {
        let rows = vec![
            row("06:00", "+18", "0", "Ясно"),
            row("09:00", "+20", "0,4", "Небольшой дождь"),
        ];
        let forecast = extract_forecast(&page(&rows), 2).unwrap();

        assert_eq!(forecast.get("06:00").unwrap().precipitation, "без осадков");
        assert_eq!(forecast.get("09:00").unwrap().precipitation, "0,4 мм осадков");
    }

    #[test]
    fn missing_container_is_extraction_error() {
        let html = "<html><body><p>Access denied</p></body></html>";

        match extract_forecast(html, 8) {
            Err(WeatherError::Extraction(msg)) => assert!(msg.contains("no forecast rows")),
            other => panic!("expected extraction error, got {:?}", other),
        }
    }

    #[test]
    fn incomplete_rows_are_skipped() {
        let mut rows = full_day();
        // a row without a temperature cell must not fail the extraction
        rows.push(r#"<div class="widget__row"><div class="widget__time">23:00</div></div>"#.to_string());

        let forecast = extract_forecast(&page(&rows), 8).unwrap();

        assert_eq!(forecast.len(), 8);
        assert!(forecast.get("23:00").is_none());
    }

    #[test]
    fn too_few_surviving_rows_is_extraction_error() {
        let rows = vec![
            row("06:00", "+18", "0", "Ясно"),
            row("09:00", "+20", "0", "Ясно"),
            row("12:00", "+23", "0", "Ясно"),
        ];

        match extract_forecast(&page(&rows), 8) {
            Err(WeatherError::Extraction(msg)) => assert!(msg.contains("only 3")),
            other => panic!("expected extraction error, got {:?}", other),
        }
    }
}
