use std::fs;
use std::path::Path;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
#[serde(default)]
pub struct Weather {
    pub url: String,
    pub timeout_secs: u64,
    pub min_points: usize,
}

impl Default for Weather {
    fn default() -> Self {
        Weather {
            url: "https://www.gismeteo.ru/weather-volgograd-5089/hourly/".to_string(),
            timeout_secs: 15,
            min_points: 8,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Schedule {
    pub send_hours: Vec<u32>,
    pub morning_hour: u32,
    pub utc_offset_hours: i32,
    pub morning_labels: Vec<String>,
    pub evening_labels: Vec<String>,
}

impl Default for Schedule {
    fn default() -> Self {
        Schedule {
            send_hours: vec![6, 19],
            morning_hour: 6,
            utc_offset_hours: 3,
            morning_labels: ["06:00", "09:00", "12:00", "15:00", "18:00", "21:00"]
                .map(String::from).to_vec(),
            evening_labels: ["00:00", "03:00", "06:00", "09:00", "12:00", "15:00", "18:00", "21:00"]
                .map(String::from).to_vec(),
        }
    }
}

impl Schedule {
    /// Returns the fixed offset from UTC for the target city
    ///
    /// Range of the configured hours is checked in load_config, so the
    /// conversion cannot fail here.
    pub fn utc_offset(&self) -> chrono::FixedOffset {
        chrono::FixedOffset::east_opt(self.utc_offset_hours * 3600).unwrap()
    }
}

/// Bot credentials come from the environment, the file only carries the
/// request timeout
#[derive(Deserialize)]
#[serde(default)]
pub struct Bot {
    #[serde(skip)]
    pub token: String,
    #[serde(skip)]
    pub channel: String,
    pub timeout_secs: u64,
}

impl Default for Bot {
    fn default() -> Self {
        Bot {
            token: String::new(),
            channel: String::new(),
            timeout_secs: 10,
        }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct Files {
    pub status_file: String,
}

impl Default for Files {
    fn default() -> Self {
        Files { status_file: "status.json".to_string() }
    }
}

#[derive(Deserialize)]
#[serde(default)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
    pub debug_mode: bool,
}

impl Default for General {
    fn default() -> Self {
        General {
            log_path: "meteobot.log".to_string(),
            log_level: LevelFilter::Info,
            log_to_stdout: true,
            debug_mode: false,
        }
    }
}

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub weather: Weather,
    pub schedule: Schedule,
    pub bot: Bot,
    pub files: Files,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items.
/// A missing file is not an error, every item carries a built-in default.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let config: Config = if Path::new(config_path).exists() {
        let toml = fs::read_to_string(config_path)?;
        toml::from_str(&toml)?
    } else {
        Config::default()
    };

    if config.schedule.send_hours.is_empty() {
        return Err(ConfigError::from("no scheduled send hours configured"));
    }
    if config.schedule.send_hours.iter().any(|h| *h > 23) {
        return Err(ConfigError::from("scheduled send hour out of range"));
    }
    if config.schedule.utc_offset_hours.abs() > 23 {
        return Err(ConfigError::from("utc offset out of range"));
    }
    if config.schedule.morning_labels.is_empty() || config.schedule.evening_labels.is_empty() {
        return Err(ConfigError::from("empty display label list"));
    }
    if config.weather.min_points == 0 {
        return Err(ConfigError::from("min_points must be at least 1"));
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_when_file_absent() {
        let config = load_config("no-such-file.toml").unwrap();

        assert_eq!(config.schedule.send_hours, vec![6, 19]);
        assert_eq!(config.schedule.utc_offset_hours, 3);
        assert_eq!(config.weather.min_points, 8);
        assert_eq!(config.files.status_file, "status.json");
        assert!(config.bot.token.is_empty());
    }

    #[test]
    fn partial_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[schedule]\nsend_hours = [7]\n\n[general]\ndebug_mode = true\n").unwrap();

        let config = load_config(file.path().to_str().unwrap()).unwrap();

        assert_eq!(config.schedule.send_hours, vec![7]);
        assert!(config.general.debug_mode);
        // untouched sections keep their defaults
        assert_eq!(config.weather.timeout_secs, 15);
        assert_eq!(config.schedule.morning_hour, 6);
    }

    #[test]
    fn rejects_out_of_range_send_hour() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[schedule]\nsend_hours = [6, 24]\n").unwrap();

        assert!(load_config(file.path().to_str().unwrap()).is_err());
    }
}
