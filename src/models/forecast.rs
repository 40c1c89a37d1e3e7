use std::collections::HashMap;

/// One extracted hourly forecast entry
///
/// All fields hold display text as found on the page, except precipitation
/// which is normalized by the extractor into a readable phrase.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub time_label: String,
    pub temperature: String,
    pub precipitation: String,
    pub description: String,
}

/// Forecast points from one page fetch, looked up by time label
#[derive(Debug, Default)]
pub struct ForecastSet {
    points: HashMap<String, ForecastPoint>,
}

impl ForecastSet {
    pub fn new() -> ForecastSet {
        ForecastSet { points: HashMap::new() }
    }

    /// Inserts a point under its own time label, replacing any earlier
    /// point carrying the same label
    ///
    /// # Arguments
    ///
    /// * 'point' - the forecast point to insert
    pub fn insert(&mut self, point: ForecastPoint) {
        self.points.insert(point.time_label.clone(), point);
    }

    /// Returns the point for the given time label, if present
    ///
    /// # Arguments
    ///
    /// * 'label' - the time label to look up, e.g. "06:00"
    pub fn get(&self, label: &str) -> Option<&ForecastPoint> {
        self.points.get(label)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }
}
