/// WPM sampled at one clock tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSeriesPoint {
    pub t: f64,
    pub wpm: f64,
}

impl TimeSeriesPoint {
    pub fn new(t: f64, wpm: f64) -> Self {
        Self { t, wpm }
    }
}

impl From<(f64, f64)> for TimeSeriesPoint {
    fn from(v: (f64, f64)) -> Self {
        TimeSeriesPoint { t: v.0, wpm: v.1 }
    }
}

impl From<TimeSeriesPoint> for (f64, f64) {
    fn from(p: TimeSeriesPoint) -> Self {
        (p.t, p.wpm)
    }
}

/// Per-second WPM samples of the current session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WpmHistory {
    points: Vec<TimeSeriesPoint>,
}

impl WpmHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, elapsed_secs: u32, wpm: u32) {
        self.points
            .push(TimeSeriesPoint::new(f64::from(elapsed_secs), f64::from(wpm)));
    }

    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn peak(&self) -> f64 {
        self.points.iter().map(|p| p.wpm).fold(0.0, f64::max)
    }

    /// Standard deviation of the samples; 0 when there are none.
    pub fn consistency(&self) -> f64 {
        let samples: Vec<f64> = self.points.iter().map(|p| p.wpm).collect();
        std_dev(&samples).unwrap_or(0.0)
    }
}

pub fn mean(data: &[f64]) -> Option<f64> {
    match data.len() {
        0 => None,
        count => Some(data.iter().sum::<f64>() / count as f64),
    }
}

pub fn std_dev(data: &[f64]) -> Option<f64> {
    let data_mean = mean(data)?;
    let variance = data
        .iter()
        .map(|value| {
            let diff = data_mean - *value;
            diff * diff
        })
        .sum::<f64>()
        / data.len() as f64;

    Some(variance.sqrt())
}
