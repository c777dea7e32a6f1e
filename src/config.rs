use std::path::PathBuf;

/// File the dashboard opens at startup, relative to the working directory.
pub const DEFAULT_DATASET: &str = "Employment__Unemployment__and_Labor_Force_Data.csv";

/// Compile-time defaults for the dashboard window and charts.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub dataset_path: PathBuf,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub chart_height: f32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DEFAULT_DATASET),
            window_size: [1280.0, 860.0],
            min_window_size: [720.0, 480.0],
            chart_height: 280.0,
        }
    }
}
