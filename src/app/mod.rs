pub mod output;

pub use output::{render_earthquake, render_forecast, render_regions, OutputFormat};
