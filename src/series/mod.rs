// ============================================================================
// Series Module
// Time-indexed decimal series and the cursors that walk them
// ============================================================================

mod dual_iterator;
mod series_iterator;
mod time_series;

pub use dual_iterator::DualSeriesIterator;
pub use series_iterator::{SeriesIterator, SeriesKey, SeriesKeyMode};
pub use time_series::TimeSeries;
