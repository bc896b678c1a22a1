mod candle;
mod layout;
mod series;
mod timeline;
pub mod timestamp;
pub mod transform;
mod types;

pub use candle::Candle;
pub use layout::BarLayoutSpec;
pub use series::{CandleSeries, CandleSource};
pub use timeline::{TimeSlot, TimeSlots, TimelineConfig};
pub use timestamp::{datetime_to_millis, to_millis, Granularity, MILLIS_BOUNDARY};
pub use transform::{price_to_y, time_to_x, x_to_time, y_to_price};
pub use types::{PixelSize, PriceRange, TimeRange, ViewRange};
