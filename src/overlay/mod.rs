pub mod mapper;
pub mod paths;

pub use mapper::{map_point, stroke_scale};
pub use paths::{Line, OverlayMode, OverlayPath, PathAccumulator, StrokeStyle, LINE_WIDTH};
