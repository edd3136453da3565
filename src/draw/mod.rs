pub mod history;
pub mod input;
pub mod mask;
pub mod messages;
pub mod model;
pub mod render;
pub mod save;
pub mod state;
pub mod toolbar;

pub use history::StrokeBuffer;
pub use messages::{FrameInput, HandSample, Shortcut, StatusMessage};
pub use model::{Palette, Point, Rect, Rgb, StrokeEntry, StrokeSample};
