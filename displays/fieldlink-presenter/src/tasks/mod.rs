//! Embassy async tasks

pub mod radio_rx;
pub mod render;

pub use radio_rx::radio_rx_task;
pub use render::{render_task, Display, Inputs};
