#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, render_fill_to_png, RenderConfig};
