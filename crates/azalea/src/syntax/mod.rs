pub mod kind;
pub mod line_col;
pub mod text;

pub use kind::*;
pub use line_col::{LineCol, LineIndex};
pub use text::*;
