pub use self::{block::*, piece::*, render_board::*};

pub(crate) mod block;
pub(crate) mod piece;
pub(crate) mod render_board;
