pub mod error;
pub mod evaluation;
pub mod game;
pub mod position;
pub mod search;
pub mod tt;
pub mod types;
pub mod uci;

pub use error::{GameError, SearchError};
pub use evaluation::{Evaluate, MaterialEvaluator};
pub use game::{ChessGame, PositionKey};
pub use position::{Pushed, SearchPosition};
pub use search::{Engine, Level, SearchOutcome, SearchStats, DEFAULT_DEPTH};
pub use tt::{NoTable, SharedTranspositionTable, TableStore, TranspositionTable};
pub use types::{Color, PieceKind, Score, Terminal, MATE_SCORE};
