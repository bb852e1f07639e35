use std::io::{self, Write};

use crate::search::SearchStats;
use crate::types::Score;

pub fn print_ready<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "readyok")
}

pub fn print_bestmove<W: Write>(out: &mut W, best_move: Option<&str>) -> io::Result<()> {
    match best_move {
        Some(uci_move) => writeln!(out, "bestmove {uci_move}"),
        None => writeln!(out, "bestmove 0000"),
    }
}

/// Search summary; `score` is from the side to move's point of view.
pub fn print_search_info<W: Write>(
    out: &mut W,
    depth: u32,
    score: Score,
    stats: &SearchStats,
) -> io::Result<()> {
    let centipawns = (score * 100.0).round() as i64;
    writeln!(
        out,
        "info depth {} score cp {} nodes {} string tablehits {}",
        depth, centipawns, stats.nodes, stats.table_hits
    )
}
