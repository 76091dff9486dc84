use clap::Parser;
use crate::prelude::*;

#[derive(Clone, Debug, Parser)]
#[command(version, about = "Quoridor rules engine speaking a line-oriented text protocol")]
pub struct QTPServerOptions {
    #[arg(short, long)]
    pub log_level: Option<String>,

    #[arg(short, long, default_value_t = DEFAULT_COLS)]
    pub cols: usize,

    #[arg(short, long, default_value_t = DEFAULT_ROWS)]
    pub rows: usize,

    #[arg(short, long, default_value_t = MIN_PLAYERS)]
    pub players: usize,

    /// Fences shared out evenly between the players.
    #[arg(short, long, default_value_t = DEFAULT_TOTAL_FENCES)]
    pub fences: usize,
}

impl QTPServerOptions {
    pub fn board_config(&self) -> BoardConfig {
        BoardConfig {
            cols: self.cols,
            rows: self.rows,
            players: self.players,
            total_fences: self.fences,
        }
    }
}

impl Default for QTPServerOptions {
    fn default() -> Self {
        QTPServerOptions {
            log_level: None,
            cols: DEFAULT_COLS,
            rows: DEFAULT_ROWS,
            players: MIN_PLAYERS,
            fences: DEFAULT_TOTAL_FENCES,
        }
    }
}
