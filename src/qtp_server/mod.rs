mod options;

use std::io::{BufRead, Write};

use itertools::Itertools;
pub use options::QTPServerOptions;

use crate::prelude::*;

/// Serves the Quoridor text protocol: one command per line, each answer closed by `ok`, and
/// refused commands answered with `err` and a message before the `ok`.
pub struct QTPServer<W: Write> {
    game: Option<Game>,
    past_games: Vec<Game>,
    config: QTPServerOptions,
    out: W,
}

impl QTPServer<std::io::Stdout> {
    /// Produces a server answering on stdout.
    pub fn new(options: QTPServerOptions) -> QTPServer<std::io::Stdout> {
        QTPServer::with_output(options, std::io::stdout())
    }
}

impl<W: Write> QTPServer<W> {
    pub fn with_output(options: QTPServerOptions, out: W) -> QTPServer<W> {
        QTPServer {
            game: None,
            past_games: vec![],
            config: options,
            out,
        }
    }

    /// Answers commands until `quit` or the end of input.
    pub fn run(&mut self, input: impl BufRead) -> Result<()> {
        for line in input.lines() {
            let cmdstr = line?;
            let args: Vec<&str> = cmdstr.split_whitespace().collect();
            let cmd = *args.first().unwrap_or(&"");

            if cmd == "quit" {
                return self.ok();
            }
            self.apply(cmd, &args[1..])?;
        }
        Ok(())
    }

    /// Runs a command. Only a failure to write the answer is fatal.
    fn apply(&mut self, cmd: &str, args: &[&str]) -> Result<()> {
        let result = match cmd {
            | ""            => Ok(()),
            | "impact"      => self.impact(args),
            | "info"        => self.info(),
            | "newgame"     => self.new_game(args),
            | "path"        => self.path(args),
            | "play"        => self.play(args),
            | "status"      => self.status(),
            | "undo"        => self.undo(),
            | "validfences" => self.valid_fences(),
            | "validmoves"  => self.valid_moves(),
            | _             => Err(anyhow!("unrecognized command {cmd}")),
        };

        match result {
            Ok(_) => {
                log::debug!("command completed successfully: {cmd} {}", args.join(" "));
                self.ok()
            },
            Err(err) => {
                log::warn!("encountered recoverable error:\n{err:#}");
                self.err(&err)
            },
        }
    }

    /// Starts a game, from the server options or from `cols rows players fences`.
    fn new_game(&mut self, args: &[&str]) -> Result<()> {
        let config = match args {
            [] => self.config.board_config(),
            [cols, rows, players, fences] => BoardConfig {
                cols: cols.parse().context("cols")?,
                rows: rows.parse().context("rows")?,
                players: players.parse().context("players")?,
                total_fences: fences.parse().context("fences")?,
            },
            _ => bail!("expected no arguments or cols rows players fences"),
        };

        self.game = Some(Game::new(config)?);
        self.past_games = vec![];
        self.status()
    }

    fn play(&mut self, args: &[&str]) -> Result<()> {
        let [notation] = args else {
            bail!("expected a single action");
        };
        let action = notation.parse::<Action>()?;

        let game = self.ensure_started()?;
        let before = game.clone();
        if game.outcome().is_over() {
            game.new_round();
        }
        if let Err(err) = game.play(action) {
            *game = before;
            return Err(err);
        }
        self.past_games.push(before);
        self.status()
    }

    fn undo(&mut self) -> Result<()> {
        self.ensure_started()?;
        let Some(previous) = self.past_games.pop() else {
            bail!("nothing to undo");
        };
        self.game = Some(previous);
        self.status()
    }

    fn valid_moves(&mut self) -> Result<()> {
        let game = self.ensure_started()?;
        let moves = game.legal_actions().into_iter()
            .filter(|a| matches!(a, Action::Move(_)))
            .collect::<Vec<_>>();

        writeln!(self.out, "{}", moves.len())?;
        writeln!(self.out, "{}", moves.iter().map(|a| a.notate()).join("; "))?;
        Ok(())
    }

    fn valid_fences(&mut self) -> Result<()> {
        let game = self.ensure_started()?;
        let fences = game.legal_actions().into_iter()
            .filter(|a| matches!(a, Action::Fence(_)))
            .collect::<Vec<_>>();

        writeln!(self.out, "{}", fences.len())?;
        writeln!(self.out, "{}", fences.iter().map(|a| a.notate()).join("; "))?;
        Ok(())
    }

    /// Prints the length and cells of a seat's shortest path, the player to move by default.
    fn path(&mut self, args: &[&str]) -> Result<()> {
        let game = self.ensure_started()?;
        let seat = match args {
            []     => game.to_move(),
            [seat] => seat.parse::<Seat>()?,
            _      => bail!("expected at most one seat"),
        };
        if !game.board().players().iter().any(|p| p.seat == seat) {
            bail!("seat {seat} is empty");
        }

        let path = game.board().path_for(seat);
        match path {
            Some(path) => {
                writeln!(self.out, "{}", path.len())?;
                writeln!(self.out, "{}", path.notate())?;
            },
            None => writeln!(self.out, "none")?,
        }
        Ok(())
    }

    fn impact(&mut self, args: &[&str]) -> Result<()> {
        let [notation] = args else {
            bail!("expected a single fence");
        };
        let fence = notation.parse::<Fence>()?;

        let game = self.ensure_started()?;
        let impact = game.board_mut().fence_impact(&fence)?;
        writeln!(self.out, "{}", impact.iter().map(|(seat, delta)| format!("{seat}:{delta:+}")).join(" "))?;
        Ok(())
    }

    /// Prints the round, whose turn it is, and one line per seat: pawn, fences left, score.
    fn status(&mut self) -> Result<()> {
        let game = self.ensure_started()?;
        let state = match game.outcome() {
            Outcome::InProgress     => format!("{} to move", game.to_move()),
            Outcome::Won(seat)      => format!("{seat} won"),
            Outcome::Resigned(seat) => format!("{seat} resigned"),
        };
        let mut lines = vec![format!("round {}; {state}", game.round())];
        for player in game.board().players() {
            let score = game.scores().get(&player.seat).copied().unwrap_or(0);
            lines.push(format!("{} {} {} {score}", player.seat, player.pawn.notate(), player.fences));
        }

        writeln!(self.out, "{}", lines.join("\n"))?;
        Ok(())
    }

    // accessors

    fn ensure_started(&mut self) -> Result<&mut Game> {
        self.game.as_mut().ok_or_else(|| anyhow!("no game in progress"))
    }

    // basic printers

    /// Prints the server's ID.
    fn info(&mut self) -> Result<()> {
        writeln!(self.out, "id {} v{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))?;
        Ok(())
    }

    /// Prints an error to the QTP stream.
    fn err(&mut self, err: &Error) -> Result<()> {
        writeln!(self.out, "err\n{err:#}")?;
        self.ok()
    }

    /// Prints the ok footer to the QTP stream.
    fn ok(&mut self) -> Result<()> {
        writeln!(self.out, "ok")?;
        self.out.flush()?;
        Ok(())
    }
}
