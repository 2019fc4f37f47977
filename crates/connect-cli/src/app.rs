//! Terminal driver: runs the phase machine and talks to the players.

use crate::cli::{Cli, DIMENSION_RANGE, WIN_LENGTH_RANGE};
use crate::prompt::Prompter;
use crate::render;
use anyhow::Context;
use connect_core::player::{parse_token, validate_name};
use connect_core::{
    max_players, BoardConfig, GameError, GameOutcome, GamePhase, GameSession, PhaseTrigger, Roster,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{BufRead, Write};
use tracing::{debug, info};

const DIVIDER: &str = "--------------------------------------";

/// One run of the game, from title screen to goodbye
pub struct App<R, W> {
    cli: Cli,
    prompter: Prompter<R, W>,
    /// Drives computer names and tokens during setup
    rng: StdRng,
    phase: GamePhase,
    session: Option<GameSession>,
}

impl<R: BufRead, W: Write> App<R, W> {
    pub fn new(cli: Cli, prompter: Prompter<R, W>) -> Self {
        let rng = match cli.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            cli,
            prompter,
            rng,
            phase: GamePhase::Start,
            session: None,
        }
    }

    /// Render and update each phase until the end screen has been shown
    pub fn run(&mut self) -> anyhow::Result<()> {
        while let Some(trigger) = self.update()? {
            self.phase = self.phase.advance(trigger)?;
        }
        Ok(())
    }

    /// Current phase of the game
    #[cfg(test)]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Run the current phase. Returns `None` once the end screen is shown.
    fn update(&mut self) -> anyhow::Result<Option<PhaseTrigger>> {
        let trigger = match self.phase {
            GamePhase::Start => {
                for line in render::TITLE {
                    self.prompter.narrate(line)?;
                }
                PhaseTrigger::Begin
            }
            GamePhase::Setup => {
                let session = self.setup()?;
                self.session = Some(session);
                PhaseTrigger::Registered
            }
            GamePhase::Play => PhaseTrigger::Moved(self.play_turn()?),
            GamePhase::Win { .. } => {
                for line in render::WIN_BANNER {
                    self.prompter.say(line)?;
                }
                PhaseTrigger::Acknowledge
            }
            GamePhase::Draw => {
                for line in render::DRAW_BANNER {
                    self.prompter.say(line)?;
                }
                PhaseTrigger::Acknowledge
            }
            GamePhase::End => {
                self.finish()?;
                return Ok(None);
            }
        };
        Ok(Some(trigger))
    }

    fn finish(&mut self) -> anyhow::Result<()> {
        for line in render::GOODBYE {
            self.prompter.say(line)?;
        }

        if self.cli.summary_json {
            if let Some(session) = &self.session {
                let json = serde_json::to_string_pretty(&session.snapshot())
                    .context("failed to serialize final game state")?;
                self.prompter.say(&json)?;
            }
        }
        Ok(())
    }

    fn setup(&mut self) -> anyhow::Result<GameSession> {
        self.prompter.say("Game Setup:")?;
        self.prompter.say(DIVIDER)?;
        self.prompter.narrate("Let's set up the game board...")?;
        self.prompter.say(DIVIDER)?;

        let width = self.board_dimension(self.cli.width, "How many columns wide (5-9)? ")?;
        let height = self.board_dimension(self.cli.height, "How many rows high (5-9)? ")?;
        let win_length = match self.cli.win_length {
            Some(n) => n as usize,
            None => self.prompter.number(
                "How many tokens in a row are needed to win (3-5)? ",
                *WIN_LENGTH_RANGE.start(),
                *WIN_LENGTH_RANGE.end(),
                "Please enter a number between 3 and 5",
            )?,
        };
        let config = BoardConfig::new(width, height, win_length);
        config.validate()?;

        self.prompter.narrate("The game board has been assembled")?;
        self.prompter.narrate("Now let's set up the players...")?;
        self.prompter.say(DIVIDER)?;

        let max = max_players(width, height);
        self.prompter
            .narrate(&format!("For your board size ({}x{}),", width, height))?;
        self.prompter.narrate(&format!(
            "there can be up to {} players, human or computer",
            max
        ))?;

        let mut roster = Roster::for_board(width, height);
        let (humans, computers) = self.player_counts(&roster, max)?;
        self.prompter.say(&format!(
            "Preparing to register {} human players and {} computer players.",
            humans, computers
        ))?;

        for n in 1..=humans {
            self.register_human(&mut roster, n)?;
        }

        if computers > 0 {
            self.prompter
                .narrate("You will be joined by the following computer players:")?;
            for _ in 0..computers {
                let player = roster.add_computer(&mut self.rng)?;
                let line = format!(
                    "  {}, whose token will be the letter {}",
                    player.name, player.token
                );
                self.prompter.narrate(&line)?;
            }
        }

        self.prompter.say(DIVIDER)?;
        self.prompter.say("We are now ready! Let's play...")?;
        self.prompter.narrate(DIVIDER)?;

        let players = roster.into_players();
        info!(humans, computers, "players registered");
        let session = match self.cli.seed {
            Some(seed) => GameSession::with_seed(config, players, seed)?,
            None => GameSession::new(config, players)?,
        };
        Ok(session)
    }

    fn board_dimension(&mut self, flag: Option<u8>, question: &str) -> anyhow::Result<usize> {
        match flag {
            Some(n) => Ok(n as usize),
            None => Ok(self.prompter.number(
                question,
                *DIMENSION_RANGE.start(),
                *DIMENSION_RANGE.end(),
                "Please enter a number between 5 and 9",
            )?),
        }
    }

    /// Ask for the human/computer split until it fits the board.
    /// Counts given on the command line are not re-asked; a bad split is fatal.
    fn player_counts(&mut self, roster: &Roster, max: usize) -> anyhow::Result<(usize, usize)> {
        let flagged = self.cli.humans.unwrap_or(0) + self.cli.computers.unwrap_or(0);
        if flagged > max {
            return Err(GameError::TooManyPlayers { max }.into());
        }

        loop {
            let humans = match self.cli.humans {
                Some(n) => n,
                None => self.prompter.number(
                    "How many human players? ",
                    1,
                    max,
                    "That is not a valid entry -- please try again",
                )?,
            };
            let computers = match self.cli.computers {
                Some(n) => n,
                None => self.prompter.number(
                    "How many computer players? ",
                    0,
                    max,
                    "That is not a valid entry -- please try again",
                )?,
            };

            match roster.check_counts(humans, computers) {
                Ok(()) => return Ok((humans, computers)),
                Err(err) if self.cli.humans.is_some() && self.cli.computers.is_some() => {
                    return Err(err.into())
                }
                Err(GameError::TooManyPlayers { max }) => self.prompter.complain(&format!(
                    "{} human players + {} computer players is too many! There can only be up to {} total players",
                    humans, computers, max
                ))?,
                Err(_) => self.prompter.complain(&format!(
                    "{} human players + {} computer players is too few! There must be at least 2 total players",
                    humans, computers
                ))?,
            }
        }
    }

    fn register_human(&mut self, roster: &mut Roster, n: usize) -> anyhow::Result<()> {
        let title = format!("Player {}", n);

        let name = loop {
            let answer = self
                .prompter
                .ask(&format!("{}, please enter your name: ", title))?;
            match validate_name(&answer) {
                Ok(name) => break name.to_string(),
                Err(_) => self
                    .prompter
                    .complain("Please enter a name that contains only letters and spaces")?,
            }
        };

        let token = loop {
            let answer = self
                .prompter
                .ask(&format!("{}, please select a letter as your token: ", title))?;
            match parse_token(&answer) {
                Ok(token) if roster.is_token_taken(token) => self
                    .prompter
                    .complain("That token has already been selected by another player")?,
                Ok(token) => break token,
                Err(_) => self
                    .prompter
                    .complain("Your entry was either not a letter or was longer than 1 letter")?,
            }
        };

        let player = roster.add_human(&name, &token.to_string())?;
        let line = format!("Great, {}! Your token is the letter {}", player.name, player.token);
        self.prompter.say(&line)?;
        Ok(())
    }

    fn play_turn(&mut self) -> anyhow::Result<GameOutcome> {
        let session = self
            .session
            .as_mut()
            .context("play started before setup finished")?;
        let player = session.current_player().clone();

        self.prompter.say(&format!(
            "It is now {}'s turn ({})",
            player.name, player.token
        ))?;
        self.prompter
            .say(&render::board(session.grid(), session.players()))?;

        let outcome = if player.is_computer() {
            session.play_computer_turn()?
        } else {
            let width = session.grid().width();
            let column = loop {
                let column = self.prompter.number(
                    "Select a column to drop your token: ",
                    1,
                    width,
                    &format!("Please choose a column between 1 and {}", width),
                )?;
                if session.grid().is_column_full(column - 1) {
                    self.prompter.say(&format!(
                        "Column {} is full. Please choose another column",
                        column
                    ))?;
                    continue;
                }
                break column - 1;
            };
            session.submit_move(column)?
        };
        debug!(player = player.id, ?outcome, "turn resolved");

        if let Some(placed) = session.last_move().filter(|_| outcome.placed_token()) {
            self.prompter.narrate(&format!(
                "{} dropped their token ({}) in column {}",
                player.name,
                player.token,
                placed.column + 1
            ))?;
        }

        match outcome {
            GameOutcome::Win {
                axis, run_length, ..
            } => {
                self.prompter.say(&format!(
                    "There are {} tokens in a {} row!",
                    run_length,
                    axis.name()
                ))?;
                self.prompter
                    .say(&format!("{} wins! Well done", player.name))?;
                self.prompter
                    .say(&render::board(session.grid(), session.players()))?;
            }
            GameOutcome::Draw => {
                self.prompter
                    .say(&render::board(session.grid(), session.players()))?;
            }
            GameOutcome::Ongoing | GameOutcome::ColumnFull => {}
        }

        Ok(outcome)
    }
}
