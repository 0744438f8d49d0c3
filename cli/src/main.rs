mod command;
mod options;
mod render;

use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use sapper_core::{ScoringBridge, Session};
use sapper_scores::{FileScoringBridge, ScoreFile};

use command::{Command, HELP};
use options::Options;
use render::{Screen, status_line};

/// Turns wall-clock time into whole-second ticks.
struct TickClock {
    last: Instant,
}

impl TickClock {
    fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds elapsed since the previous call, keeping the leftover fraction.
    fn due(&mut self) -> u64 {
        let secs = self.last.elapsed().as_secs();
        self.last += Duration::from_secs(secs);
        secs
    }
}

fn draw(screen: &mut Screen, session: &mut Session) {
    let redrawn = screen.update(session);
    debug!("Redrew {} tiles", redrawn);
    println!("{}", screen.render());
    println!("{}", status_line(session));
}

fn print_best(bridge: &FileScoringBridge, session: &Session, user: &str) {
    let difficulty = session.difficulty();
    match bridge.best_time(difficulty, user) {
        Some(ticks) => println!("your best on {difficulty}: {ticks:03}"),
        None => println!("no best time on {difficulty} yet"),
    }
    for (place, (name, best)) in bridge.leaderboard().top(difficulty, 3).iter().enumerate() {
        println!(
            "  {}. {:03} {} ({})",
            place + 1,
            best.ticks,
            name,
            best.achieved_at.format("%Y-%m-%d")
        );
    }
}

fn main() -> anyhow::Result<()> {
    let options = Options::parse();
    env_logger::Builder::new()
        .filter_level(options.verbosity.log_level_filter())
        .init();

    let difficulty = options.difficulty().context("Invalid board size")?;
    let mut session = Session::new(difficulty, options.session_options())?;
    let mut bridge = FileScoringBridge::open(ScoreFile::new(&options.scores))
        .with_context(|| format!("Cannot read scores from {:?}", options.scores))?;
    info!("Playing {} as {}", difficulty, options.user);

    let mut screen = Screen::new(session.board().dim());
    let mut clock = TickClock::new();
    println!("{HELP}");
    draw(&mut screen, &mut session);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line?;
        for _ in 0..clock.due() {
            session.tick();
        }
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(error) => {
                println!("{error:#}");
                continue;
            }
        };
        debug!("Command {:?}", command);
        let was_finished = session.is_finished();

        let moved = match command {
            Command::Reveal(coords) => session.reveal(coords).map(|outcome| outcome.has_update()),
            Command::Flag(coords) => session.toggle_flag(coords).map(|outcome| outcome.has_update()),
            Command::NewGame(seed) => session.new_game(seed.or(options.seed)).map(|()| true),
            Command::SetDifficulty(difficulty) => {
                session.set_difficulty(difficulty).map(|()| true)
            }
            Command::Best => {
                print_best(&bridge, &session, &options.user);
                continue;
            }
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        };
        match moved {
            Ok(true) => {}
            Ok(false) => {
                println!("nothing to do there");
                continue;
            }
            Err(error) => {
                println!("{error}");
                continue;
            }
        }

        draw(&mut screen, &mut session);
        if !was_finished && session.is_finished() {
            session.report(&mut bridge, &options.user);
            print_best(&bridge, &session, &options.user);
        }
        io::stdout().flush()?;
    }

    Ok(())
}
