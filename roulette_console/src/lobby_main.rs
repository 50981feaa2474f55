use std::collections::HashMap;
use std::fmt;
use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use async_std::channel;
use crossterm::style::{self, Stylize};
use crossterm::{cursor, event as term_event, execute, terminal};
use itertools::Itertools;
use log::info;
use scopeguard::defer;

use agent_roulette::event::{RouletteEvent, SpinTarget};
use agent_roulette::roulette::{lock, SharedRoulette};
use agent_roulette::{spin, storage};

use crate::assets;
use crate::config::ConsoleConfig;
use crate::tui;


#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Command {
    Add(String),
    Remove(String),
    Clear,
    Roll(String),
    RollAll,
    Weapon(String),
    DealersChoice(bool),
    OptimalComp(bool),
    Save,
    Quit,
}

enum IncomingEvent {
    Roulette(RouletteEvent),
    Terminal(term_event::Event),
    Tick,
}

fn parse_flag(arg: &str) -> Result<bool, String> {
    match arg {
        "on" => Ok(true),
        "off" => Ok(false),
        _ => Err(format!("Expected 'on' or 'off', got '{arg}'")),
    }
}

// Names may contain spaces, so everything after the command word is the argument.
pub fn parse_command(input: &str) -> Result<Command, String> {
    let Some(cmd) = input.trim().strip_prefix('/') else {
        return Err(format!("Commands start with '/': {}", tui::HELP));
    };
    let (word, arg) = match cmd.split_once(' ') {
        Some((word, arg)) => (word, arg.trim()),
        None => (cmd, ""),
    };
    let needs_arg = |make: fn(String) -> Command| {
        if arg.is_empty() {
            Err(format!("'/{word}' needs an argument"))
        } else {
            Ok(make(arg.to_owned()))
        }
    };
    match word {
        "add" => needs_arg(Command::Add),
        "remove" => needs_arg(Command::Remove),
        "clear" => Ok(Command::Clear),
        "roll" => needs_arg(Command::Roll),
        "rollall" => Ok(Command::RollAll),
        "weapon" => needs_arg(Command::Weapon),
        "dealer" => parse_flag(arg).map(Command::DealersChoice),
        "optimal" => parse_flag(arg).map(Command::OptimalComp),
        "save" => Ok(Command::Save),
        "quit" => Ok(Command::Quit),
        _ => Err(format!("Unknown command: '{cmd}'")),
    }
}

struct Session {
    shared: SharedRoulette,
    events_tx: channel::Sender<RouletteEvent>,
    config: ConsoleConfig,
    // Weapon slots only store settled results; show the wheel while it turns.
    spinning_weapons: HashMap<String, String>,
}

impl Session {
    // Returns a message for the status line, if any.
    fn execute(&mut self, command: Command) -> Result<Option<String>, String> {
        match command {
            Command::Add(name) => {
                let mut roulette = lock(&self.shared);
                if !roulette.roster().contains(&name) {
                    return Err(format!("No player '{name}' in the roster"));
                }
                if !roulette.add_player_to_lobby(&name) {
                    return Err(format!("Cannot add '{name}': lobby is full or already has them"));
                }
            }
            Command::Remove(name) => {
                lock(&self.shared).remove_player_from_lobby(&name);
            }
            Command::Clear => {
                lock(&self.shared).clear_lobby();
                self.spinning_weapons.clear();
            }
            Command::Roll(name) => {
                spin::roll_player(&self.shared, &name, false, self.events_tx.clone())
                    .map_err(|err| err.to_string())?;
            }
            Command::RollAll => {
                let errors = spin::roll_all(&self.shared, self.events_tx.clone())
                    .into_iter()
                    .filter_map(|(_, spin)| spin.err())
                    .map(|err| err.to_string())
                    .collect_vec();
                if !errors.is_empty() {
                    return Err(errors.join("; "));
                }
            }
            Command::Weapon(class) => {
                spin::roll_weapon(&self.shared, &class, false, self.events_tx.clone())
                    .map_err(|err| err.to_string())?;
            }
            Command::DealersChoice(enabled) => {
                lock(&self.shared).set_dealers_choice(enabled);
            }
            Command::OptimalComp(enabled) => {
                lock(&self.shared).set_optimal_comp(enabled);
                return Ok(Some("Optimal comp is not implemented yet".to_owned()));
            }
            Command::Save => {
                let roulette = lock(&self.shared);
                storage::save_roster(roulette.roster(), &self.config.roster_path)
                    .map_err(|err| err.to_string())?;
                return Ok(Some(format!("Saved to {}", self.config.roster_path.display())));
            }
            Command::Quit => unreachable!("handled by the event loop"),
        }
        Ok(None)
    }
}

fn writeln_raw(stdout: &mut io::Stdout, v: impl fmt::Display) -> io::Result<()> {
    let s = v.to_string();
    // Note. Not using `lines()` because it removes trailing new line.
    for line in s.split('\n') {
        execute!(stdout, style::Print(line), cursor::MoveToNextLine(1), cursor::Hide)?;
    }
    Ok(())
}

fn render(
    stdout: &mut io::Stdout, session: &Session, keyboard_input: &str, status: &Option<String>,
    command_error: &Option<String>,
) -> io::Result<()> {
    execute!(stdout, cursor::MoveTo(0, 0), terminal::Clear(terminal::ClearType::All))?;
    writeln_raw(stdout, tui::render_lobby(&lock(&session.shared)))?;
    for (class, value) in session.spinning_weapons.iter().sorted() {
        writeln_raw(stdout, format!("  {}", tui::render_spinning_weapon(class, value)))?;
    }
    writeln_raw(stdout, "")?;
    writeln_raw(stdout, tui::HELP.with(style::Color::DarkGrey))?;
    writeln_raw(stdout, format!("> {}▂", keyboard_input))?;
    if let Some(msg) = status {
        writeln_raw(stdout, msg.clone().with(style::Color::Green))?;
    }
    if let Some(err) = command_error {
        writeln_raw(stdout, err.clone().with(style::Color::Red))?;
    }
    Ok(())
}

pub fn run(config: ConsoleConfig) -> anyhow::Result<()> {
    let shared = assets::load_roulette(&config)?.into_shared();
    let (events_tx, events_rx) = channel::unbounded();
    let mut session = Session {
        shared,
        events_tx,
        config,
        spinning_weapons: HashMap::new(),
    };

    let mut stdout = io::stdout();
    terminal::enable_raw_mode().context("Cannot switch terminal to raw mode")?;
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;
    defer! {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(io::stdout(), terminal::LeaveAlternateScreen, cursor::Show);
    };

    let (tx, rx) = mpsc::channel();
    let tx_roulette = tx.clone();
    let tx_local = tx.clone();
    let tx_tick = tx;
    thread::spawn(move || {
        while let Ok(ev) = async_std::task::block_on(events_rx.recv()) {
            if tx_roulette.send(IncomingEvent::Roulette(ev)).is_err() {
                break;
            }
        }
    });
    thread::spawn(move || {
        while let Ok(ev) = term_event::read() {
            if tx_local.send(IncomingEvent::Terminal(ev)).is_err() {
                break;
            }
        }
    });
    thread::spawn(move || {
        loop {
            thread::sleep(Duration::from_millis(100));
            if tx_tick.send(IncomingEvent::Tick).is_err() {
                break;
            }
        }
    });

    let mut keyboard_input = String::new();
    let mut status = None;
    let mut command_error = None;
    render(&mut stdout, &session, &keyboard_input, &status, &command_error)?;
    for event in rx {
        match event {
            IncomingEvent::Roulette(event) => match event {
                RouletteEvent::IconChanged { target: SpinTarget::WeaponSlot(class), value } => {
                    session.spinning_weapons.insert(class, value);
                }
                RouletteEvent::IconChanged { target: SpinTarget::Player(_), .. } => {
                    // Lobby already holds the intermediate value.
                }
                RouletteEvent::SoundCue => {
                    execute!(stdout, style::Print('\x07'))?;
                }
                RouletteEvent::SpinFinished { target } => {
                    if let SpinTarget::WeaponSlot(class) = &target {
                        session.spinning_weapons.remove(class);
                    }
                    info!("{} finished", target);
                }
            },
            IncomingEvent::Terminal(event) => {
                if let term_event::Event::Key(event) = event {
                    if event.kind != term_event::KeyEventKind::Press {
                        continue;
                    }
                    match event.code {
                        term_event::KeyCode::Char(ch) => {
                            keyboard_input.push(ch);
                        }
                        term_event::KeyCode::Backspace => {
                            keyboard_input.pop();
                        }
                        term_event::KeyCode::Esc => {
                            keyboard_input.clear();
                        }
                        term_event::KeyCode::Enter => {
                            status = None;
                            command_error = None;
                            match parse_command(&keyboard_input) {
                                Ok(Command::Quit) => return Ok(()),
                                Ok(command) => match session.execute(command) {
                                    Ok(msg) => status = msg,
                                    Err(err) => command_error = Some(err),
                                },
                                Err(err) => command_error = Some(err),
                            }
                            keyboard_input.clear();
                        }
                        _ => {}
                    }
                }
            }
            IncomingEvent::Tick => {
                // Any event triggers repaint, so no additional action is required.
            }
        }
        render(&mut stdout, &session, &keyboard_input, &status, &command_error)?;
    }
    Ok(())
}
