#![forbid(unsafe_code)]
#![cfg_attr(feature = "strict", deny(warnings))]

mod assets;
mod config;
mod editor_main;
mod lobby_main;
mod roll_main;
mod tui;

use std::path::PathBuf;

use clap::{Command, arg};

use editor_main::EditorCommand;


fn main() -> anyhow::Result<()> {
    // Stderr, so that logging does not scribble over the lobby screen when redirected.
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let matches = Command::new("Agent Roulette")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about("Random agent and weapon assignment for a lobby of up to five players")
        .subcommand_required(true)
        .arg(
            arg!(-c --config <config_file> "Path to a yaml-serialized ConsoleConfig")
                .value_parser(clap::value_parser!(PathBuf))
                .global(true),
        )
        .subcommand(
            Command::new("lobby")
                .about("Interactive lobby: add players, roll, save")
                .arg(arg!(--"dealers-choice" "Start with Dealer's Choice enabled")),
        )
        .subcommand(
            Command::new("roll")
                .about("Roll all given players once and print the result")
                .arg(arg!(<player_names> ... "Lobby members, at most five"))
                .arg(arg!(-w --weapon <class> "Also roll this weapon class").action(clap::ArgAction::Append))
                .arg(arg!(--"dealers-choice" "Enable Dealer's Choice"))
                .arg(arg!(--animate "Wait through the spin like the lobby does"))
                .arg(arg!(--save "Write the results into the roster file")),
        )
        .subcommand(
            Command::new("editor")
                .about("Edit player agent pools")
                .subcommand_required(true)
                .subcommand(Command::new("list").about("Show every player's pool"))
                .subcommand(
                    Command::new("add")
                        .about("Add a player with the default pool from the schema file")
                        .arg(arg!(<player_name> "Player name")),
                )
                .subcommand(
                    Command::new("remove")
                        .about("Remove a player")
                        .arg(arg!(<player_name> "Player name")),
                )
                .subcommand(
                    Command::new("set")
                        .about("Enable or disable an agent in a player's pool")
                        .arg(arg!(<player_name> "Player name"))
                        .arg(arg!(<agent> "Agent"))
                        .arg(arg!(<state> "on or off").value_parser(["on", "off"])),
                ),
        )
        .get_matches();

    let mut console_config =
        config::read_config_file(matches.get_one::<PathBuf>("config").map(PathBuf::as_path))?;

    let get_string = |m: &clap::ArgMatches, id: &str| -> String {
        m.get_one::<String>(id).cloned().unwrap_or_default()
    };
    match matches.subcommand() {
        Some(("lobby", sub_matches)) => {
            console_config.dealers_choice |= sub_matches.get_flag("dealers-choice");
            lobby_main::run(console_config)
        }
        Some(("roll", sub_matches)) => {
            console_config.dealers_choice |= sub_matches.get_flag("dealers-choice");
            let strings = |id: &str| -> Vec<String> {
                sub_matches.get_many::<String>(id).map(|v| v.cloned().collect()).unwrap_or_default()
            };
            roll_main::run(console_config, roll_main::RollConfig {
                player_names: strings("player_names"),
                weapon_classes: strings("weapon"),
                animate: sub_matches.get_flag("animate"),
                save: sub_matches.get_flag("save"),
            })
        }
        Some(("editor", sub_matches)) => {
            let command = match sub_matches.subcommand() {
                Some(("list", _)) => EditorCommand::List,
                Some(("add", m)) => EditorCommand::Add { player_name: get_string(m, "player_name") },
                Some(("remove", m)) => {
                    EditorCommand::Remove { player_name: get_string(m, "player_name") }
                }
                Some(("set", m)) => EditorCommand::Set {
                    player_name: get_string(m, "player_name"),
                    agent: get_string(m, "agent"),
                    enabled: get_string(m, "state") == "on",
                },
                _ => unreachable!("subcommand_required prevents `None`"),
            };
            editor_main::run(console_config, command)
        }
        _ => unreachable!("Exhausted list of subcommands and subcommand_required prevents `None`"),
    }
}
