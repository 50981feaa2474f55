use console::Style;
use itertools::Itertools;

use agent_roulette::event::SpinTarget;
use agent_roulette::lobby::MAX_LOBBY_SIZE;
use agent_roulette::player::DEALER;
use agent_roulette::roulette::Roulette;
use agent_roulette::spin::SpinState;


const NAME_WIDTH: usize = 16;

fn on_off(flag: bool) -> String {
    if flag {
        Style::new().green().apply_to("on").to_string()
    } else {
        Style::new().dim().apply_to("off").to_string()
    }
}

fn render_value(value: Option<&str>, state: SpinState) -> String {
    let Some(value) = value else {
        return Style::new().dim().apply_to("?").to_string();
    };
    let style = match state {
        SpinState::Spinning => Style::new().yellow(),
        _ if value == DEALER => Style::new().magenta().bold(),
        _ => Style::new().cyan().bold(),
    };
    style.apply_to(value).to_string()
}

fn render_state(state: SpinState) -> String {
    match state {
        SpinState::Spinning => Style::new().yellow().apply_to(state).to_string(),
        SpinState::Settled | SpinState::Idle => String::new(),
    }
}

pub fn render_lobby(roulette: &Roulette) -> String {
    let mut lines = Vec::new();
    let rules = roulette.house_rules();
    lines.push(format!(
        "Lobby {}/{}    Dealer's Choice: {}    Optimal Comp: {}",
        roulette.lobby().len(),
        MAX_LOBBY_SIZE,
        on_off(rules.dealers_choice),
        on_off(rules.optimal_comp),
    ));
    lines.push(String::new());
    if roulette.lobby().is_empty() {
        lines.push(Style::new().dim().apply_to("  (empty; /add <name>)").to_string());
    }
    for member in roulette.lobby().members() {
        let state = roulette.spin_state(&SpinTarget::Player(member.name.clone()));
        lines.push(format!(
            "  {:<width$} {} {}",
            member.name,
            render_value(member.selected.as_deref(), state),
            render_state(state),
            width = NAME_WIDTH,
        ));
    }

    let classes = roulette.weapon_pool().classes().collect_vec();
    if !classes.is_empty() {
        lines.push(String::new());
        lines.push("Weapons".to_owned());
        for class in classes {
            let state = roulette.spin_state(&SpinTarget::WeaponSlot(class.clone()));
            let last = roulette.weapon_slots().last(class).map(String::as_str);
            lines.push(format!(
                "  {:<width$} {} {}",
                class,
                render_value(last, state),
                render_state(state),
                width = NAME_WIDTH,
            ));
        }
    }

    let idle_players = roulette
        .roster()
        .names()
        .filter(|name| !roulette.lobby().contains(name))
        .join(", ");
    lines.push(String::new());
    lines.push(Style::new().dim().apply_to(format!("Roster: {idle_players}")).to_string());
    lines.join("\n")
}

// Intermediate weapon picks are not stored in the session, so the TUI overlays them itself.
pub fn render_spinning_weapon(class: &str, value: &str) -> String {
    format!("{} {}", class, Style::new().yellow().apply_to(value))
}

pub const HELP: &str = concat!(
    "/add <name>  /remove <name>  /clear  /roll <name>  /rollall  /weapon <class>\n",
    "/dealer on|off  /optimal on|off  /save  /quit",
);
