#![cfg(feature = "std")]

use crate::{
    agent::{Agent, AgentState, GameOutcome},
    field::Field,
    player::Player,
};

/// Render a field with a title line.
pub fn render_field(title: &str, field: &Field) -> String {
    format!("{}  (fleet {:04b})\n{}", title, field.alive_fleet_bitmask(), field)
}

/// Print both fields of an agent, own field first.
pub fn print_fields<P: Player>(agent: &Agent<P>) {
    println!("\n{} | turn {}", agent.state(), agent.turn_counter());
    println!("{}", render_field("Own field", agent.own_field()));
    println!("{}", render_field("Opponent field", agent.opponent_field()));
}

/// Print the end-screen banner once the agent has reached it.
pub fn print_outcome<P: Player>(agent: &Agent<P>) {
    if agent.state() != AgentState::EndScreen {
        return;
    }
    let banner = agent
        .outcome()
        .map(GameOutcome::banner)
        .unwrap_or("GAME OVER");
    println!("\n==== {} ====", banner);
}
