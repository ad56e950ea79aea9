//! Message templates for player notifications.
//!
//! Candidate lists are numbered by player ID, and ballots reply with that
//! same number, so the prompt and the parser agree on what an integer
//! means.

use crate::core::{Player, Role};

/// Game-start announcement, sent to everyone.
#[must_use]
pub fn game_start() -> &'static str {
    "The Traitors begins! Your role arrives in a private message."
}

/// Private role message for a traitor, naming the co-traitors.
#[must_use]
pub fn role_traitor(other_traitors: &[&str]) -> String {
    let others = if other_traitors.is_empty() {
        "You are the only traitor.".to_string()
    } else {
        format!("Your fellow traitors: {}", other_traitors.join(", "))
    };
    format!(
        "You are a TRAITOR. Eliminate the faithful before they find you.\n\n{others}"
    )
}

/// Private role message for a faithful player.
#[must_use]
pub fn role_faithful() -> &'static str {
    "You are FAITHFUL. Unmask the traitors before they eliminate you."
}

/// Night has fallen; sent to each living traitor.
#[must_use]
pub fn night_begins() -> &'static str {
    "Night falls. The traitors gather."
}

/// Night vote prompt listing the eligible victims.
#[must_use]
pub fn night_vote_prompt(candidates: &[&Player]) -> String {
    format!(
        "Traitors, choose a player to eliminate:\n\n{}\n\nReply with the player's number.",
        candidate_list(candidates)
    )
}

/// Night revote prompt, restricted to the tied candidates.
#[must_use]
pub fn night_revote_prompt(candidates: &[&Player]) -> String {
    format!(
        "REVOTE! You must agree this time (last chance).\n\nChoose:\n\n{}\n\nReply with the player's number.",
        candidate_list(candidates)
    )
}

/// Morning announcement of a night elimination.
#[must_use]
pub fn morning_result(victim: &str) -> String {
    format!("Dawn breaks. During the night, {victim} was eliminated.")
}

/// Morning announcement when nobody was eliminated.
#[must_use]
pub fn morning_result_none() -> &'static str {
    "Dawn breaks. The night passed quietly; nobody was eliminated."
}

/// Day discussion opener, sent to living players.
#[must_use]
pub fn day_discussion() -> &'static str {
    "The day's discussion begins. Talk it over, then vote."
}

/// Day vote prompt listing all living players.
#[must_use]
pub fn day_vote_prompt(candidates: &[&Player]) -> String {
    format!(
        "Vote! Choose a player to exile:\n\n{}\n\nReply with the player's number.",
        candidate_list(candidates)
    )
}

/// Day revote prompt, sent to players who are eligible to vote again.
#[must_use]
pub fn day_revote_prompt(candidates: &[&Player]) -> String {
    let names: Vec<&str> = candidates.iter().map(|p| p.name.as_str()).collect();
    format!(
        "REVOTE! Tie between: {}\n\nOnly players not in the tie may vote.\n\nChoose:\n\n{}\n\nReply with the player's number.",
        names.join(", "),
        candidate_list(candidates)
    )
}

/// Day revote notice for the tied candidates themselves, who may not vote.
#[must_use]
pub fn day_revote_announcement(tied_names: &[&str]) -> String {
    format!(
        "Tie! A revote is underway between: {}\n\nOnly players not in the tie may vote.",
        tied_names.join(", ")
    )
}

/// Day result announcing an exile. Reveals the exiled player's role.
#[must_use]
pub fn day_result(exiled: &str, role: Role) -> String {
    let role = match role {
        Role::Traitor => "a TRAITOR",
        _ => "FAITHFUL",
    };
    format!("The vote is in: {exiled} has been exiled. They were {role}.")
}

/// Day result when the vote resolved to no exile.
#[must_use]
pub fn day_result_tie() -> &'static str {
    "The vote ended in a stalemate. Nobody is exiled."
}

/// Final announcement: traitors win.
#[must_use]
pub fn traitors_win() -> &'static str {
    "THE TRAITORS HAVE WON!"
}

/// Final announcement: faithful win.
#[must_use]
pub fn faithful_win() -> &'static str {
    "THE FAITHFUL HAVE WON!"
}

fn candidate_list(candidates: &[&Player]) -> String {
    candidates
        .iter()
        .map(|p| format!("{}. {}", p.id.raw(), p.name))
        .collect::<Vec<_>>()
        .join("\n")
}
