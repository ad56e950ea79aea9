//! Phase advancement.
//!
//! One `advance` call performs exactly one transition of the per-round
//! state machine:
//!
//! ```text
//! Init -> NightTraitorChat -> NightVote -> [NightRevote] -> MorningResult
//!      -> DayDiscussion -> DayVote -> [DayRevote] -> DayResult
//!      -> (next round at NightTraitorChat, or GameOver)
//! ```
//!
//! Leaving a voting phase resolves its tally. A tie routes to the matching
//! revote phase once; a tie that survives the revote, or a vote nobody
//! cast, resolves to "no elimination". The win condition is evaluated when
//! the round closes at `DayResult`.

use tracing::info;

use crate::core::{Phase, PlayerId, Role, Winner};
use crate::error::GameError;
use crate::events::EventKind;
use crate::notify::{messages, Notifier};
use crate::votes::{Candidates, TallyOutcome};

use super::game::Game;
use super::win;

/// What one [`Game::advance`] call did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepReport {
    /// The phase the game is now in.
    pub phase: Phase,

    /// The player eliminated by this step, if any.
    pub eliminated: Option<PlayerId>,

    /// The winner, set only when this step ended the game.
    pub winner: Option<Winner>,
}

impl StepReport {
    fn at(phase: Phase) -> Self {
        Self {
            phase,
            eliminated: None,
            winner: None,
        }
    }
}

impl Game {
    /// Perform the next phase transition.
    ///
    /// Fails with [`GameError::NotStarted`] before `start` and with
    /// [`GameError::InvalidTransition`] once the game is over.
    pub fn advance(&mut self, notifier: &mut dyn Notifier) -> Result<StepReport, GameError> {
        if !self.state.started {
            return Err(GameError::NotStarted);
        }
        if self.state.finished {
            return Err(GameError::InvalidTransition);
        }

        let report = match self.state.phase {
            Phase::Init => Ok(self.open_night_chat(notifier)),
            Phase::NightTraitorChat => Ok(self.open_night_vote(notifier)),
            Phase::NightVote => self.resolve_night_vote(notifier),
            Phase::NightRevote => self.resolve_night_revote(notifier),
            Phase::MorningResult => Ok(self.open_day_discussion(notifier)),
            Phase::DayDiscussion => Ok(self.open_day_vote(notifier)),
            Phase::DayVote => self.resolve_day_vote(notifier),
            Phase::DayRevote => self.resolve_day_revote(notifier),
            Phase::DayResult => self.close_round(notifier),
            Phase::GameOver => Err(GameError::InvalidTransition),
        }?;

        info!(round = self.state.round, phase = %self.state.phase, "phase advanced");
        Ok(report)
    }

    fn open_night_chat(&mut self, notifier: &mut dyn Notifier) -> StepReport {
        self.state.set_phase(Phase::NightTraitorChat);

        for traitor in self.registry.by_role(Role::Traitor, true) {
            notifier.send(&traitor.email, messages::night_begins());
        }
        self.events.append(
            self.state.round,
            Phase::NightTraitorChat,
            EventKind::NightChat,
            "night falls, the traitors confer",
        );
        StepReport::at(Phase::NightTraitorChat)
    }

    // Opens even when no eligible targets remain; the vote then resolves
    // as a quiet night.
    fn open_night_vote(&mut self, notifier: &mut dyn Notifier) -> StepReport {
        self.state.set_phase(Phase::NightVote);

        let candidates: Vec<_> = self
            .registry
            .alive()
            .filter(|p| p.role != Role::Traitor)
            .collect();
        let prompt = messages::night_vote_prompt(&candidates);
        for traitor in self.registry.by_role(Role::Traitor, true) {
            notifier.send(&traitor.email, &prompt);
        }
        self.events.append(
            self.state.round,
            Phase::NightVote,
            EventKind::NightVoteOpened,
            "night vote opened",
        );
        StepReport::at(Phase::NightVote)
    }

    fn resolve_night_vote(
        &mut self,
        notifier: &mut dyn Notifier,
    ) -> Result<StepReport, GameError> {
        let tally = self.ledger.tally(self.state.round, Phase::NightVote);
        match TallyOutcome::resolve(&tally) {
            TallyOutcome::NoVotes => Ok(self.quiet_night(notifier)),
            TallyOutcome::Decided { target, .. } => self.night_elimination(target, notifier),
            TallyOutcome::Tied { candidates, .. } => {
                if self.registry.living_count(Role::Traitor) == 0 {
                    Ok(self.quiet_night(notifier))
                } else {
                    Ok(self.open_night_revote(&candidates, notifier))
                }
            }
        }
    }

    fn open_night_revote(
        &mut self,
        candidates: &Candidates,
        notifier: &mut dyn Notifier,
    ) -> StepReport {
        self.state.set_phase(Phase::NightRevote);

        let tied: Vec<_> = candidates
            .iter()
            .filter_map(|id| self.registry.get(*id))
            .collect();
        let prompt = messages::night_revote_prompt(&tied);
        for traitor in self.registry.by_role(Role::Traitor, true) {
            notifier.send(&traitor.email, &prompt);
        }
        self.events.append(
            self.state.round,
            Phase::NightRevote,
            EventKind::NightRevoteOpened,
            format!("night vote tied between {} candidates, revote opened", tied.len()),
        );
        StepReport::at(Phase::NightRevote)
    }

    fn resolve_night_revote(
        &mut self,
        notifier: &mut dyn Notifier,
    ) -> Result<StepReport, GameError> {
        let tally = self.ledger.tally(self.state.round, Phase::NightRevote);
        match TallyOutcome::resolve(&tally) {
            TallyOutcome::Decided { target, .. } => self.night_elimination(target, notifier),
            // A second tie, or no revote ballots at all, gives up
            TallyOutcome::NoVotes | TallyOutcome::Tied { .. } => Ok(self.quiet_night(notifier)),
        }
    }

    fn night_elimination(
        &mut self,
        target: PlayerId,
        notifier: &mut dyn Notifier,
    ) -> Result<StepReport, GameError> {
        let name = self
            .registry
            .get(target)
            .map(|p| p.name.clone())
            .ok_or(GameError::NotFound(target))?;
        self.registry.eliminate(target, self.state.round)?;

        self.state.set_phase(Phase::MorningResult);
        self.events.append(
            self.state.round,
            Phase::MorningResult,
            EventKind::NightElimination,
            format!("{name} was eliminated during the night"),
        );
        self.broadcast(notifier, &messages::morning_result(&name));

        Ok(StepReport {
            phase: Phase::MorningResult,
            eliminated: Some(target),
            winner: None,
        })
    }

    fn quiet_night(&mut self, notifier: &mut dyn Notifier) -> StepReport {
        self.state.set_phase(Phase::MorningResult);
        self.events.append(
            self.state.round,
            Phase::MorningResult,
            EventKind::QuietNight,
            "the night passed without an elimination",
        );
        self.broadcast(notifier, messages::morning_result_none());
        StepReport::at(Phase::MorningResult)
    }

    fn open_day_discussion(&mut self, notifier: &mut dyn Notifier) -> StepReport {
        self.state.set_phase(Phase::DayDiscussion);

        for player in self.registry.alive() {
            notifier.send(&player.email, messages::day_discussion());
        }
        self.events.append(
            self.state.round,
            Phase::DayDiscussion,
            EventKind::DayDiscussion,
            "day discussion opened",
        );
        StepReport::at(Phase::DayDiscussion)
    }

    fn open_day_vote(&mut self, notifier: &mut dyn Notifier) -> StepReport {
        self.state.set_phase(Phase::DayVote);

        let candidates: Vec<_> = self.registry.alive().collect();
        let prompt = messages::day_vote_prompt(&candidates);
        for player in self.registry.alive() {
            notifier.send(&player.email, &prompt);
        }
        self.events.append(
            self.state.round,
            Phase::DayVote,
            EventKind::DayVoteOpened,
            "day vote opened",
        );
        StepReport::at(Phase::DayVote)
    }

    fn resolve_day_vote(&mut self, notifier: &mut dyn Notifier) -> Result<StepReport, GameError> {
        let tally = self.ledger.tally(self.state.round, Phase::DayVote);
        match TallyOutcome::resolve(&tally) {
            TallyOutcome::NoVotes => Ok(self.no_exile(notifier)),
            TallyOutcome::Decided { target, .. } => self.day_elimination(target, notifier),
            TallyOutcome::Tied { candidates, .. } => {
                // A revote needs at least one living player outside the tie
                if candidates.len() >= self.registry.alive().count() {
                    Ok(self.no_exile(notifier))
                } else {
                    Ok(self.open_day_revote(&candidates, notifier))
                }
            }
        }
    }

    fn open_day_revote(
        &mut self,
        candidates: &Candidates,
        notifier: &mut dyn Notifier,
    ) -> StepReport {
        self.state.set_phase(Phase::DayRevote);

        let tied: Vec<_> = candidates
            .iter()
            .filter_map(|id| self.registry.get(*id))
            .collect();
        let tied_names: Vec<&str> = tied.iter().map(|p| p.name.as_str()).collect();
        let prompt = messages::day_revote_prompt(&tied);
        let notice = messages::day_revote_announcement(&tied_names);

        for player in self.registry.alive() {
            if candidates.contains(&player.id) {
                notifier.send(&player.email, &notice);
            } else {
                notifier.send(&player.email, &prompt);
            }
        }
        self.events.append(
            self.state.round,
            Phase::DayRevote,
            EventKind::DayRevoteOpened,
            format!("day vote tied between {}, revote opened", tied_names.join(", ")),
        );
        StepReport::at(Phase::DayRevote)
    }

    fn resolve_day_revote(
        &mut self,
        notifier: &mut dyn Notifier,
    ) -> Result<StepReport, GameError> {
        let tally = self.ledger.tally(self.state.round, Phase::DayRevote);
        match TallyOutcome::resolve(&tally) {
            TallyOutcome::Decided { target, .. } => self.day_elimination(target, notifier),
            // A second tie, or no revote ballots at all, gives up
            TallyOutcome::NoVotes | TallyOutcome::Tied { .. } => Ok(self.no_exile(notifier)),
        }
    }

    fn day_elimination(
        &mut self,
        target: PlayerId,
        notifier: &mut dyn Notifier,
    ) -> Result<StepReport, GameError> {
        let (name, role) = self
            .registry
            .get(target)
            .map(|p| (p.name.clone(), p.role))
            .ok_or(GameError::NotFound(target))?;
        self.registry.eliminate(target, self.state.round)?;

        self.state.set_phase(Phase::DayResult);
        self.events.append(
            self.state.round,
            Phase::DayResult,
            EventKind::DayElimination,
            format!("{name} was exiled by the day vote"),
        );
        // The exile announcement reveals the exiled player's role
        self.broadcast(notifier, &messages::day_result(&name, role));

        Ok(StepReport {
            phase: Phase::DayResult,
            eliminated: Some(target),
            winner: None,
        })
    }

    fn no_exile(&mut self, notifier: &mut dyn Notifier) -> StepReport {
        self.state.set_phase(Phase::DayResult);
        self.events.append(
            self.state.round,
            Phase::DayResult,
            EventKind::NoExile,
            "the day vote resolved without an exile",
        );
        self.broadcast(notifier, messages::day_result_tie());
        StepReport::at(Phase::DayResult)
    }

    fn close_round(&mut self, notifier: &mut dyn Notifier) -> Result<StepReport, GameError> {
        if let Some(winner) = win::evaluate(&self.registry) {
            self.state.finish(winner);
            let text = match winner {
                Winner::Traitors => messages::traitors_win(),
                Winner::Faithful => messages::faithful_win(),
            };
            self.events.append(
                self.state.round,
                Phase::GameOver,
                EventKind::GameOver,
                format!("the {winner} have won"),
            );
            self.broadcast(notifier, text);

            return Ok(StepReport {
                phase: Phase::GameOver,
                eliminated: None,
                winner: Some(winner),
            });
        }

        self.state.next_round();
        Ok(self.open_night_chat(notifier))
    }

    fn broadcast(&self, notifier: &mut dyn Notifier, text: &str) {
        for player in self.registry.iter() {
            notifier.send(&player.email, text);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;
    use crate::notify::NullNotifier;

    fn started_game() -> Game {
        let mut game = Game::new(GameConfig::default(), 11);
        for i in 1..=6 {
            game.add_player(format!("P{i}"), format!("p{i}@x.com")).unwrap();
        }
        game.start(&mut NullNotifier).unwrap();
        game
    }

    #[test]
    fn test_advance_requires_started_game() {
        let mut game = Game::new(GameConfig::default(), 0);
        assert_eq!(
            game.advance(&mut NullNotifier).unwrap_err(),
            GameError::NotStarted
        );
    }

    #[test]
    fn test_opening_sequence() {
        let mut game = started_game();

        let step = game.advance(&mut NullNotifier).unwrap();
        assert_eq!(step.phase, Phase::NightTraitorChat);
        let step = game.advance(&mut NullNotifier).unwrap();
        assert_eq!(step.phase, Phase::NightVote);
    }

    #[test]
    fn test_no_votes_is_a_quiet_night() {
        let mut game = started_game();
        game.advance(&mut NullNotifier).unwrap();
        game.advance(&mut NullNotifier).unwrap();

        let step = game.advance(&mut NullNotifier).unwrap();
        assert_eq!(step.phase, Phase::MorningResult);
        assert_eq!(step.eliminated, None);
        assert_eq!(game.registry().alive().count(), 6);
    }

    #[test]
    fn test_round_increments_when_no_winner() {
        let mut game = started_game();
        // A full quiet round: chat, vote, morning, discussion, vote, result
        for _ in 0..6 {
            game.advance(&mut NullNotifier).unwrap();
        }
        assert_eq!(game.state().phase, Phase::DayResult);
        assert_eq!(game.state().round, 1);

        let step = game.advance(&mut NullNotifier).unwrap();
        assert_eq!(step.phase, Phase::NightTraitorChat);
        assert_eq!(game.state().round, 2);
    }

    #[test]
    fn test_night_tie_with_no_living_traitors_goes_quiet() {
        let mut game = started_game();
        let traitors: Vec<PlayerId> = game
            .registry
            .by_role(Role::Traitor, true)
            .map(|p| p.id)
            .collect();
        let faithful: Vec<PlayerId> = game
            .registry
            .by_role(Role::Faithful, true)
            .map(|p| p.id)
            .collect();

        game.advance(&mut NullNotifier).unwrap();
        game.advance(&mut NullNotifier).unwrap();
        game.cast_vote(traitors[0], faithful[0]).unwrap();
        game.cast_vote(traitors[1], faithful[1]).unwrap();

        // Both traitors drop out before the tie resolves
        game.registry.eliminate(traitors[0], 1).unwrap();
        game.registry.eliminate(traitors[1], 1).unwrap();

        let step = game.advance(&mut NullNotifier).unwrap();
        assert_eq!(step.phase, Phase::MorningResult);
        assert_eq!(step.eliminated, None);
        assert_eq!(game.registry.living_count(Role::Faithful), 4);
    }

    #[test]
    fn test_night_vote_opens_with_no_targets() {
        let mut game = started_game();
        let faithful: Vec<PlayerId> = game
            .registry
            .by_role(Role::Faithful, true)
            .map(|p| p.id)
            .collect();

        game.advance(&mut NullNotifier).unwrap();
        for id in faithful {
            game.registry.eliminate(id, 1).unwrap();
        }

        let step = game.advance(&mut NullNotifier).unwrap();
        assert_eq!(step.phase, Phase::NightVote);

        // An empty ballot sheet resolves as a quiet night
        let step = game.advance(&mut NullNotifier).unwrap();
        assert_eq!(step.phase, Phase::MorningResult);
        assert_eq!(step.eliminated, None);
    }

    #[test]
    fn test_game_over_advance_is_an_error() {
        let mut game = started_game();
        game.state.finish(Winner::Faithful);

        assert_eq!(
            game.advance(&mut NullNotifier).unwrap_err(),
            GameError::InvalidTransition
        );
    }
}
