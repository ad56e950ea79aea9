//! Win condition evaluation.
//!
//! A pure function over living role counts. The state machine evaluates it
//! when a round closes; drivers that want a mid-round reading can call it
//! directly at any time.

use crate::core::{PlayerRegistry, Role, Winner};

/// Evaluate the win condition.
///
/// Traitor parity is checked first: when living traitors reach or exceed
/// the living faithful, the traitors win, so simultaneous exhaustion of
/// both sides also goes to the traitors. Otherwise the faithful win once
/// no traitor is left alive.
#[must_use]
pub fn evaluate(registry: &PlayerRegistry) -> Option<Winner> {
    let traitors = registry.living_count(Role::Traitor);
    let faithful = registry.living_count(Role::Faithful);

    if traitors >= faithful {
        Some(Winner::Traitors)
    } else if traitors == 0 {
        Some(Winner::Faithful)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::PlayerId;

    fn registry(traitors: u32, faithful: u32) -> PlayerRegistry {
        let mut registry = PlayerRegistry::new();
        for i in 0..traitors + faithful {
            registry
                .add(format!("P{i}"), format!("p{i}@x.com"))
                .unwrap();
        }
        for i in 1..=traitors {
            registry.set_role(PlayerId::new(i), Role::Traitor).unwrap();
        }
        for i in traitors + 1..=traitors + faithful {
            registry.set_role(PlayerId::new(i), Role::Faithful).unwrap();
        }
        registry
    }

    #[test]
    fn test_running_game_has_no_winner() {
        assert_eq!(evaluate(&registry(2, 4)), None);
        assert_eq!(evaluate(&registry(1, 2)), None);
    }

    #[test]
    fn test_parity_means_traitors_win() {
        assert_eq!(evaluate(&registry(2, 2)), Some(Winner::Traitors));
        assert_eq!(evaluate(&registry(3, 2)), Some(Winner::Traitors));
        assert_eq!(evaluate(&registry(1, 1)), Some(Winner::Traitors));
    }

    #[test]
    fn test_no_traitors_means_faithful_win() {
        assert_eq!(evaluate(&registry(0, 4)), Some(Winner::Faithful));
    }

    #[test]
    fn test_parity_checked_before_faithful_win() {
        // Both sides empty resolves in the traitors' favor
        assert_eq!(evaluate(&registry(0, 0)), Some(Winner::Traitors));
    }

    #[test]
    fn test_only_living_players_count() {
        let mut reg = registry(2, 3);
        // Kill one faithful: 2 traitors vs 2 faithful is parity
        reg.eliminate(PlayerId::new(3), 1).unwrap();
        assert_eq!(evaluate(&reg), Some(Winner::Traitors));
    }
}
