//! Role assignment at game start.
//!
//! `traitor_count` players become traitors, the rest faithful, with the
//! split decided by a seeded shuffle of the registration order. Each
//! player receives their role privately; traitors additionally learn who
//! their fellow traitors are.

use tracing::info;

use crate::core::{GameConfig, GameRng, Phase, PlayerId, PlayerRegistry, Role};
use crate::error::GameError;
use crate::events::{EventKind, EventLog};
use crate::notify::{messages, Notifier};

/// Deal roles to every registered player and deliver the private role
/// messages.
pub(crate) fn assign(
    registry: &mut PlayerRegistry,
    config: &GameConfig,
    rng: &mut GameRng,
    events: &mut EventLog,
    notifier: &mut dyn Notifier,
) -> Result<(), GameError> {
    let mut ids: Vec<PlayerId> = registry.iter().map(|p| p.id).collect();
    rng.shuffle(&mut ids);

    let num_traitors = config.traitor_count(ids.len());
    for (index, id) in ids.iter().enumerate() {
        let role = if index < num_traitors {
            Role::Traitor
        } else {
            Role::Faithful
        };
        registry.set_role(*id, role)?;
    }

    info!(players = ids.len(), traitors = num_traitors, "roles assigned");

    let traitors: Vec<(PlayerId, String, String)> = registry
        .by_role(Role::Traitor, true)
        .map(|p| (p.id, p.name.clone(), p.email.clone()))
        .collect();

    for (id, _, email) in &traitors {
        let others: Vec<&str> = traitors
            .iter()
            .filter(|(other, _, _)| other != id)
            .map(|(_, name, _)| name.as_str())
            .collect();
        notifier.send(email, &messages::role_traitor(&others));
    }
    for player in registry.by_role(Role::Faithful, true) {
        notifier.send(&player.email, messages::role_faithful());
    }

    events.append(
        1,
        Phase::Init,
        EventKind::RolesAssigned,
        format!(
            "{num_traitors} traitors dealt among {} players",
            ids.len()
        ),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Outbox;

    fn registry_of(n: u32) -> PlayerRegistry {
        let mut registry = PlayerRegistry::new();
        for i in 1..=n {
            registry
                .add(format!("P{i}"), format!("p{i}@x.com"))
                .unwrap();
        }
        registry
    }

    fn deal(n: u32, seed: u64) -> (PlayerRegistry, Outbox) {
        let mut registry = registry_of(n);
        let config = GameConfig::default();
        let mut rng = GameRng::new(seed);
        let mut events = EventLog::new();
        let mut outbox = Outbox::new();

        assign(&mut registry, &config, &mut rng, &mut events, &mut outbox).unwrap();
        (registry, outbox)
    }

    #[test]
    fn test_every_player_gets_a_role() {
        let (registry, _) = deal(8, 1);

        assert!(registry.iter().all(|p| p.role != Role::Unassigned));
        assert_eq!(registry.living_count(Role::Traitor), 2);
        assert_eq!(registry.living_count(Role::Faithful), 6);
    }

    #[test]
    fn test_same_seed_same_deal() {
        let (a, _) = deal(10, 42);
        let (b, _) = deal(10, 42);

        for (pa, pb) in a.iter().zip(b.iter()) {
            assert_eq!(pa.role, pb.role);
        }
    }

    #[test]
    fn test_traitors_learn_each_other() {
        let (registry, outbox) = deal(8, 3);

        let traitors: Vec<_> = registry.by_role(Role::Traitor, true).collect();
        assert_eq!(traitors.len(), 2);

        for traitor in &traitors {
            let inbox = outbox.messages_to(&traitor.email);
            assert_eq!(inbox.len(), 1);
            assert!(inbox[0].contains("TRAITOR"));
            let other = traitors
                .iter()
                .find(|t| t.id != traitor.id)
                .unwrap();
            assert!(inbox[0].contains(&other.name));
            assert!(!inbox[0].contains(&traitor.name));
        }
    }

    #[test]
    fn test_faithful_get_faithful_message() {
        let (registry, outbox) = deal(8, 3);

        for player in registry.by_role(Role::Faithful, true) {
            let inbox = outbox.messages_to(&player.email);
            assert_eq!(inbox.len(), 1);
            assert!(inbox[0].contains("FAITHFUL"));
        }
    }

    #[test]
    fn test_roles_assigned_event() {
        let mut registry = registry_of(8);
        let config = GameConfig::default();
        let mut rng = GameRng::new(0);
        let mut events = EventLog::new();
        let mut outbox = Outbox::new();

        assign(&mut registry, &config, &mut rng, &mut events, &mut outbox).unwrap();

        let logged = events.list(None);
        assert_eq!(logged.len(), 1);
        assert_eq!(logged[0].kind, EventKind::RolesAssigned);
    }
}
