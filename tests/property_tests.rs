// Property-based tests for the power model, the combat resolver and random
// walks over legal battle events
use ccg_battle::ai::FrontLine;
use ccg_battle::battle::BattleMachine;
use ccg_battle::cards::{compute_effective_stats, CardDefinition, CardId, UnitInstance};
use ccg_battle::combat::resolve_attack;
use ccg_battle::core::{
    BattleConfig, BattleEvent, BattleSession, BoardLayout, Side, UnitId, UnitIdAllocator, Zone,
};
use ccg_battle::rules::RulesEngine;
use proptest::prelude::*;

fn total_units(session: &BattleSession) -> usize {
    Side::ALL.iter().map(|&side| session.side(side).total_units()).sum()
}

fn no_negative_health(session: &BattleSession) -> bool {
    Side::ALL.iter().all(|&side| {
        let zones = session.side(side);
        zones.hand().iter().all(|u| u.health >= 0)
            && zones.field_units().all(|(_, u)| u.health > 0)
            && zones.graveyard().iter().all(|u| u.health >= 0)
    })
}

fn battle(player: &[(i64, i64)], enemy: &[(i64, i64)]) -> BattleSession {
    let mut ids = UnitIdAllocator::new();
    let mut build = |side, stats: &[(i64, i64)]| -> Vec<UnitInstance> {
        stats
            .iter()
            .map(|&(attack, health)| UnitInstance::new(ids.alloc(), side, "Unit", attack, health))
            .collect()
    };
    let player = build(Side::Player, player);
    let enemy = build(Side::Enemy, enemy);
    BattleSession::start(&BattleConfig::default(), ids, player, enemy)
}

fn stats() -> impl Strategy<Value = Vec<(i64, i64)>> {
    prop::collection::vec((0i64..8, 1i64..12), 1..7)
}

proptest! {
    #[test]
    fn proptest_effective_stats_monotone_and_clamped(
        attack in 0i64..50,
        health in 1i64..50,
        growth in (0i64..6, 0i64..6),
        levels in (1u32..5, 1u32..10),
        steps in (0u32..20, 0u32..20),
    ) {
        let card = CardDefinition::new(CardId::new("card"), "Card", attack, health)
            .with_growth(growth.0, growth.1)
            .with_levels(levels.0, levels.1);
        let (low, high) = (steps.0.min(steps.1), steps.0.max(steps.1));

        let a = compute_effective_stats(&card, low);
        let b = compute_effective_stats(&card, high);

        prop_assert!(a.level <= b.level);
        prop_assert!(a.attack <= b.attack);
        prop_assert!(a.health <= b.health);
        prop_assert!(b.level <= card.level_cap());
        prop_assert!(b.level >= card.base_level);
    }

    #[test]
    fn proptest_resolver_conserves_units(
        attacker in (0i64..15, 1i64..15),
        defender in (0i64..15, 1i64..15),
    ) {
        let mut ids = UnitIdAllocator::new();
        let a = UnitInstance::new(ids.alloc(), Side::Player, "A", attacker.0, attacker.1);
        let d = UnitInstance::new(ids.alloc(), Side::Enemy, "D", defender.0, defender.1);
        let (a_id, d_id) = (a.id, d.id);
        let layout = BoardLayout {
            player_field: vec![Some(a)],
            enemy_field: vec![Some(d)],
            enemy_deployed: true,
            ..BoardLayout::default()
        };
        let session = BattleSession::from_board(&BattleConfig::default(), ids, layout);

        let resolution = resolve_attack(&session, a_id, d_id);
        let clash = resolution.outcome.unwrap();

        prop_assert_eq!(total_units(&resolution.session), total_units(&session));
        prop_assert!(no_negative_health(&resolution.session));
        prop_assert_eq!(clash.defender_died, defender.1 <= attacker.0);
        prop_assert_eq!(clash.attacker_died, attacker.1 <= defender.0);
    }

    #[test]
    fn proptest_legal_event_walks(
        player in stats(),
        enemy in stats(),
        picks in prop::collection::vec(0usize..64, 0..120),
    ) {
        let machine = BattleMachine::new(BattleConfig::default(), FrontLine);
        let mut session = battle(&player, &enemy);
        let units = total_units(&session);
        let mut buried: Vec<UnitId> = Vec::new();

        for pick in picks {
            let legal: Vec<BattleEvent> = machine
                .legal_events(&session)
                .into_iter()
                .filter(|e| *e != BattleEvent::RequestReset)
                .collect();
            if legal.is_empty() {
                prop_assert!(session.is_finished());
                break;
            }

            let event = legal[pick % legal.len()];
            let next = machine.reduce(&session, event);
            prop_assert!(next.is_ok(), "{:?} was listed but rejected", event);
            session = next.unwrap().session;

            prop_assert_eq!(total_units(&session), units);
            prop_assert!(no_negative_health(&session));
            for id in &buried {
                let location = session.locate(*id).map(|(_, l)| l.zone);
                prop_assert_eq!(location, Some(Zone::Graveyard));
            }
            for side in Side::ALL {
                for unit in session.side(side).graveyard() {
                    if !buried.contains(&unit.id) {
                        buried.push(unit.id);
                    }
                }
            }
        }
    }
}
