//! Randomized checks over arbitrary key sequences and viewports

use std::collections::HashSet;

use proptest::prelude::*;
use stitchwork_core::entity::BodyPart;
use stitchwork_core::items::ItemId;
use stitchwork_core::{SimConfig, SimulationState};

const KEYS: [&str; 8] = [
    "w",
    "a",
    "s",
    "d",
    "ArrowUp",
    "ArrowLeft",
    "ArrowDown",
    "ArrowRight",
];

#[derive(Debug, Clone)]
enum Action {
    Press(usize),
    Release(usize),
    Frames(u8),
    Resize(f32, f32),
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        (0..KEYS.len()).prop_map(Action::Press),
        (0..KEYS.len()).prop_map(Action::Release),
        (1u8..40).prop_map(Action::Frames),
        (100.0f32..1600.0, 100.0f32..1200.0).prop_map(|(w, h)| Action::Resize(w, h)),
    ]
}

fn session(width: f32, height: f32, seed: u64) -> SimulationState {
    let config = SimConfig {
        rng_seed: Some(seed),
        ..SimConfig::default()
    };
    SimulationState::new(width, height, config).unwrap()
}

/// Drive the session, calling `check` after every frame
fn play(sim: &mut SimulationState, actions: &[Action], mut check: impl FnMut(&SimulationState)) {
    for action in actions {
        match action {
            Action::Press(key) => {
                sim.key_down(KEYS[*key]);
            }
            Action::Release(key) => {
                sim.key_up(KEYS[*key]);
            }
            Action::Frames(n) => {
                for _ in 0..*n {
                    sim.step();
                    check(sim);
                }
            }
            Action::Resize(width, height) => {
                sim.resize(*width, *height);
                check(sim);
            }
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn frame_never_leaves_room(
        width in 100.0f32..1600.0,
        height in 100.0f32..1200.0,
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..60),
    ) {
        let mut sim = session(width, height, seed);
        play(&mut sim, &actions, |sim| {
            let frame = sim.creature.frame_at(sim.creature.position);
            assert!(sim.room().contains_all(&frame.corners()));
        });
    }

    #[test]
    fn item_flags_never_revert(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..60),
    ) {
        let mut sim = session(800.0, 600.0, seed);
        let mut discovered = HashSet::new();
        let mut collected = HashSet::new();
        play(&mut sim, &actions, |sim| {
            for id in &discovered {
                assert!(sim.items.get(*id).unwrap().is_discovered());
            }
            for id in &collected {
                assert!(sim.items.get(*id).unwrap().is_collected());
            }
            for item in sim.items.iter() {
                if item.is_discovered() {
                    discovered.insert(item.id);
                }
                if item.is_collected() {
                    collected.insert(item.id);
                }
            }
        });
    }

    #[test]
    fn at_most_one_bubble_per_item(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..60),
    ) {
        let mut sim = session(800.0, 600.0, seed);
        play(&mut sim, &actions, |sim| {
            for id in ItemId::ALL {
                let count = sim
                    .notifications
                    .live()
                    .iter()
                    .filter(|notification| notification.source == id)
                    .count();
                assert!(count <= 1);
            }
        });
    }

    #[test]
    fn parts_only_grow(
        seed in any::<u64>(),
        actions in prop::collection::vec(action(), 1..60),
    ) {
        let mut sim = session(800.0, 600.0, seed);
        let mut previous = sim.creature.parts();
        play(&mut sim, &actions, |sim| {
            let parts = sim.creature.parts();
            assert!(parts.contains(previous));
            assert!(parts.has(BodyPart::Abdomen));
            assert_eq!(sim.creature.can_hop(), parts.has(BodyPart::LegLeft));
            previous = parts;
        });
    }

    #[test]
    fn bubble_text_keeps_description_shape(seed in any::<u64>()) {
        let mut sim = session(800.0, 600.0, seed);
        let chair = sim.items.get(ItemId::SurgeonsChair).unwrap();
        let description = chair.description;
        sim.creature.position = chair.rect().center();
        sim.step();

        let text = &sim.notifications.live()[0].text;
        prop_assert_eq!(text.chars().count(), description.chars().count());
        for (original, shown) in description.chars().zip(text.chars()) {
            prop_assert!(shown == original || shown == '.');
            if original == ' ' {
                prop_assert_eq!(shown, ' ');
            }
        }
    }
}
