mod common;

use std::collections::VecDeque;

use cheers_backend::domain::{PlayerId, Room, RoomSettings};
use common::proptest_prelude::proptest_prelude_config;
use proptest::prelude::*;
use time::OffsetDateTime;

#[derive(Debug, Clone)]
enum Op {
    Join,
    /// Leave by index into every id seen so far (may already be gone).
    Leave(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![3 => Just(Op::Join), 2 => (0usize..32).prop_map(Op::Leave)]
}

/// Reference model: join order for active players and FIFO for the queue.
#[derive(Default)]
struct Model {
    active: Vec<PlayerId>,
    queue: VecDeque<PlayerId>,
}

proptest! {
    #![proptest_config(proptest_prelude_config())]

    #[test]
    fn membership_matches_the_fifo_model(
        capacity in 1usize..5,
        ops in prop::collection::vec(op(), 1..40),
    ) {
        let settings = RoomSettings { capacity, ..RoomSettings::default() };
        let mut room = Room::new(settings);
        let mut model = Model::default();
        let mut seen: Vec<PlayerId> = Vec::new();
        let now = OffsetDateTime::now_utc();

        for (n, op) in ops.into_iter().enumerate() {
            match op {
                Op::Join => {
                    let joined = room.join(&format!("p{n}"), now);
                    if model.active.len() < capacity {
                        model.active.push(joined.player_id.clone());
                    } else {
                        model.queue.push_back(joined.player_id.clone());
                    }
                    seen.push(joined.player_id);
                }
                Op::Leave(i) => {
                    if seen.is_empty() {
                        continue;
                    }
                    let id = seen[i % seen.len()].clone();
                    room.leave(&id);
                    if let Some(pos) = model.active.iter().position(|p| *p == id) {
                        model.active.remove(pos);
                        if let Some(next) = model.queue.pop_front() {
                            model.active.push(next);
                        }
                    } else {
                        model.queue.retain(|p| *p != id);
                    }
                }
            }

            let roster = room.roster();
            let active: Vec<PlayerId> = roster.active().iter().map(|p| p.id.clone()).collect();
            let queued: Vec<PlayerId> = roster.queued().map(|p| p.id.clone()).collect();

            prop_assert!(active.len() <= capacity);
            prop_assert_eq!(&active, &model.active);
            prop_assert_eq!(&queued, &model.queue.iter().cloned().collect::<Vec<_>>());
            prop_assert!(active.is_empty() || model.queue.is_empty() || active.len() == capacity);

            match roster.host() {
                Some(host) => prop_assert!(active.contains(host)),
                None => prop_assert!(active.is_empty()),
            }

            let mut scored: Vec<PlayerId> = room.scores().iter().map(|(id, _)| id.clone()).collect();
            let mut expected = active.clone();
            scored.sort();
            expected.sort();
            prop_assert_eq!(scored, expected);
        }
    }
}
