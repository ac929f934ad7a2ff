//! Read-only views handed to polling clients.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::player::PlayerId;
use crate::domain::room::Room;
use crate::domain::rules::GameMode;
use crate::domain::scoring::GameResult;
use crate::domain::shared::SharedGameState;
use crate::domain::wheel::{Candidate, WheelPhase};
use crate::errors::domain::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Setup,
    Wheel,
    Game,
}

/// Where a player currently is.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlayerStatus {
    InGame { screen: Screen, is_host: bool },
    InQueue { queue_position: usize },
    NotFound,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PlayerPublic {
    pub player_id: PlayerId,
    pub player_name: String,
    pub is_host: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OrderEntry {
    pub player_id: PlayerId,
    pub player_name: String,
    /// 1-based position in the turn order.
    pub order: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct WheelSnapshot {
    pub phase: WheelPhase,
    pub wheel_spinning: bool,
    pub wheel_finished: bool,
    pub spin_seed: Option<u64>,
    pub winner_index: Option<usize>,
    /// Frozen snapshot while spinning/finished, live active list while idle.
    pub candidates: Vec<Candidate>,
    /// Empty until finished.
    pub player_order: Vec<OrderEntry>,
}

/// Viewer-relative flags; all false for anonymous readers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Viewer {
    pub my_player_id: Option<PlayerId>,
    pub is_in_room: bool,
    pub is_host: bool,
    pub is_my_turn: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoomSnapshot {
    pub player_count: usize,
    pub players: Vec<PlayerPublic>,
    pub queued_count: usize,
    pub host_id: Option<PlayerId>,
    pub game_started: bool,
    pub can_start: bool,
    pub min_players: usize,
    pub max_players: usize,
    pub current_turn_index: usize,
    pub current_player_id: Option<PlayerId>,
    pub current_round: u32,
    pub game_mode: GameMode,
    pub game_ended: bool,
    pub game_result: Option<GameResult>,
    #[serde(flatten)]
    pub shared: SharedGameState,
    pub player_scores: BTreeMap<PlayerId, i32>,
    #[serde(flatten)]
    pub viewer: Viewer,
}

pub fn player_status(room: &Room, id: &PlayerId) -> PlayerStatus {
    let roster = room.roster();
    if roster.is_active(id) {
        let screen = if !room.turns().is_started() {
            Screen::Setup
        } else if room.wheel().phase() != WheelPhase::Finished {
            Screen::Wheel
        } else {
            Screen::Game
        };
        return PlayerStatus::InGame {
            screen,
            is_host: roster.is_host(id),
        };
    }
    match roster.queue_position(id) {
        Some(queue_position) => PlayerStatus::InQueue { queue_position },
        None => PlayerStatus::NotFound,
    }
}

pub fn wheel_snapshot(room: &Room) -> WheelSnapshot {
    let wheel = room.wheel();
    let phase = wheel.phase();

    let candidates = if phase == WheelPhase::Idle {
        room.roster()
            .active()
            .iter()
            .map(|p| Candidate {
                player_id: p.id.clone(),
                player_name: p.name.clone(),
            })
            .collect()
    } else {
        wheel.candidates().to_vec()
    };

    // Names come from the frozen snapshot so departed players still render.
    let player_order = wheel
        .order()
        .iter()
        .enumerate()
        .map(|(i, id)| OrderEntry {
            player_id: id.clone(),
            player_name: wheel
                .candidates()
                .iter()
                .find(|c| &c.player_id == id)
                .map(|c| c.player_name.clone())
                .unwrap_or_default(),
            order: i + 1,
        })
        .collect();

    WheelSnapshot {
        phase,
        wheel_spinning: phase == WheelPhase::Spinning,
        wheel_finished: phase == WheelPhase::Finished,
        spin_seed: wheel.seed(),
        winner_index: wheel.winner_index(),
        candidates,
        player_order,
    }
}

pub fn room_snapshot(room: &Room, viewer: Option<&PlayerId>) -> RoomSnapshot {
    let roster = room.roster();
    let turns = room.turns();

    let players = roster
        .active()
        .iter()
        .map(|p| PlayerPublic {
            player_id: p.id.clone(),
            player_name: p.name.clone(),
            is_host: roster.is_host(&p.id),
        })
        .collect();

    let viewer = viewer
        .map(|id| Viewer {
            my_player_id: Some(id.clone()),
            is_in_room: roster.is_active(id),
            is_host: roster.is_host(id),
            is_my_turn: turns.current_player() == Some(id),
        })
        .unwrap_or_default();

    RoomSnapshot {
        player_count: roster.active_count(),
        players,
        queued_count: roster.queued_count(),
        host_id: roster.host().cloned(),
        game_started: turns.is_started(),
        can_start: room.can_start(),
        min_players: room.settings().min_players,
        max_players: roster.capacity(),
        current_turn_index: turns.index(),
        current_player_id: turns.current_player().cloned(),
        current_round: turns.round(),
        game_mode: room.mode(),
        game_ended: room.is_ended(),
        game_result: room.result().cloned(),
        shared: room.shared().clone(),
        player_scores: room
            .scores()
            .iter()
            .map(|(id, score)| (id.clone(), score))
            .collect(),
        viewer,
    }
}

/// Same as [`room_snapshot`] but only once the game has started.
pub fn game_snapshot(room: &Room, viewer: Option<&PlayerId>) -> Result<RoomSnapshot, DomainError> {
    room.turns().require_started()?;
    Ok(room_snapshot(room, viewer))
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use super::*;

    fn room_of(n: usize) -> (Room, Vec<PlayerId>) {
        let mut room = Room::default();
        let ids = (0..n)
            .map(|i| {
                room.join(&format!("p{i}"), OffsetDateTime::UNIX_EPOCH)
                    .player_id
            })
            .collect();
        (room, ids)
    }

    #[test]
    fn status_follows_game_phase() {
        let (mut room, ids) = room_of(2);
        assert!(matches!(
            player_status(&room, &ids[0]),
            PlayerStatus::InGame {
                screen: Screen::Setup,
                is_host: true
            }
        ));

        room.start(&ids[0], None).unwrap();
        assert!(matches!(
            player_status(&room, &ids[1]),
            PlayerStatus::InGame {
                screen: Screen::Wheel,
                is_host: false
            }
        ));

        room.spin(&ids[0], 5).unwrap();
        room.finish_spin().unwrap();
        assert!(matches!(
            player_status(&room, &ids[1]),
            PlayerStatus::InGame {
                screen: Screen::Game,
                ..
            }
        ));
        assert_eq!(
            player_status(&room, &PlayerId::from("nobody")),
            PlayerStatus::NotFound
        );
    }

    #[test]
    fn queued_status_reports_position() {
        let (mut room, _) = room_of(6);
        let id = room
            .join("late", OffsetDateTime::UNIX_EPOCH)
            .player_id;
        assert_eq!(
            player_status(&room, &id),
            PlayerStatus::InQueue { queue_position: 1 }
        );
    }

    #[test]
    fn status_serializes_with_tag() {
        let json = serde_json::to_value(PlayerStatus::InQueue { queue_position: 2 }).unwrap();
        assert_eq!(json["status"], "in_queue");
        assert_eq!(json["queue_position"], 2);
    }

    #[test]
    fn idle_wheel_shows_live_players() {
        let (room, _) = room_of(3);
        let snap = wheel_snapshot(&room);
        assert_eq!(snap.candidates.len(), 3);
        assert!(snap.player_order.is_empty());
        assert!(!snap.wheel_spinning);
    }

    #[test]
    fn finished_wheel_numbers_order_from_one() {
        let (mut room, ids) = room_of(3);
        room.start(&ids[0], None).unwrap();
        room.spin(&ids[0], 42).unwrap();
        room.finish_spin().unwrap();

        let snap = wheel_snapshot(&room);
        assert!(snap.wheel_finished);
        let orders: Vec<usize> = snap.player_order.iter().map(|e| e.order).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert!(snap.player_order.iter().all(|e| !e.player_name.is_empty()));
    }

    #[test]
    fn viewer_flags() {
        let (room, ids) = room_of(2);
        let snap = room_snapshot(&room, Some(&ids[0]));
        assert!(snap.viewer.is_in_room);
        assert!(snap.viewer.is_host);
        assert!(!snap.viewer.is_my_turn);

        let anon = room_snapshot(&room, None);
        assert_eq!(anon.viewer, Viewer::default());
        assert!(anon.can_start);
    }

    #[test]
    fn game_snapshot_requires_started_game() {
        let (room, _) = room_of(2);
        assert!(game_snapshot(&room, None).is_err());
    }

    #[test]
    fn snapshot_json_flattens_shared_state() {
        let (room, _) = room_of(1);
        let json = serde_json::to_value(room_snapshot(&room, None)).unwrap();
        assert_eq!(json["dice"], serde_json::json!([1, 1]));
        assert_eq!(json["pour_stack"], serde_json::json!([]));
        assert_eq!(json["is_in_room"], false);
    }
}
