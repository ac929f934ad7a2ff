//! Active/queued player bookkeeping and host assignment.
//!
//! Active players are kept in an explicit ordered sequence (join order).
//! Host transfer and wheel candidate order both depend on that order.

use std::collections::VecDeque;

use crate::domain::player::{Player, PlayerId};

/// Where a joining player ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Active,
    /// 1-based queue position.
    Queued { position: usize },
}

/// What `Roster::remove` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Departure {
    /// The id was neither active nor queued.
    Unknown,
    /// The player was removed from the waiting queue.
    Dequeued,
    /// The player was removed from the active set.
    Left {
        was_host: bool,
        /// New host when the departing player held it.
        new_host: Option<PlayerId>,
        /// No active players remain.
        emptied: bool,
        /// Queue head moved into the freed slot.
        promoted: Option<PlayerId>,
    },
}

#[derive(Debug, Clone)]
pub struct Roster {
    active: Vec<Player>,
    queue: VecDeque<Player>,
    host: Option<PlayerId>,
    capacity: usize,
}

impl Roster {
    pub fn new(capacity: usize) -> Self {
        Self {
            active: Vec::with_capacity(capacity),
            queue: VecDeque::new(),
            host: None,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Activate the player if a slot is free, otherwise queue them.
    /// The first active player becomes host when none exists.
    pub fn admit(&mut self, player: Player) -> Admission {
        if self.active.len() >= self.capacity {
            self.queue.push_back(player);
            return Admission::Queued {
                position: self.queue.len(),
            };
        }

        if self.host.is_none() {
            self.host = Some(player.id.clone());
        }
        self.active.push(player);
        Admission::Active
    }

    /// Remove a player from either the active set or the queue.
    ///
    /// Host passes to the earliest-joined remaining active player; the queue
    /// head is promoted into the freed slot afterwards, so a promoted player
    /// only becomes host when the room had emptied.
    pub fn remove(&mut self, id: &PlayerId) -> Departure {
        let Some(pos) = self.active.iter().position(|p| &p.id == id) else {
            let before = self.queue.len();
            self.queue.retain(|p| &p.id != id);
            return if self.queue.len() < before {
                Departure::Dequeued
            } else {
                Departure::Unknown
            };
        };

        self.active.remove(pos);
        let was_host = self.host.as_ref() == Some(id);
        let emptied = self.active.is_empty();
        let mut new_host = None;

        if was_host {
            self.host = self.active.first().map(|p| p.id.clone());
            new_host = self.host.clone();
        }

        let promoted = self.promote();
        if promoted.is_some() && self.host.is_none() {
            self.host = promoted.clone();
            new_host = promoted.clone();
        }

        Departure::Left {
            was_host,
            new_host,
            emptied,
            promoted,
        }
    }

    fn promote(&mut self) -> Option<PlayerId> {
        if self.active.len() >= self.capacity {
            return None;
        }
        let next = self.queue.pop_front()?;
        let id = next.id.clone();
        self.active.push(next);
        Some(id)
    }

    pub fn active(&self) -> &[Player] {
        &self.active
    }

    pub(crate) fn active_mut(&mut self) -> &mut [Player] {
        &mut self.active
    }

    pub fn queued(&self) -> impl Iterator<Item = &Player> {
        self.queue.iter()
    }

    pub(crate) fn queue_mut(&mut self) -> &mut VecDeque<Player> {
        &mut self.queue
    }

    pub fn host(&self) -> Option<&PlayerId> {
        self.host.as_ref()
    }

    pub fn is_host(&self, id: &PlayerId) -> bool {
        self.host.as_ref() == Some(id)
    }

    pub fn is_active(&self, id: &PlayerId) -> bool {
        self.active.iter().any(|p| &p.id == id)
    }

    pub fn find_active(&self, id: &PlayerId) -> Option<&Player> {
        self.active.iter().find(|p| &p.id == id)
    }

    pub fn name_of(&self, id: &PlayerId) -> Option<&str> {
        self.find_active(id).map(|p| p.name.as_str())
    }

    /// 1-based position in the waiting queue.
    pub fn queue_position(&self, id: &PlayerId) -> Option<usize> {
        self.queue.iter().position(|p| &p.id == id).map(|i| i + 1)
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn queued_count(&self) -> usize {
        self.queue.len()
    }

    pub fn clear(&mut self) {
        self.active.clear();
        self.queue.clear();
        self.host = None;
    }
}
