//! Seat identifiers and per-seat storage.
//!
//! Seats are numbered from 0 in turn-rotation order. A [`PlayerId`] that
//! comes from a host or a choice provider may name a seat that does not
//! exist, so lookups on [`PlayerMap`] for such ids go through the checked
//! accessors.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// Seat identifier. At most 255 seats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// 0-based seat index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// One value per seat, in seat order.
///
/// ```
/// use salem_engine::core::{PlayerId, PlayerMap};
///
/// let mut counts = PlayerMap::from_vec(vec![0u32; 4]);
/// *counts.get_checked_mut(PlayerId::new(2)).unwrap() += 1;
/// assert_eq!(counts.get_checked(PlayerId::new(2)), Some(&1));
/// assert!(counts.get_checked(PlayerId::new(9)).is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Build from per-seat values, seat 0 first.
    ///
    /// # Panics
    ///
    /// With no seats or more than 255. Session construction rejects both
    /// before a map is built.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn contains(&self, player: PlayerId) -> bool {
        player.index() < self.data.len()
    }

    /// `None` for an unknown seat.
    #[must_use]
    pub fn get_checked(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    pub fn get_checked_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Mutable access to two different seats at once.
    ///
    /// `None` if the seats are equal or either is unknown.
    pub fn pair_mut(&mut self, a: PlayerId, b: PlayerId) -> Option<(&mut T, &mut T)> {
        let (ia, ib) = (a.index(), b.index());
        if ia == ib || ia >= self.data.len() || ib >= self.data.len() {
            return None;
        }
        if ia < ib {
            let (lo, hi) = self.data.split_at_mut(ib);
            Some((&mut lo[ia], &mut hi[0]))
        } else {
            let (lo, hi) = self.data.split_at_mut(ia);
            Some((&mut hi[0], &mut lo[ib]))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data.iter().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (PlayerId, &mut T)> {
        self.data.iter_mut().enumerate().map(|(i, v)| (PlayerId(i as u8), v))
    }

    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

/// Panics for an unknown seat; use [`PlayerMap::get_checked`] for outside ids.
impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
