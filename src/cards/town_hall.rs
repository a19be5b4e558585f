//! Town-hall character cards, dealt one per player at setup.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TownHall {
    WillGrigs,
    SarahGood,
    JohnProctor,
    SamuelParris,
    RebeccaNurse,
    MarthaCorey,
    ThomasDanforth,
    CottonMather,
    Tituba,
    AbigailWilliams,
    AnnePutnam,
    GilesCorey,
    MaryWarren,
    WilliamPhipps,
    GeorgeBurroughs,
}

impl TownHall {
    pub const ALL: [TownHall; 15] = [
        TownHall::WillGrigs,
        TownHall::SarahGood,
        TownHall::JohnProctor,
        TownHall::SamuelParris,
        TownHall::RebeccaNurse,
        TownHall::MarthaCorey,
        TownHall::ThomasDanforth,
        TownHall::CottonMather,
        TownHall::Tituba,
        TownHall::AbigailWilliams,
        TownHall::AnnePutnam,
        TownHall::GilesCorey,
        TownHall::MaryWarren,
        TownHall::WilliamPhipps,
        TownHall::GeorgeBurroughs,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            TownHall::WillGrigs => "Will Grigs",
            TownHall::SarahGood => "Sarah Good",
            TownHall::JohnProctor => "John Proctor",
            TownHall::SamuelParris => "Samuel Parris",
            TownHall::RebeccaNurse => "Rebecca Nurse",
            TownHall::MarthaCorey => "Martha Corey",
            TownHall::ThomasDanforth => "Thomas Danforth",
            TownHall::CottonMather => "Cotton Mather",
            TownHall::Tituba => "Tituba",
            TownHall::AbigailWilliams => "Abigail Williams",
            TownHall::AnnePutnam => "Anne Putnam",
            TownHall::GilesCorey => "Giles Corey",
            TownHall::MaryWarren => "Mary Warren",
            TownHall::WilliamPhipps => "William Phipps",
            TownHall::GeorgeBurroughs => "George Burroughs",
        }
    }

    /// Look a character up by display name.
    #[must_use]
    pub fn from_display_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.display_name() == name)
    }

    /// One-time ability charges the character starts with.
    #[must_use]
    pub const fn charges(self) -> u8 {
        match self {
            TownHall::SamuelParris => 2,
            TownHall::WilliamPhipps | TownHall::Tituba => 1,
            _ => 0,
        }
    }
}

impl std::fmt::Display for TownHall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_charges() {
        assert_eq!(TownHall::SamuelParris.charges(), 2);
        assert_eq!(TownHall::Tituba.charges(), 1);
        assert_eq!(TownHall::WilliamPhipps.charges(), 1);
        assert_eq!(TownHall::SarahGood.charges(), 0);
    }

    #[test]
    fn test_name_lookup() {
        for town_hall in TownHall::ALL {
            assert_eq!(TownHall::from_display_name(town_hall.display_name()), Some(town_hall));
        }
        assert_eq!(TownHall::from_display_name("Nobody"), None);
    }
}
