use std::fmt;

/// Travel class a ticket is booked in
///
/// The set of classes is closed; each class owns an independent seat pool.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum TravelClass {
    /// Sleeper class
    Sleeper,
    /// Air-conditioned class
    Ac,
    /// General (unreserved) class
    General,
}

impl TravelClass {
    /// All travel classes in menu order
    ///
    /// This is also the order in which coaches are provisioned from the random
    /// source.
    pub const ALL: [TravelClass; 3] = [TravelClass::Sleeper, TravelClass::Ac, TravelClass::General];

    /// Human readable name, e.g. `Sleeper Class`
    pub fn name(self) -> &'static str {
        match self {
            TravelClass::Sleeper => "Sleeper Class",
            TravelClass::Ac => "AC Class",
            TravelClass::General => "General Class",
        }
    }

    /// Number under which the class is listed in the portal menu (1-based)
    pub fn menu_choice(self) -> u32 {
        match self {
            TravelClass::Sleeper => 1,
            TravelClass::Ac => 2,
            TravelClass::General => 3,
        }
    }

    /// Look up the class listed under `choice` in the portal menu.
    pub fn from_menu_choice(choice: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|class| class.menu_choice() == choice)
    }
}

impl fmt::Display for TravelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_choices_round_trip() {
        for class in TravelClass::ALL {
            assert_eq!(TravelClass::from_menu_choice(class.menu_choice()), Some(class));
        }
        assert_eq!(TravelClass::from_menu_choice(0), None);
        assert_eq!(TravelClass::from_menu_choice(4), None);
    }
}
