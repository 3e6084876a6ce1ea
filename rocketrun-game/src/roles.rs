use std::fmt;

/// Playable roles offered on the selection screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Cook,
    Pilot,
    Fighter,
}

/// Starting kit the service hands out for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleKit {
    pub food: i32,
    pub fuel: i32,
    pub ammo: i32,
}

impl Role {
    pub const ALL: [Self; 3] = [Self::Cook, Self::Pilot, Self::Fighter];

    /// Identifier used by the page controls.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Cook => "cook",
            Self::Pilot => "pilot",
            Self::Fighter => "fighter",
        }
    }

    /// Name the game service expects in a role request.
    #[must_use]
    pub const fn server_name(self) -> &'static str {
        match self {
            Self::Cook => "kokki",
            Self::Pilot => "pilotti",
            Self::Fighter => "taistelija",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Cook => "Cook",
            Self::Pilot => "Pilot",
            Self::Fighter => "Fighter",
        }
    }

    #[must_use]
    pub const fn kit(self) -> RoleKit {
        match self {
            Self::Cook => RoleKit {
                food: 80,
                fuel: 100,
                ammo: 5,
            },
            Self::Pilot => RoleKit {
                food: 3,
                fuel: 130,
                ammo: 5,
            },
            Self::Fighter => RoleKit {
                food: 3,
                fuel: 100,
                ammo: 60,
            },
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|role| role.id() == id)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Translate a page role identifier into the service vocabulary.
///
/// Unknown identifiers pass through untouched so newer roles added on the
/// service side keep working without a client release.
#[must_use]
pub fn server_role_name(id: &str) -> &str {
    match Role::from_id(id) {
        Some(role) => role.server_name(),
        None => id,
    }
}
