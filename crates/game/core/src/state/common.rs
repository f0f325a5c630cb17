use std::fmt;

/// Identifier of an archer, stable for the archer's lifetime.
///
/// Ids are reused across matches (1..=5 and 6..=10); state is not.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ArcherId(pub u32);

impl fmt::Display for ArcherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Identifier of a team within a match (1 or 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct TeamId(pub u32);

impl TeamId {
    pub const FIRST: Self = Self(1);
    pub const SECOND: Self = Self(2);
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.0)
    }
}

/// Position of a team inside a match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TeamSlot {
    First,
    Second,
}

impl TeamSlot {
    pub const ALL: [Self; 2] = [Self::First, Self::Second];

    pub const fn index(self) -> usize {
        match self {
            Self::First => 0,
            Self::Second => 1,
        }
    }
}

/// Gender category of an archer. Each category owns a precision table.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(ascii_case_insensitive)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Map a draw in `{0, 1}` onto a category.
    pub const fn from_index(index: i32) -> Self {
        if index == 0 { Self::Male } else { Self::Female }
    }
}

/// Outcome of a single shot.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Shot {
    /// Hit in the centre ring.
    Central,
    Intermediate,
    Outside,
    /// Missed the target.
    Miss,
}

impl Shot {
    pub const fn score(self) -> u32 {
        match self {
            Self::Central => 10,
            Self::Intermediate => 9,
            Self::Outside => 8,
            Self::Miss => 0,
        }
    }
}
