use crate::fsize;
use serde::{Deserialize, Serialize};

/// Orientation in which an item is placed. Only quarter turns are produced by the packer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
}

impl Rotation {
    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
        }
    }

    /// Dimensions of a `width` x `height` rectangle after applying this rotation
    pub fn apply(&self, width: fsize, height: fsize) -> (fsize, fsize) {
        match self {
            Rotation::Deg0 => (width, height),
            Rotation::Deg90 => (height, width),
        }
    }
}

impl From<Rotation> for u16 {
    fn from(r: Rotation) -> Self {
        r.degrees()
    }
}

impl TryFrom<u16> for Rotation {
    type Error = String;

    fn try_from(degrees: u16) -> Result<Self, Self::Error> {
        match degrees % 360 {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            d => Err(format!("unsupported rotation: {d} degrees")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(0, Some(Rotation::Deg0))]
    #[test_case(90, Some(Rotation::Deg90))]
    #[test_case(450, Some(Rotation::Deg90))]
    #[test_case(180, None)]
    #[test_case(45, None)]
    fn from_degrees(degrees: u16, expected: Option<Rotation>) {
        assert_eq!(Rotation::try_from(degrees).ok(), expected);
    }

    #[test]
    fn quarter_turn_swaps_sides() {
        assert_eq!(Rotation::Deg0.apply(3.0, 2.0), (3.0, 2.0));
        assert_eq!(Rotation::Deg90.apply(3.0, 2.0), (2.0, 3.0));
    }
}
