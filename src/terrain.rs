//! Terrain kinds and their movement costs.

use std::fmt::{self, Display, Write};

/// The kind of terrain occupying one map cell.
///
/// Every kind except [`Water`](Terrain::Water) charges a fixed entry cost when
/// an agent moves onto a cell of that kind; Water is impassable.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Road,
    Field,
    Forest,
    Hills,
    River,
    Mountain,
    Water,
}

impl Terrain {
    /// The cost charged for moving onto a cell of this terrain, or `None` if
    /// the terrain is impassable.
    pub fn entry_cost(self) -> Option<u32> {
        match self {
            Terrain::Road => Some(1),
            Terrain::Field => Some(2),
            Terrain::Forest => Some(4),
            Terrain::Hills => Some(5),
            Terrain::River => Some(7),
            Terrain::Mountain => Some(10),
            Terrain::Water => None,
        }
    }

    pub fn is_passable(self) -> bool {
        self.entry_cost().is_some()
    }
}

impl From<Terrain> for char {
    fn from(value: Terrain) -> Self {
        match value {
            Terrain::Road => 'R',
            Terrain::Field => 'f',
            Terrain::Forest => 'F',
            Terrain::Hills => 'h',
            Terrain::River => 'r',
            Terrain::Mountain => 'M',
            Terrain::Water => 'W',
        }
    }
}

impl TryFrom<char> for Terrain {
    type Error = char;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'R' => Ok(Terrain::Road),
            'f' => Ok(Terrain::Field),
            'F' => Ok(Terrain::Forest),
            'h' => Ok(Terrain::Hills),
            'r' => Ok(Terrain::River),
            'M' => Ok(Terrain::Mountain),
            'W' => Ok(Terrain::Water),
            other => Err(other),
        }
    }
}

impl Display for Terrain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((*self).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Terrain; 7] = [
        Terrain::Road,
        Terrain::Field,
        Terrain::Forest,
        Terrain::Hills,
        Terrain::River,
        Terrain::Mountain,
        Terrain::Water,
    ];

    #[test]
    fn glyphs_round_trip() {
        for kind in ALL {
            let glyph: char = kind.into();
            assert_eq!(Terrain::try_from(glyph), Ok(kind));
        }
        assert_eq!(Terrain::try_from('x'), Err('x'));
        // The codec is case sensitive: 'w' is not Water.
        assert_eq!(Terrain::try_from('w'), Err('w'));
    }

    #[test]
    fn only_water_is_impassable() {
        for kind in ALL {
            match kind {
                Terrain::Water => {
                    assert!(!kind.is_passable());
                    assert_eq!(kind.entry_cost(), None);
                }
                _ => {
                    assert!(kind.is_passable());
                    assert!(kind.entry_cost().unwrap() > 0);
                }
            }
        }
    }
}
