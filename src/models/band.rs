use serde::{Deserialize, Serialize};

/// Discrete terrain classification, ordered by height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum TerrainBand {
    Water = 0,
    Shore = 1,
    /// Grass
    Lowland = 2,
    Midland = 3,
    Highland = 4,
    Hills = 5,
    Mountains = 6,
}

impl TerrainBand {
    pub const COUNT: usize = 7;

    pub const ALL: [TerrainBand; Self::COUNT] = [
        TerrainBand::Water,
        TerrainBand::Shore,
        TerrainBand::Lowland,
        TerrainBand::Midland,
        TerrainBand::Highland,
        TerrainBand::Hills,
        TerrainBand::Mountains,
    ];

    /// Small integer identifier handed to renderers.
    pub fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            TerrainBand::Water => "water",
            TerrainBand::Shore => "shore",
            TerrainBand::Lowland => "lowland",
            TerrainBand::Midland => "midland",
            TerrainBand::Highland => "highland",
            TerrainBand::Hills => "hills",
            TerrainBand::Mountains => "mountains",
        }
    }

    /// Water or shore; the two bands the shoreline cleanup never overwrites.
    pub fn is_coastal(self) -> bool {
        matches!(self, TerrainBand::Water | TerrainBand::Shore)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_height_order() {
        for (i, band) in TerrainBand::ALL.iter().enumerate() {
            assert_eq!(band.id() as usize, i);
            assert_eq!(TerrainBand::from_id(i as u8), Some(*band));
        }
        assert_eq!(TerrainBand::from_id(7), None);
        assert!(TerrainBand::Water < TerrainBand::Mountains);
    }
}
