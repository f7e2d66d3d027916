#![no_std]

extern crate alloc;

use alloc::string::String;

/// Lowest value a value-bearing tile may hold.
pub const VALUE_MIN: i32 = 0;
/// Highest value a value-bearing tile may hold.
pub const VALUE_MAX: i32 = 99;

/// Travel mechanisms, in the column order of the terrain catalogue.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum MoveType {
    Infantry,
    Mech,
    TreadA,
    TreadB,
    Tire,
    Air,
    Ship,
    Transport,
}

impl MoveType {
    pub const COUNT: usize = 8;

    pub const ALL: [MoveType; Self::COUNT] = [
        MoveType::Infantry,
        MoveType::Mech,
        MoveType::TreadA,
        MoveType::TreadB,
        MoveType::Tire,
        MoveType::Air,
        MoveType::Ship,
        MoveType::Transport,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Short name of the placeholder carrying this mechanism's cost.
    pub fn tag_name(self) -> &'static str {
        match self {
            MoveType::Infantry => "inf",
            MoveType::Mech => "mch",
            MoveType::TreadA => "trA",
            MoveType::TreadB => "trB",
            MoveType::Tire => "trd",
            MoveType::Air => "air",
            MoveType::Ship => "shp",
            MoveType::Transport => "trp",
        }
    }
}

/// Unit classes which may repair while stationed on a tile.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub enum RepairType {
    #[default]
    None,
    Ground,
    Naval,
    Air,
}

impl RepairType {
    pub fn from_code(code: &str) -> Self {
        match code {
            "G" => RepairType::Ground,
            "N" => RepairType::Naval,
            "A" => RepairType::Air,
            _ => RepairType::None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RepairType::None => "None",
            RepairType::Ground => "Ground",
            RepairType::Naval => "Naval",
            RepairType::Air => "Air",
        }
    }
}

/// Cost to enter a tile, per travel mechanism. A cost of 0 means impassable.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Hash)]
pub struct MoveCosts(pub [u32; MoveType::COUNT]);

impl MoveCosts {
    pub fn get(&self, move_type: MoveType) -> u32 {
        self.0[move_type.index()]
    }

    pub fn is_passable(&self, move_type: MoveType) -> bool {
        self.get(move_type) != 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (MoveType, u32)> + '_ {
        MoveType::ALL
            .into_iter()
            .map(move |move_type| (move_type, self.get(move_type)))
    }
}

/// One row of the terrain catalogue.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct TerrainRecord {
    pub name: String,
    pub short_name: String,
    pub description: String,
    pub move_costs: MoveCosts,
    pub defense: i32,
    pub generates_income: bool,
    pub repair_type: RepairType,
    pub hides_units: bool,
    /// Sight radius, 0 when not applicable.
    pub vision: i32,
    pub is_land: bool,
    pub is_shallow_water: bool,
    /// Whether the generated tile carries a value property bounded by
    /// [`VALUE_MIN`] and [`VALUE_MAX`].
    pub has_capturable_value: bool,
}

impl TerrainRecord {
    /// Identifier used for the generated class, the name with spaces removed.
    pub fn class_name(&self) -> String {
        self.name.chars().filter(|&c| c != ' ').collect()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn repair_codes() {
        assert_eq!(RepairType::from_code("G"), RepairType::Ground);
        assert_eq!(RepairType::from_code("N"), RepairType::Naval);
        assert_eq!(RepairType::from_code("A"), RepairType::Air);
        assert_eq!(RepairType::from_code("-"), RepairType::None);
        assert_eq!(RepairType::from_code("g"), RepairType::None);
        assert_eq!(RepairType::Naval.name(), "Naval");
    }

    #[test]
    fn move_types_follow_column_order() {
        for (i, move_type) in MoveType::ALL.iter().enumerate() {
            assert_eq!(move_type.index(), i);
        }
        assert_eq!(MoveType::Transport.tag_name(), "trp");
    }

    #[test]
    fn move_costs_lookup() {
        let costs = MoveCosts([1, 1, 2, 2, 3, 1, 0, 0]);
        assert_eq!(costs.get(MoveType::Tire), 3);
        assert!(costs.is_passable(MoveType::Air));
        assert!(!costs.is_passable(MoveType::Ship));
        assert_eq!(costs.iter().count(), MoveType::COUNT);
    }

    #[test]
    fn class_name_strips_spaces() {
        let record = TerrainRecord {
            name: "Sea Port".into(),
            ..Default::default()
        };
        assert_eq!(record.class_name(), "SeaPort");
    }
}
