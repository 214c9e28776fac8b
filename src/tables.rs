use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, EnumIter, EnumString, Display, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum LiveMode {
    Solo,
    Auto,
    Multi,
}

#[derive(
    Debug,
    Clone,
    Copy,
    EnumIter,
    EnumString,
    Display,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
    Expert,
    Master,
    Append,
}

/// Event point boost per fire (energy) spent, indexed by fire count.
pub const ENERGY_MULTIPLIERS: [u32; 11] = [1, 5, 10, 15, 19, 23, 26, 29, 31, 33, 35];

/// Fire tier used for every Envy item.
pub const ENVY_ENERGY: usize = 0;

/// MySekai power levels. 36.0 is not offered, so the table's last column is unused.
pub const MY_SEKAI_POWERS: [f64; 8] = [0.0, 4.5, 9.0, 13.5, 18.0, 22.5, 27.0, 31.5];

/// Required event bonus (%) per MySekai point tier and power index.
/// `None` means the tier cannot be reached at that power.
pub const MY_SEKAI_REQ_MULTIPLIERS: [(u32, [Option<u32>; 9]); 15] = [
    (1000, req([100, 82, 67, 54, 43, 34, 25, 18, 12], 0)),
    (1500, req([200, 173, 150, 131, 115, 100, 88, 77, 67], 0)),
    (2000, req([300, 264, 234, 208, 186, 167, 150, 136, 123], 0)),
    (2500, req([400, 355, 317, 285, 258, 234, 213, 195, 178], 0)),
    (3000, req([500, 446, 400, 362, 329, 300, 275, 253, 234], 0)),
    (3500, req([600, 537, 484, 439, 400, 367, 338, 312, 289], 0)),
    (4000, req([700, 628, 567, 516, 472, 434, 400, 371, 345], 0)),
    (4500, req([800, 719, 650, 593, 543, 500, 463, 430, 400], 0)),
    (5000, req([0, 0, 734, 670, 615, 567, 525, 489, 456], 2)),
    (5500, req([0, 0, 0, 747, 686, 634, 588, 548, 512], 3)),
    (6000, req([0, 0, 0, 0, 758, 700, 650, 606, 567], 4)),
    (6500, req([0, 0, 0, 0, 0, 767, 713, 665, 623], 5)),
    (7000, req([0, 0, 0, 0, 0, 0, 775, 724, 678], 6)),
    (7500, req([0, 0, 0, 0, 0, 0, 0, 783, 734], 7)),
    (8000, req([0, 0, 0, 0, 0, 0, 0, 0, 789], 8)),
];

// Entries before `first` are unreachable.
const fn req(values: [u32; 9], first: usize) -> [Option<u32>; 9] {
    let mut out = [None; 9];
    let mut i = first;
    while i < 9 {
        out[i] = Some(values[i]);
        i += 1;
    }
    out
}

/// Maps a power value onto `MY_SEKAI_POWERS`, rounding down to the nearest listed level.
pub fn power_index(power: f64) -> usize {
    MY_SEKAI_POWERS
        .iter()
        .rposition(|&p| p <= power + f64::EPSILON)
        .unwrap_or(0)
}

pub fn energy_multiplier(fire: usize) -> u32 {
    ENERGY_MULTIPLIERS[fire.min(ENERGY_MULTIPLIERS.len() - 1)]
}
