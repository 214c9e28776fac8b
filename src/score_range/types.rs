use serde::{Deserialize, Serialize};

/// Skill values of the five deck members, leader first.
pub type SkillSet = [u32; 5];

/// Per-slot skill score coefficients for one song, difficulty and live mode.
pub type CoefficientSet = [f64; 5];

/// Which skill value (and deck member) fires in each activation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub slots: [u32; 5],
    pub members: [usize; 5],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillActivation {
    /// Index of the originating card in `DeckDetail::members`.
    pub member: usize,
    pub score_up: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckMember {
    pub power: u32,
    pub score_up: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckDetail {
    pub total_power: u32,
    pub members: Vec<DeckMember>,
}

impl DeckDetail {
    /// Splits `total_power` evenly; the remainder goes to the first members.
    pub fn from_skills(total_power: u32, skills: &SkillSet) -> Self {
        let avg = total_power / 5;
        let remainder = (total_power % 5) as usize;
        let members = skills
            .iter()
            .enumerate()
            .map(|(i, &score_up)| DeckMember {
                power: avg + u32::from(i < remainder),
                score_up,
            })
            .collect();
        Self {
            total_power,
            members,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveDetail {
    pub score: i64,
    pub life: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRange {
    pub min: i64,
    pub max: i64,
    /// Skill value per activation slot for the worst-case order.
    pub min_permutation: [u32; 5],
    /// Skill value per activation slot for the best-case order.
    pub max_permutation: [u32; 5],
    pub skill_coeffs: CoefficientSet,
}
