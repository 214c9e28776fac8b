use crate::error::{CalcError, CalcResult};
use crate::tables::LiveMode;
use clap::{parser::ValueSource, ArgMatches, Args};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Search budgets and ranking knobs for the score-art solver.
/// Every loop in the solver is bounded by one of these.
#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverLimits {
    // === SEARCH BUDGETS ===
    #[arg(long, default_value_t = 200)]
    pub max_envy_combo_results: usize,
    #[arg(long, default_value_t = 100)]
    pub max_solutions_per_pass: usize,
    #[arg(long, default_value_t = 20)]
    pub max_diversity_per_signature: usize,
    #[arg(long, default_value_t = 10)]
    pub max_ban_iterations: usize,
    #[arg(long, default_value_t = 100)]
    pub max_accepted_solutions: usize,
    #[arg(long, default_value_t = 2_000_000)]
    pub max_search_steps: usize,

    // === SHAPE ===
    #[arg(long, default_value_t = 50_000)]
    pub dp_search_cap: u32,
    #[arg(long, default_value_t = 5_000)]
    pub band_width: u32,
    #[arg(long, default_value_t = 4)]
    pub max_distinct_envy: usize,

    // === RANKING ===
    #[arg(long, default_value_t = 2_000)]
    pub tier_window: u32,
}

impl Default for SolverLimits {
    fn default() -> Self {
        Self {
            max_envy_combo_results: 200,
            max_solutions_per_pass: 100,
            max_diversity_per_signature: 20,
            max_ban_iterations: 10,
            max_accepted_solutions: 100,
            max_search_steps: 2_000_000,
            dp_search_cap: 50_000,
            band_width: 5_000,
            max_distinct_envy: 4,
            tier_window: 2_000,
        }
    }
}

impl SolverLimits {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CalcResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            CalcError::Config(format!("Failed to read limits file {:?}: {}", path, e))
        })?;
        let limits: SolverLimits = serde_json::from_str(&content)?;
        limits.validate()?;
        Ok(limits)
    }

    /// Zero-width bands or budgets would make the solver spin or return nothing.
    pub fn validate(&self) -> CalcResult<()> {
        if self.band_width == 0 {
            return Err(CalcError::Config("band_width must be positive".into()));
        }
        if self.max_distinct_envy == 0 {
            return Err(CalcError::Config("max_distinct_envy must be positive".into()));
        }
        if self.max_solutions_per_pass == 0 || self.max_accepted_solutions == 0 {
            return Err(CalcError::Config("solution budgets must be positive".into()));
        }
        Ok(())
    }

    /// Applies only the flags the user actually typed, so a JSON file stays the base.
    pub fn merge_from_cli(&mut self, cli_limits: &SolverLimits, matches: &ArgMatches) {
        macro_rules! update_if_present {
            ($field:ident) => {
                if matches.value_source(stringify!($field)) == Some(ValueSource::CommandLine) {
                    self.$field = cli_limits.$field;
                }
            };
        }

        update_if_present!(max_envy_combo_results);
        update_if_present!(max_solutions_per_pass);
        update_if_present!(max_diversity_per_signature);
        update_if_present!(max_ban_iterations);
        update_if_present!(max_accepted_solutions);
        update_if_present!(max_search_steps);
        update_if_present!(dp_search_cap);
        update_if_present!(band_width);
        update_if_present!(max_distinct_envy);
        update_if_present!(tier_window);
    }
}

/// User constraints that shape the two point-item catalogs.
#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogParams {
    /// Highest event bonus (%) the player can field.
    #[arg(long, default_value_t = 300)]
    pub max_bonus: u32,

    /// Only use Envy brackets that finish below 20,000 score.
    #[arg(long, default_value_t = false)]
    pub zero_score_only: bool,

    /// MySekai power the player has (0 .. 31.5).
    #[arg(long)]
    pub max_power: Option<f64>,

    /// Score ceiling for Envy brackets, in units of 10,000.
    #[arg(long)]
    pub max_item_score: Option<f64>,
}

impl Default for CatalogParams {
    fn default() -> Self {
        Self {
            max_bonus: 300,
            zero_score_only: false,
            max_power: None,
            max_item_score: None,
        }
    }
}

/// Deck inputs for score-range projection.
#[derive(Args, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RangeParams {
    #[arg(long, default_value_t = 293_231)]
    pub total_power: u32,

    /// Skill values, leader first.
    #[arg(long, default_value = "120,100,100,100,100")]
    pub skills: String,

    #[arg(long, default_value_t = LiveMode::Auto)]
    pub mode: LiveMode,

    #[arg(long, default_value_t = 250)]
    pub event_bonus: u32,

    /// Fire spent per play.
    #[arg(long, default_value_t = 0)]
    pub energy: usize,
}

impl Default for RangeParams {
    fn default() -> Self {
        Self {
            total_power: 293_231,
            skills: "120,100,100,100,100".to_string(),
            mode: LiveMode::Auto,
            event_bonus: 250,
            energy: 0,
        }
    }
}

impl RangeParams {
    pub fn get_skills(&self) -> CalcResult<[u32; 5]> {
        parse_u32_array::<5>(&self.skills, "skills")
    }
}

fn parse_u32_array<const N: usize>(s: &str, name: &str) -> CalcResult<[u32; N]> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != N {
        return Err(CalcError::Config(format!(
            "--{} requires {} values",
            name, N
        )));
    }
    let mut arr = [0; N];
    for (i, p) in parts.iter().enumerate() {
        arr[i] = p
            .trim()
            .parse()
            .map_err(|_| CalcError::Config(format!("Invalid number in {}: '{}'", name, p)))?;
    }
    Ok(arr)
}
