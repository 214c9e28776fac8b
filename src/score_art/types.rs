use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// One cell of the Envy table: scoring inside `[min_score, max_score]` with
/// `bonus`% event bonus yields the bucket's base points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bracket {
    pub min_score: u32,
    pub max_score: u32,
    pub bonus: u32,
}

impl Bracket {
    pub fn is_mod5(&self) -> bool {
        self.bonus % 5 == 0
    }
}

/// Base points -> every bracket that awards them.
pub type LookupTable = BTreeMap<u32, Vec<Bracket>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvyDetail {
    pub energy: usize,
    #[serde(rename = "baseEP")]
    pub base_ep: u32,
    #[serde(rename = "details")]
    pub brackets: Vec<Bracket>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnvyItem {
    pub ep: u32,
    pub details: Vec<EnvyDetail>,
}

impl EnvyItem {
    pub fn has_mod5_bracket(&self) -> bool {
        self.details
            .iter()
            .any(|d| d.brackets.iter().any(Bracket::is_mod5))
    }

    /// Copy with only mod-5 brackets, or `None` if none survive.
    pub fn mod5_only(&self) -> Option<EnvyItem> {
        let details: Vec<EnvyDetail> = self
            .details
            .iter()
            .filter_map(|d| {
                let brackets: Vec<Bracket> =
                    d.brackets.iter().copied().filter(Bracket::is_mod5).collect();
                (!brackets.is_empty()).then(|| EnvyDetail {
                    brackets,
                    ..d.clone()
                })
            })
            .collect();
        (!details.is_empty()).then_some(EnvyItem {
            ep: self.ep,
            details,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerRequirement {
    pub power_idx: usize,
    pub req_mult: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MySekaiDetail {
    pub pt: u32,
    pub valid_reqs: Vec<PowerRequirement>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MySekaiItem {
    pub ep: u32,
    pub details: Vec<MySekaiDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PointItem {
    Envy(EnvyItem),
    MySekai(MySekaiItem),
}

impl PointItem {
    pub fn ep(&self) -> u32 {
        match self {
            PointItem::Envy(item) => item.ep,
            PointItem::MySekai(item) => item.ep,
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            PointItem::Envy(_) => ItemKind::Envy,
            PointItem::MySekai(_) => ItemKind::MySekai,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ItemKind {
    MySekai,
    Envy,
}

pub type ItemRef = Arc<PointItem>;

/// Items whose points add up to one gap. Repeats are separate entries.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Combination {
    pub items: Vec<ItemRef>,
}

impl Combination {
    pub fn total(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.ep())).sum()
    }

    pub fn envy_items(&self) -> impl Iterator<Item = &EnvyItem> {
        self.items.iter().filter_map(|i| match i.as_ref() {
            PointItem::Envy(e) => Some(e),
            PointItem::MySekai(_) => None,
        })
    }

    /// Number of different Envy point values used.
    pub fn distinct_envy(&self) -> usize {
        let mut eps: Vec<u32> = self.envy_items().map(|e| e.ep).collect();
        eps.sort_unstable();
        eps.dedup();
        eps.len()
    }

    /// Largest Envy value in the combination, if any.
    pub fn top_envy(&self) -> Option<u32> {
        self.envy_items().map(|e| e.ep).max()
    }

    /// Order-independent identity used to drop duplicates across passes.
    pub fn key(&self) -> Vec<(ItemKind, u32)> {
        let mut key: Vec<(ItemKind, u32)> =
            self.items.iter().map(|i| (i.kind(), i.ep())).collect();
        key.sort_unstable();
        key
    }
}

/// The two candidate lists fed to the gap solver, each sorted for search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalogs {
    pub envy: Vec<ItemRef>,
    pub my_sekai: Vec<ItemRef>,
}
