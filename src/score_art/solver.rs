use super::types::{Catalogs, Combination, ItemKind, ItemRef, PointItem};
use crate::config::SolverLimits;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Finds combinations of catalog items that add up to exactly `gap`.
///
/// Unless `allow_non_mod5` is set, Envy items are narrowed to brackets whose
/// bonus is a multiple of 5 first. The search runs in passes; after each pass
/// any Envy value that tops more than `max_diversity_per_signature` accepted
/// results is banned and the search reruns without it.
pub fn solve_gap(
    gap: i64,
    catalogs: &Catalogs,
    allow_non_mod5: bool,
    limits: &SolverLimits,
) -> Vec<Combination> {
    let Ok(gap) = u32::try_from(gap) else {
        return Vec::new();
    };
    if gap == 0 {
        return Vec::new();
    }

    let envy = if allow_non_mod5 {
        catalogs.envy.clone()
    } else {
        filter_mod5(&catalogs.envy)
    };

    let mut banned: HashSet<u32> = HashSet::new();
    let mut seen: HashSet<Vec<(ItemKind, u32)>> = HashSet::new();
    let mut per_signature: HashMap<Option<u32>, usize> = HashMap::new();
    let mut accepted: Vec<Combination> = Vec::new();

    for iteration in 0..limits.max_ban_iterations {
        let current: Vec<ItemRef> = envy
            .iter()
            .filter(|item| !banned.contains(&item.ep()))
            .cloned()
            .collect();

        let pass = run_pass(gap, &current, &catalogs.my_sekai, limits);
        let pass_len = pass.len();
        let mut fresh = 0;
        let mut saturated: Vec<u32> = Vec::new();

        for combo in pass {
            if accepted.len() >= limits.max_accepted_solutions {
                break;
            }
            let key = combo.key();
            if seen.contains(&key) {
                continue;
            }
            let signature = combo.top_envy();
            let count = per_signature.entry(signature).or_default();
            if *count >= limits.max_diversity_per_signature {
                saturated.extend(signature);
                continue;
            }
            *count += 1;
            if *count >= limits.max_diversity_per_signature {
                saturated.extend(signature);
            }
            seen.insert(key);
            accepted.push(combo);
            fresh += 1;
        }

        debug!(
            "Pass {}: {} found, {} new, {} accepted, {} Envy items in play",
            iteration,
            pass_len,
            fresh,
            accepted.len(),
            current.len()
        );

        if fresh == 0 || accepted.len() >= limits.max_accepted_solutions {
            break;
        }

        let mut newly_banned = false;
        for ep in saturated {
            newly_banned |= banned.insert(ep);
        }
        if !newly_banned {
            break;
        }
        debug!("Banned Envy values: {:?}", banned);
    }

    accepted
}

/// Keeps only mod-5 brackets on Envy items; items left without any are dropped.
pub fn filter_mod5(envy: &[ItemRef]) -> Vec<ItemRef> {
    envy.iter()
        .filter_map(|item| match item.as_ref() {
            PointItem::Envy(e) => e.mod5_only().map(|e| Arc::new(PointItem::Envy(e))),
            PointItem::MySekai(_) => Some(Arc::clone(item)),
        })
        .collect()
}

/// `reachable[s]` is true when Envy items (unbounded repeats) can sum to `s`.
pub fn reachability(envy: &[ItemRef], limit: u32) -> Vec<bool> {
    let limit = limit as usize;
    let mut reachable = vec![false; limit + 1];
    reachable[0] = true;
    for item in envy {
        let ep = item.ep() as usize;
        if ep == 0 || ep > limit {
            continue;
        }
        for s in ep..=limit {
            if reachable[s - ep] {
                reachable[s] = true;
            }
        }
    }
    reachable
}

/// Upper edges of the remainder bands: `width, 2*width, ..` up to `limit`,
/// with `limit` itself closing the last band.
pub fn band_thresholds(limit: u32, width: u32) -> Vec<u32> {
    let mut thresholds: Vec<u32> = if width == 0 {
        Vec::new()
    } else {
        (width..=limit).step_by(width as usize).collect()
    };
    if thresholds.last().is_none_or(|&t| t < limit) {
        thresholds.push(limit);
    }
    thresholds
}

/// One search pass over a fixed Envy catalog.
fn run_pass(gap: u32, envy: &[ItemRef], my_sekai: &[ItemRef], limits: &SolverLimits) -> Vec<Combination> {
    let dp_limit = gap.min(limits.dp_search_cap);
    let reachable = reachability(envy, dp_limit);
    // Remainders past the table go straight to the search.
    let is_reachable = |r: u32| r > dp_limit || reachable[r as usize];

    let mut search = EnvySearch::new(envy, limits);
    let budget = limits.max_solutions_per_pass;
    let mut solutions = Vec::new();

    if my_sekai.is_empty() {
        if is_reachable(gap) {
            for path in search.combinations(gap).iter().take(budget) {
                solutions.push(compose(None, 0, path, envy));
            }
        }
        return solutions;
    }

    let mut lower: Option<u32> = None;
    let mut pure_envy_done = false;

    'bands: for &threshold in &band_thresholds(dp_limit, limits.band_width) {
        for m_item in my_sekai {
            let ep = m_item.ep();
            if ep == 0 {
                continue;
            }
            let min_count = gap.saturating_sub(threshold).div_ceil(ep);
            let max_count = gap / ep;

            for count in (min_count..=max_count).rev() {
                let remainder = gap - ep * count;
                if remainder > threshold {
                    break;
                }
                if lower.is_some_and(|l| remainder <= l) {
                    continue;
                }
                if count == 0 {
                    // Identical for every MySekai item.
                    if pure_envy_done {
                        continue;
                    }
                    pure_envy_done = true;
                }
                if !is_reachable(remainder) {
                    continue;
                }

                for path in search.combinations(remainder) {
                    if solutions.len() >= budget {
                        break 'bands;
                    }
                    solutions.push(compose(Some(m_item), count, path, envy));
                }
            }
        }
        lower = Some(threshold);
    }

    solutions
}

fn compose(m_item: Option<&ItemRef>, count: u32, path: &[usize], envy: &[ItemRef]) -> Combination {
    let mut items = Vec::with_capacity(count as usize + path.len());
    if let Some(m) = m_item {
        items.extend((0..count).map(|_| Arc::clone(m)));
    }
    items.extend(path.iter().map(|&i| Arc::clone(&envy[i])));
    Combination { items }
}

/// Memoized enumeration of Envy multisets summing to a target.
///
/// Paths are indices into the catalog in non-decreasing order, so each
/// multiset is produced once. A path may use at most `max_distinct` different
/// items; repeats of the same item are free.
pub struct EnvySearch<'a> {
    items: &'a [ItemRef],
    max_results: usize,
    max_distinct: usize,
    max_steps: usize,
    memo: HashMap<u32, Vec<Vec<usize>>>,
}

impl<'a> EnvySearch<'a> {
    pub fn new(items: &'a [ItemRef], limits: &SolverLimits) -> Self {
        Self {
            items,
            max_results: limits.max_envy_combo_results,
            max_distinct: limits.max_distinct_envy,
            max_steps: limits.max_search_steps,
            memo: HashMap::new(),
        }
    }

    pub fn combinations(&mut self, target: u32) -> &[Vec<usize>] {
        if !self.memo.contains_key(&target) {
            let found = self.enumerate(target);
            self.memo.insert(target, found);
        }
        &self.memo[&target]
    }

    fn enumerate(&self, target: u32) -> Vec<Vec<usize>> {
        let mut results: Vec<Vec<usize>> = Vec::new();
        if target == 0 {
            results.push(Vec::new());
            return results;
        }

        let mut path: Vec<usize> = Vec::new();
        let mut rem = target;
        let mut distinct = 0;
        let mut next = 0;
        let mut steps = 0;

        loop {
            steps += 1;
            if steps > self.max_steps {
                debug!("Envy search for {} stopped after {} steps", target, self.max_steps);
                break;
            }

            if let Some((i, d)) = self.next_candidate(next, rem, distinct, path.last()) {
                path.push(i);
                rem -= self.items[i].ep();
                distinct = d;
                if rem != 0 {
                    next = i;
                    continue;
                }
                results.push(path.clone());
                if results.len() >= self.max_results {
                    break;
                }
            }

            // Backtrack: drop the last pick and try the next item in its place.
            let Some(i) = path.pop() else {
                break;
            };
            rem += self.items[i].ep();
            if path.last() != Some(&i) {
                distinct -= 1;
            }
            next = i + 1;
        }

        results
    }

    /// First item at or after `from` that fits `rem` without breaking the
    /// distinct cap. Larger items are skipped, not treated as a stop.
    fn next_candidate(
        &self,
        from: usize,
        rem: u32,
        distinct: usize,
        last: Option<&usize>,
    ) -> Option<(usize, usize)> {
        (from..self.items.len()).find_map(|i| {
            let ep = self.items[i].ep();
            if ep == 0 || ep > rem {
                return None;
            }
            let d = if last == Some(&i) { distinct } else { distinct + 1 };
            (d <= self.max_distinct).then_some((i, d))
        })
    }
}
