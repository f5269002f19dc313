//! Priority ranking of role-level roadmap items.

use crate::roadmap::{PlanningHorizon, Roadmap, RoleLeverItem};
use crate::types::Category;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TOP_N: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedItem {
    pub rank: usize,
    pub category: Category,
    pub item: RoleLeverItem,
}

/// Upstream category when present, otherwise the timing table.
pub fn category_for(item: &RoleLeverItem, horizon: &PlanningHorizon) -> Category {
    item.category
        .clone()
        .unwrap_or_else(|| Category::for_timing(horizon.offset(item.year), item.lever))
}

/// Largest impacts first, truncated to `n`, ranked 1..=n. Equal impacts keep
/// input order.
pub fn rank(items: &[RoleLeverItem], horizon: &PlanningHorizon, n: usize) -> Vec<RankedItem> {
    let mut sorted: Vec<&RoleLeverItem> = items.iter().collect();
    sorted.sort_by(|a, b| b.effective_ftes().total_cmp(&a.effective_ftes()));
    sorted
        .into_iter()
        .take(n)
        .enumerate()
        .map(|(i, item)| RankedItem {
            rank: i + 1,
            category: category_for(item, horizon),
            item: item.clone(),
        })
        .collect()
}

/// Rank every productivity and offshoring item across all years.
pub fn rank_roadmap(roadmap: &Roadmap, horizon: &PlanningHorizon, n: usize) -> Vec<RankedItem> {
    rank(&roadmap.role_items(), horizon, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roadmap::assemble;
    use crate::roadmap::tests::role_item;
    use crate::types::RoleLever;

    #[test]
    fn top_twenty_of_twenty_five() {
        let items: Vec<RoleLeverItem> = (1..=25)
            .map(|i| role_item("support", RoleLever::Productivity, 2026, (i * 2) as f64))
            .collect();
        let ranked = rank(&items, &PlanningHorizon::default(), DEFAULT_TOP_N);
        assert_eq!(ranked.len(), 20);
        assert_eq!(ranked[0].item.impact_ftes, 50.0);
        for (i, r) in ranked.iter().enumerate() {
            assert_eq!(r.rank, i + 1);
        }
        for pair in ranked.windows(2) {
            assert!(pair[0].item.impact_ftes > pair[1].item.impact_ftes);
        }
    }

    #[test]
    fn fewer_items_than_n_returns_all() {
        let items = vec![
            role_item("support", RoleLever::Productivity, 2026, 1.0),
            role_item("support", RoleLever::Offshoring, 2026, 3.0),
        ];
        let ranked = rank(&items, &PlanningHorizon::default(), 20);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].item.lever, RoleLever::Offshoring);
        assert!(rank(&[], &PlanningHorizon::default(), 20).is_empty());
    }

    #[test]
    fn categories_follow_timing_unless_supplied() {
        let horizon = PlanningHorizon::default();
        let mut upstream = role_item("cs", RoleLever::Productivity, 2028, 1.0);
        upstream.category = Some(Category::QuickWin);
        let items = vec![
            role_item("cs", RoleLever::Productivity, 2026, 6.0),
            role_item("cs", RoleLever::Offshoring, 2026, 5.0),
            role_item("cs", RoleLever::Productivity, 2027, 4.0),
            role_item("cs", RoleLever::Offshoring, 2028, 3.0),
            upstream,
        ];
        let cats: Vec<Category> = rank(&items, &horizon, 10).into_iter().map(|r| r.category).collect();
        assert_eq!(
            cats,
            vec![
                Category::QuickWin,
                Category::NearTerm,
                Category::MediumTerm,
                Category::Transformation,
                Category::QuickWin,
            ]
        );
    }

    #[test]
    fn ranks_across_roadmap_years() {
        let horizon = PlanningHorizon::default();
        let roadmap = assemble(
            &[
                role_item("cs", RoleLever::Productivity, 2026, 2.0).into(),
                role_item("ps", RoleLever::Offshoring, 2028, 9.0).into(),
            ],
            &horizon,
        );
        let ranked = rank_roadmap(&roadmap, &horizon, DEFAULT_TOP_N);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].item.year, 2028);
        assert_eq!(ranked[0].category, Category::Transformation);
    }
}
