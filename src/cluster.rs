/// Per-restaurant partner clustering and the top-two score product
use crate::error::{ClusterError, Result};
use crate::input::ClusterInput;
use crate::union_find::MaxUnionFind;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// A link between two partners under one restaurant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartnerEdge {
    pub from: usize,
    pub to: usize,
    pub restaurant: i64,
}

/// Score of a single restaurant: the largest partner id over its components
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestaurantScore {
    pub restaurant: i64,
    pub score: usize,
}

/// Edges grouped by restaurant id, iterated in ascending id order
#[derive(Debug, Default)]
pub struct RestaurantGroups {
    partner_count: usize,
    groups: BTreeMap<i64, Vec<(usize, usize)>>,
}

impl RestaurantGroups {
    pub fn new(partner_count: usize) -> Self {
        Self {
            partner_count,
            groups: BTreeMap::new(),
        }
    }

    /// Validate the parallel lists and group them by restaurant
    pub fn from_lists(
        partner_count: usize,
        from: &[i64],
        to: &[i64],
        restaurant_ids: &[i64],
    ) -> Result<Self> {
        if from.len() != to.len() || from.len() != restaurant_ids.len() {
            return Err(ClusterError::LengthMismatch {
                from: from.len(),
                to: to.len(),
                restaurant: restaurant_ids.len(),
            });
        }

        let mut grouped = Self::new(partner_count);
        for (index, ((&a, &b), &restaurant)) in
            from.iter().zip(to).zip(restaurant_ids).enumerate()
        {
            let from = check_partner("from", index, a, partner_count)?;
            let to = check_partner("to", index, b, partner_count)?;
            grouped.push_edge(restaurant, from, to);
        }

        Ok(grouped)
    }

    pub fn from_input(input: &ClusterInput) -> Result<Self> {
        Self::from_lists(
            input.partner_count,
            &input.from,
            &input.to,
            &input.restaurant_ids,
        )
    }

    /// Add an edge to its group, rejecting partners outside `1..=partner_count`
    pub fn add_edge(&mut self, edge: PartnerEdge) -> Result<()> {
        let index = self.num_edges();
        for (list, id) in [("from", edge.from), ("to", edge.to)] {
            if !(1..=self.partner_count).contains(&id) {
                return Err(ClusterError::PartnerOutOfRange {
                    list,
                    index,
                    value: i64::try_from(id).unwrap_or(i64::MAX),
                    partner_count: self.partner_count,
                });
            }
        }
        self.push_edge(edge.restaurant, edge.from, edge.to);
        Ok(())
    }

    fn push_edge(&mut self, restaurant: i64, from: usize, to: usize) {
        self.groups.entry(restaurant).or_default().push((from, to));
    }

    pub fn partner_count(&self) -> usize {
        self.partner_count
    }

    /// Number of groups
    pub fn num_groups(&self) -> usize {
        self.groups.len()
    }

    /// Total number of edges across all groups
    pub fn num_edges(&self) -> usize {
        self.groups.values().map(|v| v.len()).sum()
    }

    /// Edges of one restaurant, in insertion order
    pub fn get_group(&self, restaurant: i64) -> Option<&[(usize, usize)]> {
        self.groups.get(&restaurant).map(Vec::as_slice)
    }

    /// Iterate over all groups
    pub fn iter(&self) -> impl Iterator<Item = (i64, &[(usize, usize)])> {
        self.groups.iter().map(|(&id, edges)| (id, edges.as_slice()))
    }

    /// Union-find over one restaurant's edges, `None` for an unknown restaurant
    pub fn cluster(&self, restaurant: i64) -> Result<Option<MaxUnionFind>> {
        match self.groups.get(&restaurant) {
            Some(edges) => self.build_sets(edges).map(Some),
            None => Ok(None),
        }
    }

    fn build_sets(&self, edges: &[(usize, usize)]) -> Result<MaxUnionFind> {
        let mut uf = MaxUnionFind::try_new(self.partner_count).map_err(|source| {
            ClusterError::Allocation {
                partner_count: self.partner_count,
                source,
            }
        })?;
        for &(a, b) in edges {
            uf.unite(a, b);
        }
        Ok(uf)
    }

    fn score_group(&self, restaurant: i64, edges: &[(usize, usize)]) -> Result<RestaurantScore> {
        let score = self
            .build_sets(edges)?
            .largest_per_component()
            .into_iter()
            .max()
            .unwrap_or(0);
        log::debug!("restaurant {restaurant}: {} edge(s), score {score}", edges.len());
        Ok(RestaurantScore { restaurant, score })
    }
}

fn check_partner(
    list: &'static str,
    index: usize,
    value: i64,
    partner_count: usize,
) -> Result<usize> {
    match usize::try_from(value) {
        Ok(id) if (1..=partner_count).contains(&id) => Ok(id),
        _ => Err(ClusterError::PartnerOutOfRange {
            list,
            index,
            value,
            partner_count,
        }),
    }
}

/// Score every restaurant in ascending id order
pub fn score_restaurants(groups: &RestaurantGroups) -> Result<Vec<RestaurantScore>> {
    groups
        .iter()
        .map(|(restaurant, edges)| groups.score_group(restaurant, edges))
        .collect()
}

/// Same as [`score_restaurants`], one rayon task per restaurant
pub fn score_restaurants_parallel(groups: &RestaurantGroups) -> Result<Vec<RestaurantScore>> {
    let work: Vec<(i64, &[(usize, usize)])> = groups.iter().collect();
    work.into_par_iter()
        .map(|(restaurant, edges)| groups.score_group(restaurant, edges))
        .collect()
}

/// Product of the two largest scores, 0 when fewer than two exist
pub fn top_two_product(scores: &[usize]) -> Result<i64> {
    if scores.len() < 2 {
        return Ok(0);
    }

    let mut sorted = scores.to_vec();
    sorted.sort_unstable_by(|a, b| b.cmp(a));
    let (first, second) = (sorted[0], sorted[1]);

    (first as u128)
        .checked_mul(second as u128)
        .and_then(|p| i64::try_from(p).ok())
        .ok_or(ClusterError::Overflow(first, second))
}

/// Per-restaurant scores and the resulting product
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterReport {
    pub scores: Vec<RestaurantScore>,
    pub product: i64,
}

impl ClusterReport {
    pub fn from_scores(scores: Vec<RestaurantScore>) -> Result<Self> {
        let values: Vec<usize> = scores.iter().map(|s| s.score).collect();
        let product = top_two_product(&values)?;
        Ok(ClusterReport { scores, product })
    }

    /// Score `groups`, on the current rayon pool when `parallel` is set
    pub fn compute(groups: &RestaurantGroups, parallel: bool) -> Result<Self> {
        let scores = if parallel {
            score_restaurants_parallel(groups)?
        } else {
            score_restaurants(groups)?
        };
        Self::from_scores(scores)
    }
}

/// Product of the two largest per-restaurant scores for parallel edge lists
pub fn largest_partner_cluster_product(
    partner_count: usize,
    from: &[i64],
    to: &[i64],
    restaurant_ids: &[i64],
) -> Result<i64> {
    let groups = RestaurantGroups::from_lists(partner_count, from, to, restaurant_ids)?;
    Ok(ClusterReport::compute(&groups, false)?.product)
}
