//! Diagnostic estimate of a strong selection.
//!
//! This is a greedy heuristic, not a solver: stories are ranked by weight
//! score per unit of combined cost and taken while they fit. It can miss the
//! true maximum (a 0/1 knapsack over two budgets) and must never feed the
//! scoring path.

use super::catalog::Catalog;
use super::domain::{ResourceLimits, ResourceTotals, Story, StoryId, Weights};
use serde::Serialize;
use std::cmp::Ordering;

pub const HEURISTIC_NOTICE: &str =
    "greedy efficiency ordering; a reference estimate, not a guaranteed optimum";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedStory {
    pub id: StoryId,
    pub score: u32,
    pub efficiency: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GreedyEstimate {
    pub estimated_score: u32,
    pub stories: Vec<StoryId>,
    pub used: ResourceTotals,
    pub limits: ResourceLimits,
    pub notice: &'static str,
}

/// Unperturbed weight sum of a single story.
pub fn story_score(story: &Story, weights: &Weights) -> u32 {
    story
        .categories()
        .fold(0u32, |sum, category| sum.saturating_add(weights.get(category)))
}

fn efficiency(story: &Story, score: u32) -> f64 {
    let cost = f64::from(story.ru) + f64::from(story.slots);
    if cost > 0.0 {
        f64::from(score) / cost
    } else if score > 0 {
        f64::INFINITY
    } else {
        0.0
    }
}

/// Catalog ranked by descending efficiency; ties keep catalog order.
pub fn rank_by_efficiency(catalog: &Catalog, weights: &Weights) -> Vec<RankedStory> {
    let mut ranked: Vec<RankedStory> = catalog
        .stories()
        .iter()
        .map(|story| {
            let score = story_score(story, weights);
            RankedStory {
                id: story.id.clone(),
                score,
                efficiency: efficiency(story, score),
            }
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.efficiency
            .partial_cmp(&a.efficiency)
            .unwrap_or(Ordering::Equal)
    });
    ranked
}

pub fn estimate(catalog: &Catalog, weights: &Weights, limits: ResourceLimits) -> GreedyEstimate {
    let mut used = ResourceTotals::default();
    let mut estimated_score = 0u32;
    let mut stories = Vec::new();

    for ranked in rank_by_efficiency(catalog, weights) {
        let Some(story) = catalog.get(&ranked.id) else {
            continue;
        };
        let prospective = used.with_story(story);
        if limits.admits(prospective) {
            used = prospective;
            estimated_score = estimated_score.saturating_add(ranked.score);
            stories.push(ranked.id);
        }
    }

    GreedyEstimate {
        estimated_score,
        stories,
        used,
        limits,
        notice: HEURISTIC_NOTICE,
    }
}
