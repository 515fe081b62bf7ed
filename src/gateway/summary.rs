use crate::gateway::models::{IngredientMatch, PredictionResponse};
use serde::Serialize;

pub const HISTOGRAM_BINS: usize = 20;
const MAX_MATCH_SCORE: f64 = 100.0;

/// Aggregate metrics over a prediction's ingredient matches
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchSummary {
    pub ingredient_count: usize,
    pub match_count: usize,
    pub average_match_score: f64,
    pub total_kcal: f64,
    /// Mean nutrition per 100 g across matches
    pub nutrition: NutritionProfile,
    pub score_histogram: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NutritionProfile {
    pub calories: f64,
    pub carbs: f64,
    pub protein: f64,
    pub fat: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

impl MatchSummary {
    /// `None` when the prediction has no matches
    pub fn from_response(response: &PredictionResponse) -> Option<Self> {
        let matches = &response.matches;
        if matches.is_empty() {
            return None;
        }

        let n = matches.len() as f64;
        let mean = |f: fn(&IngredientMatch) -> f64| matches.iter().map(f).sum::<f64>() / n;

        Some(Self {
            ingredient_count: response.ingredients.len(),
            match_count: matches.len(),
            average_match_score: mean(|m| m.match_score),
            total_kcal: matches.iter().map(|m| m.energy_kcal_100g).sum(),
            nutrition: NutritionProfile {
                calories: mean(|m| m.energy_kcal_100g),
                carbs: mean(|m| m.carbohydrates_100g),
                protein: mean(|m| m.proteins_100g),
                fat: mean(|m| m.fat_100g),
            },
            score_histogram: score_histogram(matches),
        })
    }
}

/// Equal-width bins over [0, 100]; 100 lands in the last bin and scores
/// outside the range are clamped into the edge bins.
pub fn score_histogram(matches: &[IngredientMatch]) -> Vec<HistogramBin> {
    let width = MAX_MATCH_SCORE / HISTOGRAM_BINS as f64;
    let mut counts = [0usize; HISTOGRAM_BINS];

    for m in matches.iter().filter(|m| m.match_score.is_finite()) {
        let clamped = m.match_score.clamp(0.0, MAX_MATCH_SCORE);
        let bin = ((clamped / width) as usize).min(HISTOGRAM_BINS - 1);
        counts[bin] += 1;
    }

    counts
        .iter()
        .enumerate()
        .map(|(i, &count)| HistogramBin {
            lower: i as f64 * width,
            upper: (i + 1) as f64 * width,
            count,
        })
        .collect()
}
