use crate::catalog::RecipeCatalog;
use crate::gateway::{export, ExportFormat, MatchSummary, PredictionGateway, PredictionResponse};
use crate::retrieval::RecipeRetriever;
use crate::utils::{truncate, validate_output_dir};
use crate::Result;
use std::path::PathBuf;

/// Resolve a craving and print the match
pub async fn resolve(retriever: &RecipeRetriever, query: &str) -> Result<()> {
    let result = retriever.resolve(query).await?;

    println!("✓ Matched recipe: {}", result.recipe_name);
    println!("  Similarity: {:.3}", result.score);

    Ok(())
}

/// Resolve a craving, then print the prediction for the matched recipe
pub async fn analyze(
    retriever: &RecipeRetriever,
    gateway: &PredictionGateway,
    query: &str,
) -> Result<()> {
    let result = retriever.resolve(query).await?;
    println!(
        "✓ Matched recipe: {} (similarity {:.3})",
        result.recipe_name, result.score
    );

    let prediction = gateway.predict(&result.recipe_name).await?;
    print_prediction(&result.recipe_name, &prediction);

    Ok(())
}

/// Print the prediction for a recipe name
pub async fn predict(gateway: &PredictionGateway, recipe: &str) -> Result<()> {
    let prediction = gateway.predict(recipe).await?;
    print_prediction(recipe, &prediction);
    Ok(())
}

/// Print catalog names
pub fn list_recipes(catalog: &RecipeCatalog, limit: Option<usize>) {
    if catalog.is_empty() {
        println!("No recipes in catalog");
        return;
    }

    let limit = limit.unwrap_or(catalog.len());
    for (i, name) in catalog.iter().take(limit).enumerate() {
        println!("{:>5}  {}", i, name);
    }

    if limit < catalog.len() {
        println!("  ... {} more", catalog.len() - limit);
    }
}

/// Write matches for a recipe to `<output>/<recipe>_matches.<ext>`
pub async fn export(
    gateway: &PredictionGateway,
    recipe: &str,
    format: ExportFormat,
    output_dir: Option<String>,
) -> Result<PathBuf> {
    let prediction = gateway.predict(recipe).await?;
    let content = export::render(recipe, &prediction.matches, format)?;
    let file_name = export::export_file_name(recipe, format);

    let output_path = match output_dir {
        Some(dir) => {
            let validated_dir = validate_output_dir(&dir)?;
            tokio::fs::create_dir_all(&validated_dir).await?;
            validated_dir.join(file_name)
        }
        None => PathBuf::from(file_name),
    };

    tokio::fs::write(&output_path, content).await?;

    println!("✓ Exported {} matches: {}", prediction.matches.len(), output_path.display());
    Ok(output_path)
}

fn print_prediction(recipe: &str, prediction: &PredictionResponse) {
    let Some(summary) = MatchSummary::from_response(prediction) else {
        println!("No matches found.");
        return;
    };

    println!("\nFound {} matches for '{}'\n", summary.match_count, recipe);
    print_summary(&summary);

    println!(
        "\n{:<24} {:<32} {:>6} {:>8} {:>7} {:>7} {:>7}",
        "Ingredient", "Product", "Score", "kcal", "Carbs", "Protein", "Fat"
    );
    println!("{}", "-".repeat(97));

    for m in &prediction.matches {
        println!(
            "{:<24} {:<32} {:>6.1} {:>8.0} {:>7.1} {:>7.1} {:>7.1}",
            truncate(&m.searched_ingredient, 22),
            truncate(&m.matched_product, 30),
            m.match_score,
            m.energy_kcal_100g,
            m.carbohydrates_100g,
            m.proteins_100g,
            m.fat_100g
        );
    }
}

fn print_summary(summary: &MatchSummary) {
    println!("  Ingredients:      {}", summary.ingredient_count);
    println!("  Avg match score:  {:.1}%", summary.average_match_score);
    println!("  Total calories:   {:.0}", summary.total_kcal);
    println!(
        "  Avg per 100g:     {:.0} kcal, {:.1}g carbs, {:.1}g protein, {:.1}g fat",
        summary.nutrition.calories,
        summary.nutrition.carbs,
        summary.nutrition.protein,
        summary.nutrition.fat
    );
}
