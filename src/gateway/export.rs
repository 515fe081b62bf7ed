use crate::gateway::models::IngredientMatch;
use crate::utils::sanitize_filename;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Csv => "text/csv",
            Self::Json => "application/json",
        }
    }
}

/// `<recipe>_matches.<ext>`
pub fn export_file_name(recipe_name: &str, format: ExportFormat) -> String {
    let stem = sanitize_filename(recipe_name);
    let stem = if stem.is_empty() { "recipe" } else { &stem };
    format!("{stem}_matches.{}", format.extension())
}

/// Render matches in the requested format
pub fn render(recipe_name: &str, matches: &[IngredientMatch], format: ExportFormat) -> Result<String> {
    if matches.is_empty() {
        return Err(Error::NoMatches(recipe_name.to_string()));
    }

    match format {
        ExportFormat::Csv => to_csv(matches),
        ExportFormat::Json => to_json(matches),
    }
}

pub fn to_csv(matches: &[IngredientMatch]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for m in matches {
        writer
            .serialize(m)
            .map_err(|e| Error::Internal(format!("CSV export failed: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Internal(format!("CSV export failed: {e}")))?;
    String::from_utf8(bytes).map_err(|e| Error::Internal(format!("CSV export failed: {e}")))
}

pub fn to_json(matches: &[IngredientMatch]) -> Result<String> {
    Ok(serde_json::to_string_pretty(matches)?)
}
