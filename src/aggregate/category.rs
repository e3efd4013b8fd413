//! Categorical bucket keys over a text field.

use crate::classify::SignalInput;

use super::BucketKey;

/// Maps a text field onto fixed categories through lowercase aliases.
/// Unrecognised or absent values land in the `other` bucket.
#[derive(Debug, Clone)]
pub struct CategoryKey {
    field: &'static str,
    categories: Vec<(String, Vec<String>)>,
    other_label: String,
}

impl CategoryKey {
    pub fn new(field: &'static str, other_label: impl Into<String>) -> Self {
        Self {
            field,
            categories: Vec::new(),
            other_label: other_label.into(),
        }
    }

    pub fn category(mut self, label: impl Into<String>, aliases: &[&str]) -> Self {
        self.categories.push((
            label.into(),
            aliases.iter().map(|a| a.to_lowercase()).collect(),
        ));
        self
    }

    pub fn label_for(&self, raw: &str) -> &str {
        let index = self.index_of(raw);
        self.categories
            .get(index)
            .map_or(self.other_label.as_str(), |(label, _)| label.as_str())
    }

    fn index_of(&self, raw: &str) -> usize {
        let needle = raw.trim().to_lowercase();
        self.categories
            .iter()
            .position(|(_, aliases)| aliases.iter().any(|a| *a == needle))
            .unwrap_or(self.categories.len())
    }
}

impl BucketKey for CategoryKey {
    fn labels(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|(label, _)| label.clone())
            .chain(std::iter::once(self.other_label.clone()))
            .collect()
    }

    fn bucket_of(&self, input: &SignalInput<'_>) -> usize {
        self.index_of(input.record.aux_text(self.field))
    }
}

/// Gender categories used by the patient demographics report.
pub fn gender_key(field: &'static str) -> CategoryKey {
    CategoryKey::new(field, "No especificado")
        .category("Masculino", &["m", "masculino", "male", "hombre", "h"])
        .category("Femenino", &["f", "femenino", "female", "mujer"])
}
