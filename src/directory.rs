//! Translator directory.
//!
//! In-memory listing of the translators shown on the site. Loaded once at
//! startup and shared read-only.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::models::Translator;

/// Read-only translator lookup
#[derive(Debug, Clone)]
pub struct Directory {
    translators: Arc<Vec<Translator>>,
    by_id: Arc<HashMap<String, usize>>,
}

impl Directory {
    pub fn new(translators: Vec<Translator>) -> Self {
        let by_id = translators
            .iter()
            .enumerate()
            .map(|(index, t)| (t.id.clone(), index))
            .collect();

        Self {
            translators: Arc::new(translators),
            by_id: Arc::new(by_id),
        }
    }

    /// Directory seeded with the demo listing
    pub fn demo() -> Self {
        Self::new(demo_translators())
    }

    /// All translators, in listing order
    pub fn list(&self) -> &[Translator] {
        &self.translators
    }

    pub fn get(&self, id: &str) -> Result<&Translator> {
        self.by_id
            .get(id)
            .map(|&index| &self.translators[index])
            .ok_or_else(|| AppError::TranslatorNotFound(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.translators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.translators.is_empty()
    }
}

#[allow(clippy::too_many_arguments)]
fn translator(
    id: &str,
    name: &str,
    specialty: &str,
    rating: f32,
    price_per_hour: f64,
    languages: &[&str],
    location: &str,
    availability: &str,
    completed_sessions: u32,
) -> Translator {
    Translator {
        id: id.to_string(),
        name: name.to_string(),
        specialty: specialty.to_string(),
        rating,
        price_per_hour,
        languages: languages.iter().map(|l| l.to_string()).collect(),
        image: format!("/images/translators/{}.jpg", id),
        location: location.to_string(),
        availability: availability.to_string(),
        completed_sessions,
    }
}

fn demo_translators() -> Vec<Translator> {
    vec![
        translator(
            "1",
            "Marie Dubois",
            "Juridique",
            4.9,
            50.0,
            &["Français", "Anglais", "Espagnol"],
            "Paris, France",
            "Disponible maintenant",
            234,
        ),
        translator(
            "2",
            "Ahmed Benali",
            "Médical",
            4.8,
            40.0,
            &["Arabe", "Français", "Anglais"],
            "Lyon, France",
            "Disponible aujourd'hui",
            189,
        ),
        translator(
            "3",
            "Sofia Rossi",
            "Commercial",
            4.7,
            45.0,
            &["Italien", "Français", "Allemand"],
            "Marseille, France",
            "Disponible demain",
            156,
        ),
        translator(
            "4",
            "Li Wei",
            "Technique",
            5.0,
            75.0,
            &["Chinois", "Anglais", "Français"],
            "Bordeaux, France",
            "Disponible maintenant",
            312,
        ),
    ]
}
