//! Translator listing models

use serde::Serialize;

use crate::booking::TranslatorOffering;

/// Translator record as shown on a listing card
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Translator {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub rating: f32,
    pub price_per_hour: f64,
    pub languages: Vec<String>,
    pub image: String,
    pub location: String,
    pub availability: String,
    pub completed_sessions: u32,
}

impl Translator {
    /// The part of the record the booking evaluator prices against
    pub fn offering(&self) -> TranslatorOffering {
        TranslatorOffering {
            id: self.id.clone(),
            price_per_hour: self.price_per_hour,
        }
    }
}
