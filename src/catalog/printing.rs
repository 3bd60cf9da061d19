use dashmap::DashMap;
use serde::Serialize;
use tracing::info;

use crate::catalog::records::matches_search;
use crate::core::error::CatalogError;
use crate::models::card::PrintableIndividual;

/// Card layout returned in place of a rendered PDF
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardPreview {
    pub file_name: String,
    pub title: &'static str,
    pub id: String,
    pub name: String,
    pub date_of_birth: String,
    pub address: String,
    pub enrollment_date: String,
}

pub struct PrintQueue {
    individuals: DashMap<String, PrintableIndividual>,
    order: Vec<String>,
}

impl PrintQueue {
    pub fn new(individuals: Vec<PrintableIndividual>) -> Self {
        let order = individuals.iter().map(|p| p.id.clone()).collect();
        let individuals = individuals.into_iter().map(|p| (p.id.clone(), p)).collect();
        Self { individuals, order }
    }

    pub fn search(&self, search: Option<&str>) -> Vec<PrintableIndividual> {
        let needle = search.map(str::to_lowercase).unwrap_or_default();

        self.order
            .iter()
            .filter_map(|id| self.individuals.get(id).map(|p| p.value().clone()))
            .filter(|p| matches_search(&needle, &[p.name.as_str(), p.id.as_str()]))
            .collect()
    }

    /// Mark a card printed. Printing twice is allowed.
    pub fn print(&self, id: &str) -> Result<PrintableIndividual, CatalogError> {
        let mut person = self
            .individuals
            .get_mut(id)
            .ok_or_else(|| CatalogError::NotFound(format!("individual {}", id)))?;

        let reprint = person.card_printed;
        person.card_printed = true;
        info!(id, name = %person.name, reprint, "Card sent to printer");

        Ok(person.value().clone())
    }

    pub fn pdf(&self, id: &str) -> Result<CardPreview, CatalogError> {
        let person = self
            .individuals
            .get(id)
            .ok_or_else(|| CatalogError::NotFound(format!("individual {}", id)))?;

        info!(id, name = %person.name, "Generating card PDF");

        Ok(CardPreview {
            file_name: format!("{}.pdf", person.id),
            title: "NATIONAL IDENTITY CARD",
            id: person.id.clone(),
            name: person.name.clone(),
            date_of_birth: person.date_of_birth.clone(),
            address: person.address.clone(),
            enrollment_date: person.enrollment_date.clone(),
        })
    }

    pub fn printed_count(&self) -> usize {
        self.individuals.iter().filter(|p| p.card_printed).count()
    }
}
