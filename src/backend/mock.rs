use crate::backend::traits::ListingSource;
use crate::models::{ListingStatus, PropertyListing, SearchFilters};
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

/// Fixed sample listings, used when no backend is configured
#[derive(Debug, Default)]
pub struct MockListingSource;

impl MockListingSource {
    pub fn new() -> Self {
        Self
    }

    fn sample_listings(&self) -> Vec<PropertyListing> {
        let created_at = Utc::now().to_rfc3339();

        vec![
            PropertyListing {
                id: "1".to_string(),
                owner_name: "María González".to_string(),
                owner_email: "maria@example.com".to_string(),
                owner_phone: "+54 11 9876-5432".to_string(),
                property_address: "Av. Cabildo 2500, Belgrano".to_string(),
                property_type_and_size: "Departamento 3 ambientes, 65m²".to_string(),
                price_period_currency: "USD 700/mes".to_string(),
                has_salary_guarantors: true,
                guarantors_min_salary: Some("USD 2100".to_string()),
                pets_quantity_size_and_type: Some("Acepta mascotas pequeñas".to_string()),
                has_landlord_guarantors: "libre disposición".to_string(),
                status: ListingStatus::Published,
                created_at: created_at.clone(),
                images: None,
                description: Some("Hermoso departamento luminoso con excelente ubicación.".to_string()),
            },
            PropertyListing {
                id: "2".to_string(),
                owner_name: "Carlos Rodríguez".to_string(),
                owner_email: "carlos@example.com".to_string(),
                owner_phone: "+54 11 5555-1234".to_string(),
                property_address: "Av. Santa Fe 3800, Palermo".to_string(),
                property_type_and_size: "Departamento 2 ambientes, 45m²".to_string(),
                price_period_currency: "USD 600/mes".to_string(),
                has_salary_guarantors: true,
                guarantors_min_salary: Some("USD 1800".to_string()),
                pets_quantity_size_and_type: Some("No acepta mascotas".to_string()),
                has_landlord_guarantors: "bien de familia".to_string(),
                status: ListingStatus::Published,
                created_at,
                images: None,
                description: Some("Hermoso departamento luminoso con excelente ubicación.".to_string()),
            },
        ]
    }
}

#[async_trait]
impl ListingSource for MockListingSource {
    async fn search(&self, _query_text: &str, _filters: &SearchFilters) -> Result<Vec<PropertyListing>> {
        info!("📋 Returning mock listings");
        Ok(self.sample_listings())
    }

    fn source_name(&self) -> &'static str {
        "mock"
    }
}
