use serde::{Deserialize, Serialize};

/// Kind of operation a search is looking for
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationType {
    Alquiler,
    Venta,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "ARS")]
    Ars,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Departamento,
    Casa,
    Ph,
    Local,
    Oficina,
}

/// Structured filters handed to the listings backend.
///
/// A `None` field means "no constraint on this dimension" and is left out of
/// the serialized JSON entirely.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<OperationType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_price: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bedrooms: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_salary_guarantors: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pets_allowed: Option<bool>,
}

impl SearchFilters {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of interpreting a free-text query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedSearch {
    pub query_text: String,
    pub filters: SearchFilters,
    pub interpretation: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ListingStatus {
    #[default]
    Published,
    Paused,
}

/// A landlord-submitted listing as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PropertyListing {
    pub id: String,
    pub owner_name: String,
    pub owner_email: String,
    pub owner_phone: String,
    pub property_address: String,
    pub property_type_and_size: String,
    pub price_period_currency: String,
    pub has_salary_guarantors: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guarantors_min_salary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pets_quantity_size_and_type: Option<String>,
    pub has_landlord_guarantors: String,
    pub status: ListingStatus,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A landlord account. The same contact details travel with every listing
/// upsert.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LandlordUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// A tenant account and its search preferences
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TenantUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub property_address: Option<String>,
    pub property_type_and_size: Option<String>,
    pub price_period_currency: Option<String>,
    pub has_salary_guarantors: Option<bool>,
    pub guarantors_min_salary: Option<String>,
    #[serde(rename = "guarantorsCUIL")]
    pub guarantors_cuil: Vec<String>,
    pub pets_quantity_size_and_type: Option<String>,
    pub has_landlord_guarantors: Option<String>,
}
