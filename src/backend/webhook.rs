use crate::backend::traits::ListingSource;
use crate::backend::types::BackendConfig;
use crate::models::{LandlordUser, ListingStatus, PropertyListing, SearchFilters, TenantUser};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

const SEARCH_ENDPOINT: &str = "/api/listings/search";
const MINE_ENDPOINT: &str = "/api/listings/mine";
const UPSERT_ENDPOINT: &str = "/api/listings/upsert";
const TENANT_CREATE_ENDPOINT: &str = "/api/users/tenant/create";
const OWNER_CREATE_ENDPOINT: &str = "/api/users/owner/create";

/// Listing backend reached over workflow webhooks
pub struct WebhookClient {
    client: Client,
    config: BackendConfig,
}

impl WebhookClient {
    pub fn new(config: BackendConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }

    /// POST a JSON body and decode the reply whatever its status.
    /// Unparseable bodies decode to `Null`.
    async fn send(&self, endpoint: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let url = self.config.endpoint_url(endpoint);
        debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to reach backend at {}", url))?;

        let status = response.status();
        let text = response.text().await.context("Failed to read response body")?;
        let data: Value = serde_json::from_str(&text).unwrap_or(Value::Null);

        Ok((status, data))
    }

    /// POST a JSON body to a webhook endpoint and return the decoded reply
    async fn post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        let (status, data) = self.send(endpoint, body).await?;

        if !status.is_success() {
            warn!("Backend returned status: {}", status);
            let message = error_message(&data).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            anyhow::bail!(message);
        }

        Ok(data)
    }

    /// Listings owned by the given email. Any reply without `ok: true` and a
    /// listings array, whatever its status, is an empty result.
    pub async fn my_listings(&self, owner_email: &str) -> Result<Vec<PropertyListing>> {
        let email = owner_email.trim().to_lowercase();
        if email.is_empty() {
            anyhow::bail!("NOT_LOGGED_IN");
        }

        let (status, data) = self.send(MINE_ENDPOINT, &json!({ "email": email })).await?;
        if !status.is_success() {
            debug!("Listings lookup returned status {}", status);
        }

        let listings = match (data["ok"].as_bool(), data["listings"].as_array()) {
            (Some(true), Some(raw)) => raw.iter().map(listing_from_raw).collect(),
            _ => Vec::new(),
        };

        info!("Found {} listings for {}", listings.len(), email);
        Ok(listings)
    }

    /// Create or update the owner's listing. Returns the backend id when it
    /// reports one.
    pub async fn upsert_listing(&self, owner: &LandlordUser, listing: &PropertyListing) -> Result<Option<String>> {
        if owner.email.trim().is_empty() {
            anyhow::bail!("NOT_LOGGED_IN");
        }

        let data = self.post(UPSERT_ENDPOINT, &upsert_body(owner, listing)).await?;

        if data["ok"] == Value::Bool(false) {
            let message = error_message(&data).unwrap_or_else(|| "UPSERT_FAILED".to_string());
            anyhow::bail!(message);
        }

        let id = first_string(&data, &["ownerId"])
            .or_else(|| first_string(&data["listing"], &["id"]))
            .filter(|id| !id.is_empty());

        info!("Upserted listing for {}", owner.email);
        Ok(id)
    }

    /// Register a tenant. Returns the backend id when it reports one.
    pub async fn create_tenant_user(&self, tenant: &TenantUser) -> Result<Option<String>> {
        let data = self.post(TENANT_CREATE_ENDPOINT, &tenant_body(tenant)).await?;

        if data["ok"] == Value::Bool(false) {
            let message = error_message(&data["tenant"])
                .or_else(|| error_message(&data))
                .unwrap_or_else(|| "CREATE_TENANT_FAILED".to_string());
            anyhow::bail!(message);
        }

        info!("Registered tenant {}", tenant.email);
        Ok(created_id(&data, "tenant", "tenantId"))
    }

    /// Register a landlord. Returns the backend id when it reports one.
    pub async fn create_owner_user(&self, owner: &LandlordUser) -> Result<Option<String>> {
        let body = json!({
            "name": owner.name,
            "email": owner.email,
            "phone": owner.phone,
            "address": owner.address,
        });
        let data = self.post(OWNER_CREATE_ENDPOINT, &body).await?;

        if data["ok"] == Value::Bool(false) {
            let message = error_message(&data["owner"])
                .or_else(|| error_message(&data))
                .unwrap_or_else(|| "CREATE_OWNER_FAILED".to_string());
            anyhow::bail!(message);
        }

        info!("Registered owner {}", owner.email);
        Ok(created_id(&data, "owner", "ownerId"))
    }

    /// The backend has no real delete yet, so this pauses the listing.
    pub async fn delete_listing(&self, owner: &LandlordUser, listing: &PropertyListing) -> Result<()> {
        let paused = PropertyListing {
            status: ListingStatus::Paused,
            ..listing.clone()
        };
        self.upsert_listing(owner, &paused).await?;
        Ok(())
    }
}

#[async_trait]
impl ListingSource for WebhookClient {
    async fn search(&self, query_text: &str, filters: &SearchFilters) -> Result<Vec<PropertyListing>> {
        info!("Searching listings via {}", self.config.base_url);

        let body = json!({
            "queryText": query_text,
            "filters": filters,
        });
        let data = self.post(SEARCH_ENDPOINT, &body).await?;

        let listings: Vec<PropertyListing> = data["properties"]
            .as_array()
            .map(|raw| raw.iter().map(listing_from_raw).collect())
            .unwrap_or_default();

        info!("✅ Backend returned {} listings", listings.len());
        Ok(listings)
    }

    fn source_name(&self) -> &'static str {
        "n8n"
    }
}

/// Request body for the upsert webhook
pub fn upsert_body(owner: &LandlordUser, listing: &PropertyListing) -> Value {
    json!({
        "owner": {
            "name": owner.name,
            "email": owner.email.trim().to_lowercase(),
            "phone": owner.phone,
            "address": owner.address,
        },
        "listing": {
            "propertyAddress": listing.property_address,
            "propertyTypeAndSize": listing.property_type_and_size,
            "pricePeriodCurrency": listing.price_period_currency,
            "hasSalaryGuarantors": to_yes_no(listing.has_salary_guarantors),
            "guarantorsMinSalary": listing.guarantors_min_salary.clone().unwrap_or_default(),
            "petsQuantitySizeAndType": listing.pets_quantity_size_and_type.clone().unwrap_or_default(),
            "hasLandlordGuarantors": listing.has_landlord_guarantors,
            "listingStatus": listing.status,
        },
    })
}

/// Request body for the tenant registration webhook. The backend expects
/// "Sí"/"No" strings and a comma-joined CUIL list.
pub fn tenant_body(tenant: &TenantUser) -> Value {
    let text = |v: &Option<String>| v.clone().unwrap_or_default();

    json!({
        "name": tenant.name,
        "email": tenant.email,
        "phone": tenant.phone,
        "address": tenant.address,
        "propertyAddress": text(&tenant.property_address),
        "propertyTypeAndSize": text(&tenant.property_type_and_size),
        "pricePeriodCurrency": text(&tenant.price_period_currency),
        "hasSalaryGuarantors": tenant.has_salary_guarantors.map(to_yes_no).unwrap_or(""),
        "guarantorsMinSalary": text(&tenant.guarantors_min_salary),
        "guarantorsCUIL": tenant.guarantors_cuil.join(", "),
        "petsQuantitySizeAndType": text(&tenant.pets_quantity_size_and_type),
        "hasLandlordGuarantors": text(&tenant.has_landlord_guarantors),
    })
}

/// Id of a freshly created user: `{kind}.id`, then `{flat_key}`, then `id`
fn created_id(data: &Value, kind: &str, flat_key: &str) -> Option<String> {
    first_string(&data[kind], &["id"])
        .or_else(|| first_string(data, &[flat_key, "id"]))
        .filter(|id| !id.is_empty())
}

/// Map a loosely-typed backend record into a listing
pub fn listing_from_raw(raw: &Value) -> PropertyListing {
    let images = raw["images"].as_array().map(|items| {
        items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()
    });

    PropertyListing {
        id: string_field(raw, &["id", "ownerId"]),
        owner_name: string_field(raw, &["ownerName", "name"]),
        owner_email: string_field(raw, &["ownerEmail", "email"]),
        owner_phone: string_field(raw, &["ownerPhone", "phone"]),
        property_address: string_field(raw, &["propertyAddress"]),
        property_type_and_size: string_field(raw, &["propertyTypeAndSize"]),
        price_period_currency: string_field(raw, &["pricePeriodCurrency"]),
        has_salary_guarantors: to_bool(&raw["hasSalaryGuarantors"]),
        guarantors_min_salary: non_empty(raw, "guarantorsMinSalary"),
        pets_quantity_size_and_type: non_empty(raw, "petsQuantitySizeAndType"),
        has_landlord_guarantors: string_field(raw, &["hasLandlordGuarantors"]),
        status: normalize_status(&string_field(raw, &["listingStatus", "status"])),
        created_at: first_string(raw, &["createdAt", "submittedAt", "updatedAt"])
            .unwrap_or_else(|| Utc::now().to_rfc3339()),
        images,
        description: non_empty(raw, "description"),
    }
}

/// Backend booleans arrive as bools or as "Sí"/"true"/"1" style strings
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Null => false,
        other => {
            let s = stringify(other).trim().to_lowercase();
            matches!(s.as_str(), "si" | "sí" | "s" | "true" | "1")
        }
    }
}

pub fn to_yes_no(value: bool) -> &'static str {
    if value {
        "Sí"
    } else {
        "No"
    }
}

pub fn normalize_status(value: &str) -> ListingStatus {
    if value.trim().eq_ignore_ascii_case("paused") {
        ListingStatus::Paused
    } else {
        ListingStatus::Published
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// First non-null value among `keys`, stringified
fn first_string(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .map(|k| &raw[*k])
        .find(|v| !v.is_null())
        .map(stringify)
}

fn string_field(raw: &Value, keys: &[&str]) -> String {
    first_string(raw, keys).unwrap_or_default()
}

fn non_empty(raw: &Value, key: &str) -> Option<String> {
    match &raw[key] {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        v => Some(stringify(v)).filter(|s| !s.is_empty()),
    }
}

fn error_message(data: &Value) -> Option<String> {
    ["error", "message"]
        .iter()
        .filter_map(|k| data[*k].as_str())
        .find(|s| !s.is_empty())
        .map(str::to_string)
}
