mod backend;
mod models;
mod search;

use backend::{BackendConfig, ListingSource, MockListingSource, WebhookClient};
use models::{LandlordUser, PropertyListing, TenantUser};
use search::parse_search_query;
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const RESULTS_FILE: &str = "search_results.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏠 Listing Search - Buenos Aires");
    info!("===============================");

    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("mine") => handle_mine(&args[1..]).await,
        Some("pause") => handle_pause(&args[1..]).await,
        Some("register-tenant") => handle_register(&args[1..], true).await,
        Some("register-owner") => handle_register(&args[1..], false).await,
        Some("help" | "-h" | "--help") => {
            print_usage();
            Ok(())
        }
        _ => handle_search(&args.join(" ")).await,
    }
}

async fn handle_search(query: &str) -> anyhow::Result<()> {
    let parsed = parse_search_query(query);
    info!("Query: {:?}", parsed.query_text);
    info!("Interpretation: {}", parsed.interpretation);
    if parsed.filters.is_empty() {
        info!("No filters detected, running an unconstrained search");
    } else {
        info!("Filters: {}", serde_json::to_string(&parsed.filters)?);
    }

    let source = listing_source()?;
    info!("Searching {} listings...", source.source_name());

    let listings = source.search(&parsed.query_text, &parsed.filters).await?;
    info!("\n✅ Found {} listings\n", listings.len());
    print_listings(&listings);

    let json = serde_json::to_string_pretty(&listings)?;
    tokio::fs::write(RESULTS_FILE, json).await?;
    info!("💾 Saved all listings to {}", RESULTS_FILE);

    Ok(())
}

async fn handle_mine(args: &[String]) -> anyhow::Result<()> {
    let Some(email) = args.first() else {
        print_usage();
        return Ok(());
    };

    let client = WebhookClient::new(BackendConfig::from_env()?)?;
    let listings = client.my_listings(email).await?;
    print_listings(&listings);

    Ok(())
}

async fn handle_pause(args: &[String]) -> anyhow::Result<()> {
    let (Some(email), Some(id)) = (args.first(), args.get(1)) else {
        print_usage();
        return Ok(());
    };

    let client = WebhookClient::new(BackendConfig::from_env()?)?;
    let listings = client.my_listings(email).await?;

    let Some(listing) = listings.iter().find(|l| &l.id == id) else {
        anyhow::bail!("Listing {} not found for {}", id, email);
    };

    let owner = LandlordUser {
        name: listing.owner_name.clone(),
        email: email.clone(),
        phone: listing.owner_phone.clone(),
        address: String::new(),
    };
    client.delete_listing(&owner, listing).await?;
    info!("⏸️  Paused listing {}", id);

    Ok(())
}

/// Both registrations take `<name> <email> <phone> <address>`. Tenant search
/// preferences are filled in later from the web app.
async fn handle_register(args: &[String], tenant: bool) -> anyhow::Result<()> {
    let [name, email, phone, address] = args else {
        print_usage();
        return Ok(());
    };

    let client = WebhookClient::new(BackendConfig::from_env()?)?;
    let id = if tenant {
        let user = TenantUser {
            name: name.clone(),
            email: email.clone(),
            phone: phone.clone(),
            address: address.clone(),
            ..Default::default()
        };
        client.create_tenant_user(&user).await?
    } else {
        let user = LandlordUser {
            name: name.clone(),
            email: email.clone(),
            phone: phone.clone(),
            address: address.clone(),
        };
        client.create_owner_user(&user).await?
    };

    info!("✅ Registered {} (id: {})", email, id.as_deref().unwrap_or("pending"));
    Ok(())
}

/// Webhook backend when configured, sample data otherwise
fn listing_source() -> anyhow::Result<Box<dyn ListingSource>> {
    match BackendConfig::from_env() {
        Ok(config) => Ok(Box::new(WebhookClient::new(config)?)),
        Err(e) => {
            warn!("{}; using mock listings", e);
            Ok(Box::new(MockListingSource::new()))
        }
    }
}

fn print_listings(listings: &[PropertyListing]) {
    for (i, listing) in listings.iter().enumerate() {
        println!("{}. {} ({})", i + 1, listing.property_address, listing.price_period_currency);
        println!("   {}", listing.property_type_and_size);
        println!("   Owner: {} <{}> {}", listing.owner_name, listing.owner_email, listing.owner_phone);
        if let Some(pets) = &listing.pets_quantity_size_and_type {
            println!("   Pets: {}", pets);
        }
        println!("   ID: {}", listing.id);
        println!();
    }
}

fn print_usage() {
    println!("Usage:");
    println!("  listing-search <free text query>   search listings");
    println!("  listing-search mine <email>        list an owner's listings");
    println!("  listing-search pause <email> <id>  pause one of an owner's listings");
    println!("  listing-search register-tenant <name> <email> <phone> <address>");
    println!("  listing-search register-owner <name> <email> <phone> <address>");
}
