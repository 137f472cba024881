//! Services catalog queries.
//!
//! [`get_services`] handles every filter combination; the other functions
//! are thin wrappers that validate their arguments and delegate to it.

use std::collections::BTreeSet;

use serde::Deserialize;
use table_core::{Query, TableRef, TableRequest};

use crate::connector::SupabaseConnector;
use crate::error::Result;
use crate::models::{ServiceFilter, ServiceRecord};
use crate::validation::{require_non_empty, require_positive};

/// Name of the services table.
pub const SERVICES_TABLE: &str = "services";

/// Reference to the services table.
pub fn services_table() -> TableRef {
    TableRef::new(SERVICES_TABLE)
}

/// Compose the query for a filter.
///
/// Predicates are added in a fixed order: id, name, category, active flag,
/// limit, then an ascending sort by name which is always present.
pub fn build_query(filter: &ServiceFilter) -> Query {
    let mut query = Query::new();

    if let Some(id) = filter.id {
        query = query.eq("id", id);
    }
    if let Some(name) = &filter.name {
        query = query.contains("name", name);
    }
    if let Some(category) = &filter.category {
        query = query.eq("category", category.as_str());
    }
    if let Some(is_active) = filter.is_active {
        query = query.eq("is_active", is_active);
    }
    if let Some(limit) = filter.limit {
        query = query.limit(limit);
    }

    query.order("name", true)
}

/// Get services matching a filter, sorted by name.
///
/// An empty filter returns the whole catalog.
pub async fn get_services(
    connector: &SupabaseConnector,
    filter: &ServiceFilter,
) -> Result<Vec<ServiceRecord>> {
    connector
        .fetch(
            "retrieve services",
            TableRequest::Select {
                table: services_table(),
                query: build_query(filter),
            },
        )
        .await
}

/// Get a service by ID. Returns `None` if no service has that ID.
pub async fn get_service_by_id(
    connector: &SupabaseConnector,
    service_id: i64,
) -> Result<Option<ServiceRecord>> {
    let service_id = require_positive("service_id", service_id)?;

    let services = get_services(connector, &ServiceFilter::new().with_id(service_id)).await?;
    Ok(services.into_iter().next())
}

/// Get the services in a category.
///
/// With `active_only` set, inactive services are excluded; otherwise the
/// active flag is not constrained.
pub async fn get_services_by_category(
    connector: &SupabaseConnector,
    category: &str,
    active_only: bool,
) -> Result<Vec<ServiceRecord>> {
    let category = require_non_empty("category", category)?;

    let mut filter = ServiceFilter::new().with_category(category);
    if active_only {
        filter = filter.with_active(true);
    }
    get_services(connector, &filter).await
}

/// Search services by a case-insensitive name fragment.
pub async fn search_services_by_name(
    connector: &SupabaseConnector,
    name: &str,
    active_only: bool,
) -> Result<Vec<ServiceRecord>> {
    let name = require_non_empty("name", name)?;

    let mut filter = ServiceFilter::new().with_name(name);
    if active_only {
        filter = filter.with_active(true);
    }
    get_services(connector, &filter).await
}

/// Get active services, optionally limited.
pub async fn get_active_services(
    connector: &SupabaseConnector,
    limit: Option<usize>,
) -> Result<Vec<ServiceRecord>> {
    let filter = ServiceFilter {
        is_active: Some(true),
        limit,
        ..Default::default()
    };
    get_services(connector, &filter).await
}

#[derive(Deserialize)]
struct CategoryRow {
    #[serde(default)]
    category: Option<String>,
}

/// Get the distinct, non-empty service categories, sorted.
pub async fn get_service_categories(connector: &SupabaseConnector) -> Result<Vec<String>> {
    let rows: Vec<CategoryRow> = connector
        .fetch(
            "retrieve service categories",
            TableRequest::Select {
                table: services_table(),
                query: Query::new().select(["category"]),
            },
        )
        .await?;

    let categories: BTreeSet<String> = rows
        .into_iter()
        .filter_map(|row| row.category)
        .filter(|c| !c.is_empty())
        .collect();

    Ok(categories.into_iter().collect())
}
