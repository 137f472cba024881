//! Summary statistics over the services catalog.

use std::collections::BTreeMap;

use crate::connector::SupabaseConnector;
use crate::error::Result;
use crate::models::{ServiceFilter, ServiceRecord, ServicesSummary};
use crate::services::{get_service_categories, get_services};

/// Bucket for services without a category.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Fetch the catalog and its categories, then summarize.
///
/// The two reads are independent and run concurrently.
pub async fn get_services_summary(connector: &SupabaseConnector) -> Result<ServicesSummary> {
    let all = ServiceFilter::new();
    let (services, categories) = tokio::try_join!(
        get_services(connector, &all),
        get_service_categories(connector)
    )?;

    Ok(summarize(&services, categories))
}

/// Summarize a set of services.
///
/// Averages cover active services only, with missing values counted as 0,
/// and are 0 when there are no active services.
pub fn summarize(services: &[ServiceRecord], categories: Vec<String>) -> ServicesSummary {
    let active: Vec<&ServiceRecord> = services.iter().filter(|s| s.is_active).collect();

    let mut services_by_category = BTreeMap::new();
    for service in services {
        let bucket = service
            .category
            .clone()
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());
        *services_by_category.entry(bucket).or_insert(0) += 1;
    }

    let average = |value: fn(&ServiceRecord) -> Option<f64>| -> f64 {
        if active.is_empty() {
            return 0.0;
        }
        let total: f64 = active.iter().map(|s| value(s).unwrap_or(0.0)).sum();
        total / active.len() as f64
    };

    ServicesSummary {
        total_services: services.len(),
        active_services: active.len(),
        inactive_services: services.len() - active.len(),
        total_categories: categories.len(),
        categories,
        services_by_category,
        average_price: average(|s| s.price),
        average_duration: average(|s| s.duration_minutes),
    }
}
