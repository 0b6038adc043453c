//! Dashboard route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Path, response::IntoResponse};

use fleetmaster_core::UserRecord;

use crate::error::{AppError, Result};
use crate::fixtures::{self, NavItem, Placeholder};
use crate::middleware::RequireAuth;

/// Signed-in user view for the dashboard layout.
#[derive(Debug, Clone)]
pub struct UserView {
    pub business_name: String,
    pub email: String,
}

impl From<&UserRecord> for UserView {
    fn from(record: &UserRecord) -> Self {
        Self {
            business_name: record.business_name.clone(),
            email: record.email.to_string(),
        }
    }
}

/// Dashboard overview template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/index.html")]
pub struct DashboardTemplate {
    pub user: UserView,
    pub nav: &'static [NavItem],
    pub current_path: &'static str,
    pub stat_cards: &'static [fixtures::StatCard],
    pub alerts: &'static [fixtures::Alert],
    pub fuel: &'static [fixtures::FuelMonth],
    pub max_fuel_consumption: u32,
    pub max_fuel_cost: u32,
    pub vehicle_usage: &'static [fixtures::VehicleUsage],
    pub maintenance: &'static [fixtures::MaintenanceMonth],
    pub max_maintenance: u32,
    pub drivers: &'static [fixtures::DriverPerformance],
    pub active_vehicles: &'static [fixtures::ActiveVehicle],
}

/// Placeholder section template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard/placeholder.html")]
pub struct PlaceholderTemplate {
    pub user: UserView,
    pub nav: &'static [NavItem],
    pub current_path: &'static str,
    pub page: &'static Placeholder,
}

/// Display the fleet overview.
pub async fn index(RequireAuth(user): RequireAuth) -> impl IntoResponse {
    DashboardTemplate {
        user: UserView::from(&user),
        nav: fixtures::NAV_ITEMS,
        current_path: "/dashboard",
        stat_cards: fixtures::STAT_CARDS,
        alerts: fixtures::ALERTS,
        fuel: fixtures::FUEL,
        max_fuel_consumption: fixtures::max_fuel_consumption(),
        max_fuel_cost: fixtures::max_fuel_cost(),
        vehicle_usage: fixtures::VEHICLE_USAGE,
        maintenance: fixtures::MAINTENANCE,
        max_maintenance: fixtures::max_maintenance(),
        drivers: fixtures::DRIVERS,
        active_vehicles: fixtures::ACTIVE_VEHICLES,
    }
}

/// Display a placeholder section such as vehicles or drivers.
///
/// # Errors
///
/// Returns `AppError::NotFound` for an unknown section.
pub async fn section(
    RequireAuth(user): RequireAuth,
    Path(section): Path<String>,
) -> Result<PlaceholderTemplate> {
    let page = fixtures::placeholder(&section)
        .ok_or_else(|| AppError::NotFound(format!("/dashboard/{section}")))?;

    let current_path = fixtures::NAV_ITEMS
        .iter()
        .find(|item| item.label == page.title)
        .map_or("/dashboard", |item| item.href);

    Ok(PlaceholderTemplate {
        user: UserView::from(&user),
        nav: fixtures::NAV_ITEMS,
        current_path,
        page,
    })
}
