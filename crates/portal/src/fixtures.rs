//! Static dashboard data.
//!
//! Every number shown on the dashboard comes from here. Nothing is derived
//! from the stored records.

/// Direction a stat card's note points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    /// CSS modifier class for the note.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Up => "trend-up",
            Self::Down => "trend-down",
            Self::Neutral => "trend-neutral",
        }
    }
}

/// One overview card.
#[derive(Debug, Clone, Copy)]
pub struct StatCard {
    pub title: &'static str,
    pub value: &'static str,
    pub note: &'static str,
    pub trend: Trend,
}

pub const STAT_CARDS: &[StatCard] = &[
    StatCard {
        title: "Total Vehicles",
        value: "24",
        note: "+2 this month",
        trend: Trend::Up,
    },
    StatCard {
        title: "Active Drivers",
        value: "18",
        note: "+3 this month",
        trend: Trend::Up,
    },
    StatCard {
        title: "Fuel Expenses",
        value: "$4,280",
        note: "-5% vs last month",
        trend: Trend::Down,
    },
    StatCard {
        title: "Maintenance Due",
        value: "5",
        note: "Next 7 days",
        trend: Trend::Neutral,
    },
];

/// Severity of an alert banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertKind {
    Warning,
    Success,
}

impl AlertKind {
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Warning => "alert-warning",
            Self::Success => "alert-success",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Alert {
    pub kind: AlertKind,
    pub title: &'static str,
    pub message: &'static str,
}

pub const ALERTS: &[Alert] = &[
    Alert {
        kind: AlertKind::Warning,
        title: "Maintenance Required",
        message: "Vehicle TRK-103 is due for scheduled maintenance in 2 days.",
    },
    Alert {
        kind: AlertKind::Success,
        title: "Service Completed",
        message: "Oil change and tire rotation for VAN-205 has been completed.",
    },
];

/// Monthly fuel consumption (litres) and cost (dollars).
#[derive(Debug, Clone, Copy)]
pub struct FuelMonth {
    pub month: &'static str,
    pub consumption: u32,
    pub cost: u32,
}

const fn fuel(month: &'static str, consumption: u32, cost: u32) -> FuelMonth {
    FuelMonth {
        month,
        consumption,
        cost,
    }
}

pub const FUEL: &[FuelMonth] = &[
    fuel("Jan", 450, 1350),
    fuel("Feb", 420, 1260),
    fuel("Mar", 480, 1440),
    fuel("Apr", 520, 1560),
    fuel("May", 490, 1470),
    fuel("Jun", 550, 1650),
    fuel("Jul", 600, 1800),
    fuel("Aug", 580, 1740),
    fuel("Sep", 510, 1530),
    fuel("Oct", 490, 1470),
    fuel("Nov", 460, 1380),
    fuel("Dec", 510, 1530),
];

/// Utilization of one vehicle, in percent.
#[derive(Debug, Clone, Copy)]
pub struct VehicleUsage {
    pub name: &'static str,
    pub usage: u32,
}

pub const VEHICLE_USAGE: &[VehicleUsage] = &[
    VehicleUsage {
        name: "Truck A",
        usage: 85,
    },
    VehicleUsage {
        name: "Truck B",
        usage: 92,
    },
    VehicleUsage {
        name: "Van C",
        usage: 78,
    },
    VehicleUsage {
        name: "Van D",
        usage: 65,
    },
    VehicleUsage {
        name: "Car E",
        usage: 45,
    },
    VehicleUsage {
        name: "Truck F",
        usage: 88,
    },
];

#[derive(Debug, Clone, Copy)]
pub struct MaintenanceMonth {
    pub month: &'static str,
    pub scheduled: u32,
    pub emergency: u32,
}

const fn maintenance(month: &'static str, scheduled: u32, emergency: u32) -> MaintenanceMonth {
    MaintenanceMonth {
        month,
        scheduled,
        emergency,
    }
}

pub const MAINTENANCE: &[MaintenanceMonth] = &[
    maintenance("Jan", 5, 2),
    maintenance("Feb", 7, 1),
    maintenance("Mar", 4, 3),
    maintenance("Apr", 6, 2),
    maintenance("May", 8, 1),
    maintenance("Jun", 5, 0),
];

#[derive(Debug, Clone, Copy)]
pub struct DriverPerformance {
    pub name: &'static str,
    pub score: u32,
    pub incidents: u32,
    pub fuel_efficiency: u32,
}

const fn driver(name: &'static str, score: u32, incidents: u32, fuel_efficiency: u32) -> DriverPerformance {
    DriverPerformance {
        name,
        score,
        incidents,
        fuel_efficiency,
    }
}

pub const DRIVERS: &[DriverPerformance] = &[
    driver("John D.", 92, 0, 95),
    driver("Sarah M.", 88, 1, 90),
    driver("Robert K.", 85, 1, 87),
    driver("Lisa T.", 95, 0, 92),
    driver("Michael P.", 79, 2, 82),
];

/// Operating state of a vehicle in the status list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    Active,
    MaintenanceDue,
    InService,
}

impl VehicleStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::MaintenanceDue => "Maintenance Due",
            Self::InService => "In Service",
        }
    }

    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            Self::Active => "status-active",
            Self::MaintenanceDue => "status-warning",
            Self::InService => "status-info",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActiveVehicle {
    pub name: &'static str,
    pub plate: &'static str,
    pub route: &'static str,
    pub status: VehicleStatus,
}

pub const ACTIVE_VEHICLES: &[ActiveVehicle] = &[
    ActiveVehicle {
        name: "Truck A",
        plate: "TRK-101",
        route: "Downtown Delivery Route",
        status: VehicleStatus::Active,
    },
    ActiveVehicle {
        name: "Van C",
        plate: "VAN-205",
        route: "Airport Shuttle Service",
        status: VehicleStatus::Active,
    },
    ActiveVehicle {
        name: "Truck F",
        plate: "TRK-103",
        route: "Interstate Freight Route",
        status: VehicleStatus::MaintenanceDue,
    },
    ActiveVehicle {
        name: "Car E",
        plate: "CAR-304",
        route: "Executive Transport",
        status: VehicleStatus::InService,
    },
];

/// Sidebar entry.
#[derive(Debug, Clone, Copy)]
pub struct NavItem {
    pub label: &'static str,
    pub href: &'static str,
}

pub const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        label: "Dashboard",
        href: "/dashboard",
    },
    NavItem {
        label: "Vehicles",
        href: "/dashboard/vehicles",
    },
    NavItem {
        label: "Drivers",
        href: "/dashboard/drivers",
    },
    NavItem {
        label: "Maintenance",
        href: "/dashboard/maintenance",
    },
    NavItem {
        label: "Reports",
        href: "/dashboard/reports",
    },
    NavItem {
        label: "Analytics",
        href: "/dashboard/analytics",
    },
    NavItem {
        label: "Settings",
        href: "/dashboard/settings",
    },
];

/// A dashboard section that only shows a title and a blurb.
#[derive(Debug, Clone, Copy)]
pub struct Placeholder {
    pub slug: &'static str,
    pub title: &'static str,
    pub body: &'static str,
}

pub const PLACEHOLDERS: &[Placeholder] = &[
    Placeholder {
        slug: "vehicles",
        title: "Vehicles",
        body: "This is a placeholder for the Vehicles page. In a real application, this would \
               display your fleet vehicles, their status, maintenance history, and other \
               relevant information.",
    },
    Placeholder {
        slug: "drivers",
        title: "Drivers",
        body: "This is a placeholder for the Drivers page. In a real application, this would \
               display your driver roster, performance metrics, schedules, and other relevant \
               information.",
    },
    Placeholder {
        slug: "maintenance",
        title: "Maintenance",
        body: "This is a placeholder for the Maintenance page.",
    },
    Placeholder {
        slug: "reports",
        title: "Reports",
        body: "This is a placeholder for the Reports page.",
    },
    Placeholder {
        slug: "analytics",
        title: "Analytics",
        body: "This is a placeholder for the Analytics page.",
    },
    Placeholder {
        slug: "settings",
        title: "Settings",
        body: "This is a placeholder for the Settings page.",
    },
];

/// Look up a placeholder section by its URL slug.
#[must_use]
pub fn placeholder(slug: &str) -> Option<&'static Placeholder> {
    PLACEHOLDERS.iter().find(|p| p.slug == slug)
}

/// Largest monthly fuel consumption, used as the bar scale.
#[must_use]
pub fn max_fuel_consumption() -> u32 {
    FUEL.iter().map(|m| m.consumption).max().unwrap_or(0)
}

/// Largest monthly fuel cost, used as the bar scale.
#[must_use]
pub fn max_fuel_cost() -> u32 {
    FUEL.iter().map(|m| m.cost).max().unwrap_or(0)
}

/// Largest monthly maintenance count of either kind, used as the bar scale.
#[must_use]
pub fn max_maintenance() -> u32 {
    MAINTENANCE
        .iter()
        .map(|m| m.scheduled.max(m.emergency))
        .max()
        .unwrap_or(0)
}
