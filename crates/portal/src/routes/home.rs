//! Landing page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

use crate::filters;
use crate::middleware::OptionalAuth;

/// One feature blurb on the landing page.
#[derive(Clone, Copy)]
pub struct Feature {
    pub icon: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

pub const FEATURES: &[Feature] = &[
    Feature {
        icon: "tracking",
        title: "Real-time Tracking",
        description: "Monitor your entire fleet in real-time with advanced GPS tracking technology.",
    },
    Feature {
        icon: "maintenance",
        title: "Maintenance Management",
        description: "Schedule and track maintenance to prevent breakdowns and extend vehicle life.",
    },
    Feature {
        icon: "reports",
        title: "Comprehensive Reports",
        description: "Gain insights with detailed analytics and customizable reports.",
    },
];

/// Landing page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub features: &'static [Feature],
    /// Show a dashboard link instead of the login/register buttons.
    pub signed_in: bool,
}

/// Display the landing page.
pub async fn home(OptionalAuth(user): OptionalAuth) -> impl IntoResponse {
    HomeTemplate {
        features: FEATURES,
        signed_in: user.is_some(),
    }
}
