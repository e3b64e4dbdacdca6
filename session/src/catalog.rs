//! Site route, admin section and admin resource catalogs.
//!
//! The SPA router, the route guard, the admin dashboard tiles and the CLI all
//! read from these tables so a path or endpoint is spelled in one place.

#[cfg(test)]
#[path = "catalog_test.rs"]
mod catalog_test;

use serde_json::Value;

/// Field carrying a resource item's identifier.
pub const ITEM_ID_FIELD: &str = "_id";

/// Identifier of a resource item, if it has one.
#[must_use]
pub fn item_id(item: &Value) -> Option<&str> {
    item.get(ITEM_ID_FIELD).and_then(Value::as_str)
}

// =============================================================================
// ADMIN RESOURCES
// =============================================================================

/// A backend CRUD collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdminResource {
    Team,
    Sponsors,
    Champions,
    Testimonials,
    Gallery,
    MissionVision,
    Process,
    Education,
    ProjectSlides,
    Downloads,
    Videos,
    DonationImages,
    Emails,
    Support,
    GetInvolved,
    Slides,
}

impl AdminResource {
    pub const ALL: [Self; 16] = [
        Self::Team,
        Self::Sponsors,
        Self::Champions,
        Self::Testimonials,
        Self::Gallery,
        Self::MissionVision,
        Self::Process,
        Self::Education,
        Self::ProjectSlides,
        Self::Downloads,
        Self::Videos,
        Self::DonationImages,
        Self::Emails,
        Self::Support,
        Self::GetInvolved,
        Self::Slides,
    ];

    /// Short name, which is also the last path segment.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Team => "team",
            Self::Sponsors => "sponsors",
            Self::Champions => "champions",
            Self::Testimonials => "testimonials",
            Self::Gallery => "gallery",
            Self::MissionVision => "mission-vision",
            Self::Process => "process",
            Self::Education => "education",
            Self::ProjectSlides => "project-slides",
            Self::Downloads => "downloads",
            Self::Videos => "videos",
            Self::DonationImages => "donation-images",
            Self::Emails => "emails",
            Self::Support => "support",
            Self::GetInvolved => "getinvolved",
            Self::Slides => "slides",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|resource| resource.name() == name)
    }

    /// Collection path, e.g. `/api/team`.
    #[must_use]
    pub fn path(self) -> String {
        format!("/api/{}", self.name())
    }

    /// Single-item path, e.g. `/api/team/{id}`.
    #[must_use]
    pub fn item_path(self, id: &str) -> String {
        format!("/api/{}/{}", self.name(), id.trim_matches('/'))
    }
}

// =============================================================================
// ADMIN SECTIONS
// =============================================================================

/// One admin dashboard tile and its protected route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AdminSection {
    ChangePassword,
    Emails,
    Champions,
    MissionVision,
    Sponsors,
    Team,
    Resources,
    Donation,
    Education,
    Recruiting,
    ProjectSlides,
    Gallery,
    Testimonials,
}

impl AdminSection {
    /// Dashboard order.
    pub const ALL: [Self; 13] = [
        Self::ChangePassword,
        Self::Emails,
        Self::Champions,
        Self::MissionVision,
        Self::Sponsors,
        Self::Team,
        Self::Resources,
        Self::Donation,
        Self::Education,
        Self::Recruiting,
        Self::ProjectSlides,
        Self::Gallery,
        Self::Testimonials,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::ChangePassword => "/change-password",
            Self::Emails => "/admin-emails",
            Self::Champions => "/admin-champions",
            Self::MissionVision => "/admin-vision-mission",
            Self::Sponsors => "/admin-sponsors",
            Self::Team => "/admin-team",
            Self::Resources => "/admin-resources",
            Self::Donation => "/admin-donation",
            Self::Education => "/admin-education",
            Self::Recruiting => "/admin-recruiting-process",
            Self::ProjectSlides => "/admin-project-slide",
            Self::Gallery => "/admin-gallery",
            Self::Testimonials => "/admin-testimonials",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::ChangePassword => "Change Password",
            Self::Emails => "Emails",
            Self::Champions => "Champions",
            Self::MissionVision => "Mission & Vision",
            Self::Sponsors => "Sponsors",
            Self::Team => "Team",
            Self::Resources => "Resources",
            Self::Donation => "Donations",
            Self::Education => "Education",
            Self::Recruiting => "Recruiting",
            Self::ProjectSlides => "Project Slides",
            Self::Gallery => "Champions Gallery",
            Self::Testimonials => "Testimonials / Comments",
        }
    }

    /// Collections edited from this section.
    #[must_use]
    pub fn resources(self) -> &'static [AdminResource] {
        match self {
            Self::ChangePassword => &[],
            Self::Emails => &[AdminResource::Emails],
            Self::Champions => &[AdminResource::Champions],
            Self::MissionVision => &[AdminResource::MissionVision],
            Self::Sponsors => &[AdminResource::Sponsors],
            Self::Team => &[AdminResource::Team],
            Self::Resources => &[AdminResource::Downloads, AdminResource::Videos],
            Self::Donation => &[AdminResource::DonationImages],
            Self::Education => &[AdminResource::Education],
            Self::Recruiting => &[AdminResource::Process],
            Self::ProjectSlides => &[AdminResource::ProjectSlides],
            Self::Gallery => &[AdminResource::Gallery],
            Self::Testimonials => &[AdminResource::Testimonials],
        }
    }

    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.path() == path)
    }
}

// =============================================================================
// SITE ROUTES
// =============================================================================

/// Login route the guard redirects to.
pub const LOGIN_ROUTE: &str = "/login";
/// Landing route after a successful login.
pub const ADMIN_LANDING_ROUTE: &str = "/admin-dashboard";

/// Every route the SPA serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SiteRoute {
    Home,
    OurProjects,
    Donate,
    Champions,
    Resources,
    About,
    Ftc,
    Contact,
    Login,
    PaymentSuccess,
    PaymentCancel,
    AdminDashboard,
    Admin(AdminSection),
}

impl SiteRoute {
    pub const PUBLIC: [Self; 11] = [
        Self::Home,
        Self::OurProjects,
        Self::Donate,
        Self::Champions,
        Self::Resources,
        Self::About,
        Self::Ftc,
        Self::Contact,
        Self::Login,
        Self::PaymentSuccess,
        Self::PaymentCancel,
    ];

    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::OurProjects => "/ourProjects",
            Self::Donate => "/donate",
            Self::Champions => "/champions",
            Self::Resources => "/resources",
            Self::About => "/about",
            Self::Ftc => "/ftc",
            Self::Contact => "/contact",
            Self::Login => LOGIN_ROUTE,
            Self::PaymentSuccess => "/payment-success",
            Self::PaymentCancel => "/payment-cancel",
            Self::AdminDashboard => ADMIN_LANDING_ROUTE,
            Self::Admin(section) => section.path(),
        }
    }

    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::OurProjects => "Our Projects",
            Self::Donate => "Fund Their Future",
            Self::Champions => "Women in STEM",
            Self::Resources => "Resources",
            Self::About => "About Us",
            Self::Ftc => "FIRST Tech Challenge",
            Self::Contact => "Contact Us",
            Self::Login => "Admin Login",
            Self::PaymentSuccess => "Thank You",
            Self::PaymentCancel => "Payment Cancelled",
            Self::AdminDashboard => "Admin Dashboard",
            Self::Admin(section) => section.label(),
        }
    }

    /// Whether the route sits behind the route guard.
    #[must_use]
    pub fn is_protected(self) -> bool {
        matches!(self, Self::AdminDashboard | Self::Admin(_))
    }

    /// Look up a route by path. A single trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.strip_suffix('/') {
            Some(trimmed) if !trimmed.is_empty() => trimmed,
            _ => path,
        };
        if path == ADMIN_LANDING_ROUTE {
            return Some(Self::AdminDashboard);
        }
        if let Some(section) = AdminSection::from_path(path) {
            return Some(Self::Admin(section));
        }
        Self::PUBLIC.into_iter().find(|route| route.path() == path)
    }
}
