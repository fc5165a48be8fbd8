//! Concrete views and the route table for each console variant.

#[cfg(test)]
#[path = "console_test.rs"]
mod console_test;

use super::table::{RouteTable, RouteTableError};
use crate::config::ConsoleVariant;

/// Path of the login view; unauthenticated visitors are sent here.
pub const LOGIN_PATH: &str = "/login";
/// Public landing path after signing out.
pub const HOME_PATH: &str = "/";

/// Every screen the console can render. Opaque to the router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Home,
    Customers,
    CustomerAdd,
    Devices,
    Orgs,
    Org,
    OrgAdd,
    Users,
    User,
    Things,
    Thing,
    Login,
    Signout,
    NotFound,
}

impl View {
    /// Views reachable without a session.
    pub fn is_public(self) -> bool {
        matches!(self, Self::Login | Self::Signout | Self::NotFound)
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Customers => "Customers",
            Self::CustomerAdd => "Add Customer",
            Self::Devices => "Devices",
            Self::Orgs => "Organizations",
            Self::Org => "Organization",
            Self::OrgAdd => "Add Organization",
            Self::Users => "Users",
            Self::User => "User",
            Self::Things => "Things",
            Self::Thing => "Thing",
            Self::Login => "Login",
            Self::Signout => "Sign Out",
            Self::NotFound => "Not Found",
        }
    }
}

fn entries(variant: ConsoleVariant) -> Vec<(&'static str, View)> {
    match variant {
        ConsoleVariant::Tenant => vec![
            ("/", View::Home),
            ("/customers", View::Customers),
            ("/customer-add", View::CustomerAdd),
            ("/users", View::Users),
            ("/devices", View::Devices),
            (LOGIN_PATH, View::Login),
            ("/signout", View::Signout),
            ("*", View::NotFound),
        ],
        ConsoleVariant::Admin => vec![
            ("/", View::Home),
            ("/orgs", View::Orgs),
            ("/org/:id", View::Org),
            ("/org-add", View::OrgAdd),
            ("/users", View::Users),
            ("/user/:id", View::User),
            ("/things", View::Things),
            ("/thing/:id", View::Thing),
            (LOGIN_PATH, View::Login),
            ("/signout", View::Signout),
            ("*", View::NotFound),
        ],
    }
}

/// Route table for `variant`.
///
/// # Errors
///
/// Propagates [`RouteTableError`]; the built-in tables are expected to pass.
pub fn console_routes(variant: ConsoleVariant) -> Result<RouteTable<View>, RouteTableError> {
    RouteTable::new(entries(variant))
}
