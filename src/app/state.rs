//! Navigation state shared across the shell.

use crate::app::events::{Command, Resource};

/// The screen currently shown in the content area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ResourceView {
    #[default]
    Banks,
    Airlines,
    Sectors,
    Flights,
    FlightPackages,
    Roles,
    Users,
    Testimonials,
    Tours,
    Visas,
    Vouchers,
}

/// Sidebar grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavSection {
    Catalog,
    Access,
    Content,
    Finance,
}

impl NavSection {
    /// Section header text.
    pub fn title(&self) -> &'static str {
        match self {
            NavSection::Catalog => "CATALOG",
            NavSection::Access => "ACCESS",
            NavSection::Content => "CONTENT",
            NavSection::Finance => "FINANCE",
        }
    }
}

impl ResourceView {
    /// All screens, in sidebar order.
    pub fn all() -> &'static [ResourceView] {
        &[
            ResourceView::Airlines,
            ResourceView::Sectors,
            ResourceView::Flights,
            ResourceView::FlightPackages,
            ResourceView::Roles,
            ResourceView::Users,
            ResourceView::Testimonials,
            ResourceView::Tours,
            ResourceView::Visas,
            ResourceView::Banks,
            ResourceView::Vouchers,
        ]
    }

    /// Screen title shown in the sidebar and list header.
    pub fn title(&self) -> &'static str {
        match self {
            ResourceView::Banks => "Banks",
            ResourceView::Airlines => "Airlines",
            ResourceView::Sectors => "Sectors",
            ResourceView::Flights => "Flights",
            ResourceView::FlightPackages => "Flight Packages",
            ResourceView::Roles => "Roles",
            ResourceView::Users => "Users",
            ResourceView::Testimonials => "Testimonials",
            ResourceView::Tours => "Tours",
            ResourceView::Visas => "Visas",
            ResourceView::Vouchers => "Payment Vouchers",
        }
    }

    /// Sidebar section this screen belongs to.
    pub fn section(&self) -> NavSection {
        match self {
            ResourceView::Airlines
            | ResourceView::Sectors
            | ResourceView::Flights
            | ResourceView::FlightPackages => NavSection::Catalog,
            ResourceView::Roles | ResourceView::Users => NavSection::Access,
            ResourceView::Testimonials | ResourceView::Tours | ResourceView::Visas => {
                NavSection::Content
            }
            ResourceView::Banks | ResourceView::Vouchers => NavSection::Finance,
        }
    }

    /// Primary resource this screen owns.
    pub fn resource(&self) -> Resource {
        match self {
            ResourceView::Banks => Resource::Banks,
            ResourceView::Airlines => Resource::Airlines,
            ResourceView::Sectors => Resource::Sectors,
            ResourceView::Flights => Resource::Flights,
            ResourceView::FlightPackages => Resource::FlightPackages,
            ResourceView::Roles => Resource::Roles,
            ResourceView::Users => Resource::Users,
            ResourceView::Testimonials => Resource::Testimonials,
            ResourceView::Tours => Resource::Tours,
            ResourceView::Visas => Resource::Visas,
            ResourceView::Vouchers => Resource::Vouchers,
        }
    }

    /// Commands issued when the screen is activated or refreshed. Screens
    /// whose forms reference other resources also fetch those.
    pub fn fetch_commands(&self) -> Vec<Command> {
        match self {
            ResourceView::Banks => vec![Command::FetchBanks],
            ResourceView::Airlines => vec![Command::FetchAirlines],
            ResourceView::Sectors => vec![Command::FetchSectors],
            ResourceView::Flights => vec![
                Command::FetchFlights,
                Command::FetchAirlines,
                Command::FetchSectors,
            ],
            ResourceView::FlightPackages => vec![
                Command::FetchFlightPackages,
                Command::FetchFlights,
                Command::FetchPackages,
            ],
            ResourceView::Roles => vec![Command::FetchRoles, Command::FetchPermissions],
            ResourceView::Users => vec![Command::FetchUsers, Command::FetchRoles],
            ResourceView::Testimonials => vec![Command::FetchTestimonials],
            ResourceView::Tours => vec![Command::FetchTours],
            ResourceView::Visas => vec![Command::FetchVisas],
            ResourceView::Vouchers => vec![
                Command::FetchVouchers,
                Command::FetchUsers,
                Command::FetchBanks,
            ],
        }
    }

    /// The single command that re-fetches this screen's own collection.
    pub fn refetch_command(&self) -> Command {
        match self {
            ResourceView::Banks => Command::FetchBanks,
            ResourceView::Airlines => Command::FetchAirlines,
            ResourceView::Sectors => Command::FetchSectors,
            ResourceView::Flights => Command::FetchFlights,
            ResourceView::FlightPackages => Command::FetchFlightPackages,
            ResourceView::Roles => Command::FetchRoles,
            ResourceView::Users => Command::FetchUsers,
            ResourceView::Testimonials => Command::FetchTestimonials,
            ResourceView::Tours => Command::FetchTours,
            ResourceView::Visas => Command::FetchVisas,
            ResourceView::Vouchers => Command::FetchVouchers,
        }
    }

    /// Screen owning mutations of the given resource, used to route
    /// mutation-success events back to a re-fetch.
    pub fn owner_of(resource: Resource) -> Option<ResourceView> {
        match resource {
            Resource::Banks => Some(ResourceView::Banks),
            Resource::Airlines => Some(ResourceView::Airlines),
            Resource::Sectors => Some(ResourceView::Sectors),
            Resource::Flights => Some(ResourceView::Flights),
            Resource::FlightPackages => Some(ResourceView::FlightPackages),
            Resource::Roles => Some(ResourceView::Roles),
            Resource::Users => Some(ResourceView::Users),
            Resource::Testimonials => Some(ResourceView::Testimonials),
            Resource::Tours => Some(ResourceView::Tours),
            Resource::Visas => Some(ResourceView::Visas),
            Resource::Vouchers => Some(ResourceView::Vouchers),
            Resource::Packages | Resource::Permissions => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_screen_has_a_section() {
        for view in ResourceView::all() {
            // Exercises the match for completeness.
            let _ = view.section().title();
            let _ = view.title();
        }
    }

    #[test]
    fn activation_always_fetches_own_collection() {
        for view in ResourceView::all() {
            let commands = view.fetch_commands();
            assert!(!commands.is_empty(), "{view:?} fetches nothing");
        }
    }

    #[test]
    fn mutation_owner_round_trips() {
        for view in ResourceView::all() {
            assert_eq!(ResourceView::owner_of(view.resource()), Some(*view));
        }
    }

    #[test]
    fn reference_resources_have_no_owner() {
        assert_eq!(ResourceView::owner_of(Resource::Packages), None);
        assert_eq!(ResourceView::owner_of(Resource::Permissions), None);
    }
}
