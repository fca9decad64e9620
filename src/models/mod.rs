pub mod outcome;
pub mod route;
pub mod user;

pub use outcome::{NavigationOutcome, RedirectTarget};
pub use route::{RouteDescriptor, RouteLocation, RouteMeta};
pub use user::{CurrentUser, Photo, Role};
