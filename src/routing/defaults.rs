use crate::models::{RouteDescriptor, RouteMeta};

const PUBLIC: RouteMeta = RouteMeta {
    requires_auth: false,
    requires_admin: false,
};
const MEMBER: RouteMeta = RouteMeta {
    requires_auth: true,
    requires_admin: false,
};
const ADMIN: RouteMeta = RouteMeta {
    requires_auth: true,
    requires_admin: true,
};

/// The dating app's route table, used when the config declares no routes.
pub fn default_routes() -> Vec<RouteDescriptor> {
    vec![
        RouteDescriptor::new("home", "/", "LoginView", PUBLIC),
        RouteDescriptor::new("login", "/login", "LoginView", PUBLIC),
        RouteDescriptor::new("register", "/register", "RegisterView", PUBLIC),
        RouteDescriptor::new("deck", "/deck", "SwipeDeck", MEMBER),
        RouteDescriptor::new("matches", "/matches", "MatchesView", MEMBER),
        RouteDescriptor::new("chat", "/chat/:matchId", "ChatView", MEMBER),
        RouteDescriptor::new("upload-photos", "/upload-photos", "UploadPhotosView", MEMBER),
        RouteDescriptor::new("admin", "/admin", "AdminView", ADMIN),
    ]
}
