//! Route table and navigation guard
//!
//! Every navigation (including back/forward and deep links) goes through
//! [`navigate`] or [`decide`]. This is the only place routing policy lives.

use serde::Serialize;

use crate::models::Role;

/// Known screens of the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Route {
    Landing,
    Login,
    AdminLogin,

    // Student
    StudentDashboard,
    Attendance,
    Leave,
    Complaints,
    MessMenu,

    // Warden
    WardenDashboard,
    WardenLeaves,
    WardenComplaints,

    // Admin
    AdminDashboard,
    AdminAnalytics,
    AdminRooms,
    AdminStudents,
    AdminLeaves,
    AdminComplaints,
}

/// Access annotation attached to each route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    /// Landing page; dispatches to login or the role home
    None,
    /// Login screens; hidden from signed-in sessions
    GuestOnly,
    Role(Role),
}

const ROUTES: &[(Route, &str, Requirement)] = &[
    (Route::Landing, "/", Requirement::None),
    (Route::Login, "/login", Requirement::GuestOnly),
    (Route::AdminLogin, "/admin/login", Requirement::GuestOnly),
    (Route::StudentDashboard, "/dashboard", Requirement::Role(Role::Student)),
    (Route::Attendance, "/attendance", Requirement::Role(Role::Student)),
    (Route::Leave, "/leave", Requirement::Role(Role::Student)),
    (Route::Complaints, "/complaints", Requirement::Role(Role::Student)),
    (Route::MessMenu, "/mess-menu", Requirement::Role(Role::Student)),
    (Route::WardenDashboard, "/warden/dashboard", Requirement::Role(Role::Warden)),
    (Route::WardenLeaves, "/warden/leaves", Requirement::Role(Role::Warden)),
    (Route::WardenComplaints, "/warden/complaints", Requirement::Role(Role::Warden)),
    (Route::AdminDashboard, "/admin/dashboard", Requirement::Role(Role::Admin)),
    (Route::AdminAnalytics, "/admin/analytics", Requirement::Role(Role::Admin)),
    (Route::AdminRooms, "/admin/rooms", Requirement::Role(Role::Admin)),
    (Route::AdminStudents, "/admin/students", Requirement::Role(Role::Admin)),
    (Route::AdminLeaves, "/admin/leaves", Requirement::Role(Role::Admin)),
    (Route::AdminComplaints, "/admin/complaints", Requirement::Role(Role::Admin)),
];

impl Route {
    /// Match a path against the route table
    pub fn parse(path: &str) -> Option<Route> {
        let path = normalize(path);
        ROUTES
            .iter()
            .find(|(_, p, _)| *p == path)
            .map(|(route, _, _)| *route)
    }

    pub fn path(&self) -> &'static str {
        self.entry().1
    }

    pub fn requirement(&self) -> Requirement {
        self.entry().2
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Landing => "Hostel Hub",
            Route::Login => "Sign in",
            Route::AdminLogin => "Admin Panel",
            Route::StudentDashboard | Route::WardenDashboard | Route::AdminDashboard => "Dashboard",
            Route::Attendance => "Attendance",
            Route::Leave => "Apply Leave",
            Route::Complaints => "Complaints",
            Route::MessMenu => "Mess Menu",
            Route::WardenLeaves | Route::AdminLeaves => "Leave Requests",
            Route::WardenComplaints | Route::AdminComplaints => "Complaints Management",
            Route::AdminAnalytics => "Analytics",
            Route::AdminRooms => "Rooms",
            Route::AdminStudents => "Students",
        }
    }

    pub fn all() -> impl Iterator<Item = Route> {
        ROUTES.iter().map(|(route, _, _)| *route)
    }

    fn entry(&self) -> &'static (Route, &'static str, Requirement) {
        ROUTES
            .iter()
            .find(|(route, _, _)| route == self)
            .unwrap_or(&ROUTES[0])
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path())
    }
}

/// Strip query, fragment and trailing slashes
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

/// Home screen for a role
pub fn home_route(role: Role) -> Route {
    match role {
        Role::Student => Route::StudentDashboard,
        Role::Warden => Route::WardenDashboard,
        Role::Admin => Route::AdminDashboard,
    }
}

/// Home screen for a role given by name; unknown names get the student home
pub fn home_route_for_name(name: &str) -> Route {
    name.parse::<Role>()
        .map(home_route)
        .unwrap_or(Route::StudentDashboard)
}

/// Sign-in screen guarding a role's routes
pub fn login_route(role: Role) -> Route {
    match role {
        Role::Admin => Route::AdminLogin,
        Role::Student | Role::Warden => Route::Login,
    }
}

/// Sidebar entries for a role, in table order
pub fn menu_for(role: Role) -> Vec<Route> {
    ROUTES
        .iter()
        .filter(|(_, _, req)| *req == Requirement::Role(role))
        .map(|(route, _, _)| *route)
        .collect()
}

/// Guard state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Unauthenticated,
    AuthenticatedAs(Role),
}

/// Outcome of a navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectTo(Route),
    /// No route matched; render the not-found view and stop
    NotFound,
}

/// Decide whether `state` may render `target` under `required`.
pub fn decide(state: GuardState, target: Route, required: Requirement) -> Decision {
    match (state, required) {
        (GuardState::Unauthenticated, Requirement::None) => {
            if target == Route::Landing {
                Decision::RedirectTo(Route::Login)
            } else {
                Decision::Allow
            }
        }
        (GuardState::Unauthenticated, Requirement::GuestOnly) => Decision::Allow,
        (GuardState::Unauthenticated, Requirement::Role(role)) => {
            Decision::RedirectTo(login_route(role))
        }
        (GuardState::AuthenticatedAs(current), Requirement::None | Requirement::GuestOnly) => {
            if target == Route::Landing || required == Requirement::GuestOnly {
                Decision::RedirectTo(home_route(current))
            } else {
                Decision::Allow
            }
        }
        (GuardState::AuthenticatedAs(current), Requirement::Role(role)) if current == role => {
            Decision::Allow
        }
        (GuardState::AuthenticatedAs(current), Requirement::Role(_)) => {
            Decision::RedirectTo(home_route(current))
        }
    }
}

/// Resolve a raw path: unmatched paths are `NotFound`, matched ones go
/// through [`decide`] with the route's own requirement.
pub fn navigate(state: GuardState, path: &str) -> Decision {
    let decision = match Route::parse(path) {
        Some(route) => decide(state, route, route.requirement()),
        None => Decision::NotFound,
    };
    tracing::debug!(path = %path, ?state, ?decision, "Navigation");
    decision
}

/// Follow redirects until a route renders or the path is unmatched.
///
/// Returns the route that ends up rendered, or `None` for not-found.
pub fn resolve(state: GuardState, path: &str) -> Option<Route> {
    let mut route = match navigate(state, path) {
        Decision::Allow => return Route::parse(path),
        Decision::NotFound => return None,
        Decision::RedirectTo(route) => route,
    };

    // Bounded so a redirect cycle in the table cannot loop forever
    for _ in 0..ROUTES.len() {
        match decide(state, route, route.requirement()) {
            Decision::Allow | Decision::NotFound => return Some(route),
            Decision::RedirectTo(next) => route = next,
        }
    }
    Some(route)
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHED: [GuardState; 3] = [
        GuardState::AuthenticatedAs(Role::Student),
        GuardState::AuthenticatedAs(Role::Warden),
        GuardState::AuthenticatedAs(Role::Admin),
    ];

    #[test]
    fn test_parse_normalizes_paths() {
        assert_eq!(Route::parse("/dashboard/"), Some(Route::StudentDashboard));
        assert_eq!(Route::parse("/admin/leaves?tab=pending"), Some(Route::AdminLeaves));
        assert_eq!(Route::parse("/complaints#new"), Some(Route::Complaints));
        assert_eq!(Route::parse(""), Some(Route::Landing));
        assert_eq!(Route::parse("/nope"), None);
    }

    #[test]
    fn test_paths_round_trip() {
        for route in Route::all() {
            assert_eq!(Route::parse(route.path()), Some(route));
        }
    }

    #[test]
    fn test_unauthenticated_protected_routes_redirect_to_login() {
        for route in Route::all() {
            if let Requirement::Role(role) = route.requirement() {
                let expected = if role == Role::Admin {
                    Route::AdminLogin
                } else {
                    Route::Login
                };
                assert_eq!(
                    navigate(GuardState::Unauthenticated, route.path()),
                    Decision::RedirectTo(expected),
                    "{route}"
                );
            }
        }
    }

    #[test]
    fn test_unauthenticated_may_see_login_screens() {
        assert_eq!(navigate(GuardState::Unauthenticated, "/login"), Decision::Allow);
        assert_eq!(navigate(GuardState::Unauthenticated, "/admin/login"), Decision::Allow);
    }

    #[test]
    fn test_admin_on_student_route_goes_to_admin_home() {
        let state = GuardState::AuthenticatedAs(Role::Admin);
        for route in menu_for(Role::Student) {
            assert_eq!(
                navigate(state, route.path()),
                Decision::RedirectTo(Route::AdminDashboard)
            );
        }
    }

    #[test]
    fn test_role_mismatch_redirects_home() {
        let student = GuardState::AuthenticatedAs(Role::Student);
        assert_eq!(
            navigate(student, "/admin/complaints"),
            Decision::RedirectTo(Route::StudentDashboard)
        );
        let warden = GuardState::AuthenticatedAs(Role::Warden);
        assert_eq!(
            navigate(warden, "/mess-menu"),
            Decision::RedirectTo(Route::WardenDashboard)
        );
    }

    #[test]
    fn test_matching_role_allowed() {
        for state in AUTHED {
            let GuardState::AuthenticatedAs(role) = state else {
                unreachable!()
            };
            for route in menu_for(role) {
                assert_eq!(decide(state, route, route.requirement()), Decision::Allow);
            }
        }
    }

    #[test]
    fn test_authenticated_login_screens_redirect_home() {
        for state in AUTHED {
            let GuardState::AuthenticatedAs(role) = state else {
                unreachable!()
            };
            assert_eq!(navigate(state, "/login"), Decision::RedirectTo(home_route(role)));
            assert_eq!(
                navigate(state, "/admin/login"),
                Decision::RedirectTo(home_route(role))
            );
        }
    }

    #[test]
    fn test_landing_dispatch() {
        assert_eq!(
            navigate(GuardState::Unauthenticated, "/"),
            Decision::RedirectTo(Route::Login)
        );
        assert_eq!(
            navigate(GuardState::AuthenticatedAs(Role::Warden), "/"),
            Decision::RedirectTo(Route::WardenDashboard)
        );
    }

    #[test]
    fn test_unmatched_path_is_not_found_for_every_state() {
        assert_eq!(navigate(GuardState::Unauthenticated, "/admin/secret"), Decision::NotFound);
        for state in AUTHED {
            assert_eq!(navigate(state, "/does-not-exist"), Decision::NotFound);
        }
    }

    #[test]
    fn test_home_routes() {
        assert_eq!(home_route(Role::Student).path(), "/dashboard");
        assert_eq!(home_route(Role::Warden).path(), "/warden/dashboard");
        assert_eq!(home_route(Role::Admin).path(), "/admin/dashboard");
        assert_eq!(home_route_for_name("ADMIN"), Route::AdminDashboard);
        assert_eq!(home_route_for_name("caretaker"), Route::StudentDashboard);
    }

    #[test]
    fn test_resolve_follows_redirects() {
        assert_eq!(
            resolve(GuardState::Unauthenticated, "/"),
            Some(Route::Login)
        );
        assert_eq!(
            resolve(GuardState::AuthenticatedAs(Role::Student), "/admin/login"),
            Some(Route::StudentDashboard)
        );
        assert_eq!(
            resolve(GuardState::AuthenticatedAs(Role::Admin), "/admin/rooms"),
            Some(Route::AdminRooms)
        );
        assert_eq!(resolve(GuardState::Unauthenticated, "/missing"), None);
    }

    #[test]
    fn test_menus_only_hold_allowed_routes() {
        assert_eq!(menu_for(Role::Student).len(), 5);
        assert_eq!(menu_for(Role::Warden).len(), 3);
        assert_eq!(menu_for(Role::Admin).len(), 6);
        assert_eq!(menu_for(Role::Warden)[0], Route::WardenDashboard);
    }
}
