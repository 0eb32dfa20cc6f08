/// Name of the cookie holding the access token.
pub const ACCESS_COOKIE: &str = "access_token";

/// Pages reachable without signing in.
pub const PUBLIC_ROUTES: [&str; 2] = ["/login", "/register"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    RedirectToLogin,
    RedirectToHome,
}

/// Decides where a visit to `path` goes, given whether an access token cookie
/// is present. Signed-out users only see the public pages; signed-in users
/// skip them.
#[must_use]
pub fn guard(path: &str, has_access_token: bool) -> RouteDecision {
    let is_public = PUBLIC_ROUTES.contains(&path);
    match (has_access_token, is_public) {
        (false, false) => RouteDecision::RedirectToLogin,
        (true, true) => RouteDecision::RedirectToHome,
        _ => RouteDecision::Allow,
    }
}
