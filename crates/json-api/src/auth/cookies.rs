//! Refresh token cookie.

use jiff::SignedDuration;
use salvo::{
    http::cookie::{Cookie, SameSite, time::Duration},
    prelude::*,
};

/// Path the refresh cookie is scoped to, so it only travels with auth requests.
const COOKIE_PATH: &str = "/api/auth";

/// How the refresh token cookie is named and issued.
#[derive(Debug, Clone)]
pub(crate) struct RefreshCookie {
    pub(crate) name: String,
    pub(crate) secure: bool,
    pub(crate) max_age: SignedDuration,
}

impl RefreshCookie {
    /// The refresh token sent with `req`, if any.
    pub(crate) fn read<'a>(&self, req: &'a Request) -> Option<&'a str> {
        req.cookie(&self.name).map(Cookie::value)
    }

    /// Attach `token` as an HttpOnly cookie.
    pub(crate) fn set(&self, res: &mut Response, token: String) {
        res.add_cookie(self.build(token, Duration::seconds(self.max_age.as_secs())));
    }

    /// Expire the cookie on the client.
    pub(crate) fn clear(&self, res: &mut Response) {
        res.add_cookie(self.build(String::new(), Duration::ZERO));
    }

    fn build(&self, value: String, max_age: Duration) -> Cookie<'static> {
        Cookie::build((self.name.clone(), value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path(COOKIE_PATH)
            .max_age(max_age)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cookie() -> RefreshCookie {
        RefreshCookie {
            name: "refresh_token".to_string(),
            secure: false,
            max_age: SignedDuration::from_hours(24 * 7),
        }
    }

    #[test]
    fn issued_cookie_is_http_only_and_scoped() {
        let issued = cookie().build("token".to_string(), Duration::seconds(60));

        assert_eq!(issued.name(), "refresh_token");
        assert_eq!(issued.value(), "token");
        assert_eq!(issued.http_only(), Some(true));
        assert_eq!(issued.same_site(), Some(SameSite::Lax));
        assert_eq!(issued.path(), Some("/api/auth"));
        assert_eq!(issued.max_age(), Some(Duration::seconds(60)));
    }

    #[test]
    fn cleared_cookie_expires_immediately() {
        let mut res = Response::new();

        cookie().clear(&mut res);

        let cleared = res.cookie("refresh_token");

        assert_eq!(cleared.map(Cookie::value), Some(""));
        assert_eq!(cleared.and_then(Cookie::max_age), Some(Duration::ZERO));
    }
}
