//! State

use std::sync::Arc;

use storefront_app::context::AppContext;

use crate::auth::cookies::RefreshCookie;

#[derive(Debug, Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,
    pub(crate) refresh_cookie: RefreshCookie,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, refresh_cookie: RefreshCookie) -> Arc<Self> {
        Arc::new(Self {
            app,
            refresh_cookie,
        })
    }
}
