use crate::routes::{Endpoint, RouteGroup, unavailable};

/// Profile of the signed-in user (nickname, date of birth, height, weight).
pub struct AccountRoutes;

impl RouteGroup for AccountRoutes {
    fn name(&self) -> &'static str {
        "account"
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![
            Endpoint::get("/account", unavailable),
            Endpoint::post("/account/update", unavailable),
        ]
    }
}
