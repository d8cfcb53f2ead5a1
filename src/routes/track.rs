use crate::routes::{Endpoint, RouteGroup, unavailable};

pub struct TrackRoutes;

impl RouteGroup for TrackRoutes {
    fn name(&self) -> &'static str {
        "track"
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![Endpoint::get("/track", unavailable)]
    }
}
