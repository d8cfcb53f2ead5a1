use crate::routes::{Endpoint, RouteGroup, unavailable};

pub struct MealRoutes;

impl RouteGroup for MealRoutes {
    fn name(&self) -> &'static str {
        "meal"
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![
            Endpoint::get("/meals", unavailable),
            Endpoint::post("/meals", unavailable),
        ]
    }
}
