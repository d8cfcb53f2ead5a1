use crate::routes::{Endpoint, RouteGroup, unavailable};

pub struct ExerciseRoutes;

impl RouteGroup for ExerciseRoutes {
    fn name(&self) -> &'static str {
        "exercise"
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![Endpoint::get("/exercises", unavailable)]
    }
}
