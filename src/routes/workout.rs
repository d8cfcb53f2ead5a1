use crate::routes::{Endpoint, RouteGroup, unavailable};

/// Workout templates owned by the signed-in user.
pub struct WorkoutRoutes;

impl RouteGroup for WorkoutRoutes {
    fn name(&self) -> &'static str {
        "workout"
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![
            Endpoint::get("/workouts", unavailable),
            Endpoint::post("/workouts", unavailable),
        ]
    }
}
