use crate::routes::{Endpoint, RouteGroup, unavailable};

/// Completed workout sessions.
pub struct LoggedWorkoutRoutes;

impl RouteGroup for LoggedWorkoutRoutes {
    fn name(&self) -> &'static str {
        "logged_workout"
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![
            Endpoint::get("/logged-workouts", unavailable),
            Endpoint::post("/logged-workouts", unavailable),
        ]
    }
}
