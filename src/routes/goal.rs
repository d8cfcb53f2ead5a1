use crate::routes::{Endpoint, RouteGroup, unavailable};

pub struct GoalRoutes;

impl RouteGroup for GoalRoutes {
    fn name(&self) -> &'static str {
        "goal"
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![
            Endpoint::get("/goals", unavailable),
            Endpoint::post("/goals", unavailable),
            Endpoint::post("/goals/{goal_id}/progress", unavailable),
            Endpoint::post("/goals/{goal_id}/complete", unavailable),
            Endpoint::post("/goals/{goal_id}/cancel", unavailable),
        ]
    }
}
