use crate::routes::{Endpoint, RouteGroup, unavailable};

/// Friend requests, the friend list and challenges between friends.
pub struct FriendRoutes;

impl RouteGroup for FriendRoutes {
    fn name(&self) -> &'static str {
        "friend"
    }

    fn endpoints(&self) -> Vec<Endpoint> {
        vec![
            Endpoint::get("/friends/all", unavailable),
            Endpoint::post("/friends/accept/{friendship_id}", unavailable),
            Endpoint::post("/friends/decline/{friendship_id}", unavailable),
            Endpoint::delete("/friends/remove/{friend_user_id}", unavailable),
            Endpoint::post("/challenges/accept/{challenge_id}", unavailable),
            Endpoint::post("/challenges/decline/{challenge_id}", unavailable),
        ]
    }
}
