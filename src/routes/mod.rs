//! Route groups mounted under the `/api` prefix.
//!
//! Every group implements [`RouteGroup`] and hands the composition root a
//! list of `(method, path, handler)` endpoints. The table is checked with
//! [`check_groups`] before the server starts, so a group can neither escape
//! the prefix nor shadow another group's endpoint.

use std::collections::HashSet;

use actix_web::http::Method;
use actix_web::{FromRequest, Handler, HttpResponse, Responder, Route, Scope, web};
use thiserror::Error;

use crate::errors::{ApiError, ApiResult};
use crate::models::auth::SessionUser;

pub mod account;
pub mod auth;
pub mod exercise;
pub mod friend;
pub mod goal;
pub mod health;
pub mod logged_workout;
pub mod meal;
pub mod track;
pub mod workout;

pub const API_PREFIX: &str = "/api";
pub const HEALTH_PATH: &str = "/health";

/// One endpoint of a route group. `path` is relative to [`API_PREFIX`].
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
    route: Route,
}

impl Endpoint {
    pub fn new<F, Args>(method: Method, path: &'static str, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        let route = web::method(method.clone()).to(handler);
        Self {
            method,
            path,
            route,
        }
    }

    pub fn get<F, Args>(path: &'static str, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        Self::new(Method::GET, path, handler)
    }

    pub fn post<F, Args>(path: &'static str, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        Self::new(Method::POST, path, handler)
    }

    pub fn delete<F, Args>(path: &'static str, handler: F) -> Self
    where
        F: Handler<Args>,
        Args: FromRequest + 'static,
        F::Output: Responder + 'static,
    {
        Self::new(Method::DELETE, path, handler)
    }
}

/// A cohesive set of endpoints registered together under [`API_PREFIX`].
pub trait RouteGroup {
    fn name(&self) -> &'static str;

    /// Builds the endpoints. Called once per worker, so handlers are fresh
    /// each time.
    fn endpoints(&self) -> Vec<Endpoint>;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompositionError {
    #[error("route group `{group}`: path `{path}` must start with `/`")]
    RelativePath { group: &'static str, path: &'static str },

    #[error("route group `{group}`: path `{path}` already carries the `/api` prefix")]
    Prefixed { group: &'static str, path: &'static str },

    #[error("route group `{group}`: `{method} {path}` shadows the health endpoint")]
    ShadowsHealth {
        group: &'static str,
        method: Method,
        path: &'static str,
    },

    #[error("route group `{group}`: `{method} {path}` is already registered")]
    Duplicate {
        group: &'static str,
        method: Method,
        path: &'static str,
    },

    #[error("route group `{0}` is registered twice")]
    DuplicateGroup(&'static str),
}

/// The nine groups of the API, in registration order.
pub fn api_groups() -> Vec<Box<dyn RouteGroup>> {
    vec![
        Box::new(auth::AuthRoutes),
        Box::new(account::AccountRoutes),
        Box::new(meal::MealRoutes),
        Box::new(workout::WorkoutRoutes),
        Box::new(exercise::ExerciseRoutes),
        Box::new(logged_workout::LoggedWorkoutRoutes),
        Box::new(goal::GoalRoutes),
        Box::new(friend::FriendRoutes),
        Box::new(track::TrackRoutes),
    ]
}

/// Validates the endpoint table of `groups`.
pub fn check_groups(groups: &[Box<dyn RouteGroup>]) -> Result<(), CompositionError> {
    let mut names = HashSet::new();
    let mut seen = HashSet::new();

    for group in groups {
        let name = group.name();
        if !names.insert(name) {
            return Err(CompositionError::DuplicateGroup(name));
        }

        for endpoint in group.endpoints() {
            let path = endpoint.path;
            if !path.starts_with('/') {
                return Err(CompositionError::RelativePath { group: name, path });
            }
            if path == API_PREFIX || path.starts_with(&format!("{API_PREFIX}/")) {
                return Err(CompositionError::Prefixed { group: name, path });
            }
            if path == HEALTH_PATH && endpoint.method == Method::GET {
                return Err(CompositionError::ShadowsHealth {
                    group: name,
                    method: endpoint.method,
                    path,
                });
            }
            if !seen.insert((endpoint.method.clone(), route_pattern(path))) {
                return Err(CompositionError::Duplicate {
                    group: name,
                    method: endpoint.method,
                    path,
                });
            }
        }
    }

    Ok(())
}

/// `path` with every `{..}` segment replaced by `{}`, so two paths that only
/// differ in parameter names compare equal.
fn route_pattern(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if segment.starts_with('{') && segment.ends_with('}') {
                "{}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// The `/api` scope: the namespaced health check followed by every group.
pub fn api_scope(groups: Vec<Box<dyn RouteGroup>>) -> Scope {
    let mut scope = web::scope(API_PREFIX).route(HEALTH_PATH, web::get().to(health::health));

    for group in groups {
        let name = group.name();
        for endpoint in group.endpoints() {
            log::debug!(
                "Mounting {} {API_PREFIX}{} ({name})",
                endpoint.method,
                endpoint.path
            );
            scope = scope.route(endpoint.path, endpoint.route);
        }
    }

    scope
}

/// Handler of endpoints whose domain service is not wired into this
/// service. Callers still need a signed-in session.
pub async fn unavailable(_user: SessionUser) -> ApiResult<HttpResponse> {
    Err(ApiError::NotImplemented)
}

/// Same as [`unavailable`] for endpoints reachable without a session.
pub async fn unavailable_public() -> ApiResult<HttpResponse> {
    Err(ApiError::NotImplemented)
}
