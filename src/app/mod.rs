// App layer: HTTP routes and the wiring that turns a ServiceConfig into running state.

pub mod api;
pub mod state;

pub use api::app_router;
pub use state::{build_state, build_state_with, AppState, LiveState};
