pub mod dto;
pub mod handlers;
pub mod lambda;
pub mod response;
pub mod routes;
pub mod state;

pub use lambda::{handle_event, ApiGatewayProxyRequest, ApiGatewayProxyResponse};
pub use routes::create_doh_routes;
pub use state::AppState;
