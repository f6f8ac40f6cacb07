pub mod entities;
pub mod errors;
pub mod render;
pub mod services;

pub use entities::*;
pub use errors::*;
pub use services::SessionController;
