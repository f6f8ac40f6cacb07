pub mod encoded_image;
pub mod errors;

pub use encoded_image::*;
pub use errors::*;
