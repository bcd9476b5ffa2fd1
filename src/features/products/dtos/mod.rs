mod product_dto;
mod upload_dto;

pub use product_dto::*;
pub use upload_dto::*;
