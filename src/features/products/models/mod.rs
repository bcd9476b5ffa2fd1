mod product;

pub use product::ProductWithCategory;
