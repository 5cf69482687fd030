pub mod errors;
pub mod db;
pub mod owner;
pub mod organization;
pub mod entrepreneur;
pub mod service_category;
pub mod product_category;
pub mod service;
pub mod product;
pub mod meme;

#[cfg(test)]
mod tests;
