pub mod wheel;
pub mod rewards_wheel;
pub mod product_wheel;
