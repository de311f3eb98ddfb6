pub mod controller;
pub mod layer;
pub mod viewport;
