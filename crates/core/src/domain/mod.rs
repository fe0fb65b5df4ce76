pub mod activity;
pub mod company;
pub mod contact;
pub mod deal;
pub mod product;
pub mod user;
