pub mod forecast;
pub mod telegram;
