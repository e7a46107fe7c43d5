pub mod custom_extract;
pub mod sqlx_tester;
