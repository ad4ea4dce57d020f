pub mod user_data;
