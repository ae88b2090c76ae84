pub mod account;
pub mod account_id;
pub mod authorization;
pub mod credential;
pub mod email;
pub mod password;
