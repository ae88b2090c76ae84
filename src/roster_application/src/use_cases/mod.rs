pub mod access_guard;
pub mod list_accounts;
pub mod login;
pub mod moderate;
pub mod register;
