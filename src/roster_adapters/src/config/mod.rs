pub mod settings;

pub use settings::{AppSetting, AuthSetting, JwtSetting, PostgresSetting, RosterSetting};
