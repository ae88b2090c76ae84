pub mod session;

pub use session::{
    Claims, SessionConfig, SessionError, generate_session_cookie, generate_session_token,
    resolve_session,
};
