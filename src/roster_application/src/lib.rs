pub mod use_cases;

pub use use_cases::{
    access_guard::AccessGuard,
    list_accounts::ListAccountsUseCase,
    login::{LoginError, LoginUseCase},
    moderate::{
        ModerateError, ModerateUseCase, ModerationAction, ModerationReport, TargetOutcome,
        TargetReport,
    },
    register::{RegisterError, RegisterUseCase},
};
