//! Reactive state, side-effect host, and UI for the OrbitDrive browser client.
//!
//! Actions flow through [`reduce_drive`]; the reducer stays pure and returns
//! [`RuntimeEffect`] values that the host executes against the injected [`DriveServices`].

pub mod components;
pub mod config;
mod effect_executor;
mod host;
pub mod model;
pub mod persistence;
pub mod reducer;
mod runtime_context;

pub use components::{
    Dashboard, ForgotPasswordPage, InitializingScreen, LoginPage, ProtectedRoute, RegisterPage,
    ResetPasswordPage, VerifyEmailPage,
};
pub use host::{DriveHostContext, DriveServices};
pub use model::*;
pub use persistence::{load_auth, load_file_system, persist_auth, persist_file_system};
pub use reducer::{reduce_drive, ContextMenuCommand, DriveAction, ReducerError, RuntimeEffect};
pub use runtime_context::{use_drive_runtime, DriveProvider, DriveRuntimeContext};
