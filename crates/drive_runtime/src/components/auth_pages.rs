//! Sign-in, registration, and account recovery pages.
//!
//! Each form validates locally with [`drive_model::FormErrors`] before calling the backend.
//! Successful sign-in paths store credentials through [`DriveAction::SetCredentials`] and
//! navigate to the dashboard.

use std::time::Duration;

use drive_model::{
    validate_confirm_password, validate_email, validate_login_password, validate_name,
    validate_new_password, EmailRequest, ErrorSource, FormErrors, LoginRequest,
    RegisterRequest, ResetPasswordRequest,
};
use leptos_router::{use_navigate, use_params_map, use_query_map, NavigateOptions, A};

use super::*;

const VERIFY_REDIRECT_DELAY: Duration = Duration::from_secs(2);

fn is_signed_in(runtime: DriveRuntimeContext) -> bool {
    runtime.state.with(|state| state.auth.is_authenticated)
}

#[component]
fn AuthCard(title: &'static str, subtitle: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="drive-auth">
            <div class="drive-auth-card">
                <header class="drive-auth-header">
                    <span class="drive-brand-logo" aria-hidden="true"></span>
                    <h1>{title}</h1>
                    <p>{subtitle}</p>
                </header>
                {children()}
            </div>
        </div>
    }
}

#[component]
fn AuthField(
    label: &'static str,
    /// Validation key reported by [`FormErrors::message_for`].
    field: &'static str,
    input_type: &'static str,
    value: RwSignal<String>,
    errors: RwSignal<FormErrors>,
    #[prop(optional)] autocomplete: &'static str,
    #[prop(optional)] placeholder: &'static str,
) -> impl IntoView {
    let message = move || errors.with(|errors| errors.message_for(field));
    let input_id = format!("auth-{field}");

    view! {
        <label class="drive-field" for=input_id.clone()>
            <span class="drive-field-label">{label}</span>
            <input
                id=input_id
                class="drive-field-input"
                class:invalid=move || message().is_some()
                type=input_type
                name=field
                autocomplete=autocomplete
                placeholder=placeholder
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            {move || message().map(|message| view! { <span class="drive-field-error">{message}</span> })}
        </label>
    }
}

#[component]
fn FormAlert(message: RwSignal<Option<String>>) -> impl IntoView {
    view! {
        {move || {
            message
                .get()
                .map(|message| view! { <p class="drive-auth-error" role="alert">{message}</p> })
        }}
    }
}

#[component]
/// Email and password sign-in with a Google alternative.
pub fn LoginPage() -> impl IntoView {
    let runtime = use_drive_runtime();
    let navigate = use_navigate();
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let errors = create_rw_signal(FormErrors::default());
    let server_error = create_rw_signal(None::<String>);
    let loading = move || runtime.state.with(|state| state.auth.is_loading);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if loading() {
            return;
        }
        let request = LoginRequest {
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
        };
        let mut found = FormErrors::default();
        found.check(validate_email(&request.email));
        found.check(validate_login_password(&request.password));
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        server_error.set(None);
        runtime.dispatch_action(DriveAction::SetAuthLoading { loading: true });
        let client = runtime.host.get_value().client();
        let navigate = navigate.clone();
        spawn_local(async move {
            match client.login(&request).await {
                Ok(response) => {
                    runtime.dispatch_action(DriveAction::SetCredentials {
                        user: response.user,
                        access_token: response.access_token,
                    });
                    navigate("/", NavigateOptions::default());
                }
                Err(err) => {
                    logging::warn!("login failed: {err}");
                    server_error.set(Some(
                        err.user_message("Invalid credentials. Please try again."),
                    ));
                    runtime.dispatch_action(DriveAction::SetAuthLoading { loading: false });
                }
            }
        });
    };

    let on_google = move |_| {
        let host = runtime.host.get_value();
        if let Err(err) = drive_web::start_google_login(host.http_config()) {
            logging::warn!("google sign-in failed: {err}");
            server_error.set(Some("Something went wrong. Please try again.".to_string()));
        }
    };

    view! {
        {move || is_signed_in(runtime).then(|| view! { <Redirect path="/" /> })}
        <AuthCard title="Welcome Back" subtitle="Sign in to your OrbitDrive account">
            <form class="drive-auth-form" novalidate=true on:submit=on_submit>
                <FormAlert message=server_error />
                <AuthField
                    label="Email"
                    field="email"
                    input_type="email"
                    value=email
                    errors
                    autocomplete="email"
                    placeholder="name@example.com"
                />
                <AuthField
                    label="Password"
                    field="password"
                    input_type="password"
                    value=password
                    errors
                    autocomplete="current-password"
                />
                <A class="drive-auth-link" href="/forgot-password">
                    "Forgot?"
                </A>
                <button class="drive-button wide" type="submit" disabled=loading>
                    {move || if loading() { "Signing in..." } else { "Sign In" }}
                </button>
            </form>
            <div class="drive-auth-divider">
                <span>"or"</span>
            </div>
            <button class="drive-button secondary wide" type="button" on:click=on_google>
                "Continue with Google"
            </button>
            <p class="drive-auth-footer">
                "New here? " <A href="/register">"Join OrbitDrive"</A>
            </p>
        </AuthCard>
    }
}

#[component]
/// Account registration.
pub fn RegisterPage() -> impl IntoView {
    let runtime = use_drive_runtime();
    let navigate = use_navigate();
    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let errors = create_rw_signal(FormErrors::default());
    let server_error = create_rw_signal(None::<String>);
    let server_sources = create_rw_signal(Vec::<ErrorSource>::new());
    let submitting = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let request = RegisterRequest {
            name: name.get_untracked().trim().to_string(),
            email: email.get_untracked().trim().to_string(),
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        let mut found = FormErrors::default();
        found.check(validate_name(&request.name));
        found.check(validate_email(&request.email));
        found.check(validate_new_password(&request.password));
        found.check(validate_confirm_password(
            &request.password,
            &request.confirm_password,
        ));
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        server_error.set(None);
        server_sources.set(Vec::new());
        submitting.set(true);
        let client = runtime.host.get_value().client();
        let navigate = navigate.clone();
        spawn_local(async move {
            match client.register(&request).await {
                Ok(response) => {
                    runtime.dispatch_action(DriveAction::SetCredentials {
                        user: response.user,
                        access_token: response.access_token,
                    });
                    navigate("/", NavigateOptions::default());
                }
                Err(err) => {
                    logging::warn!("registration failed: {err}");
                    server_error.set(Some(
                        err.user_message("Registration failed. Please check your inputs."),
                    ));
                    server_sources.set(err.sources().to_vec());
                }
            }
            submitting.set(false);
        });
    };

    view! {
        {move || is_signed_in(runtime).then(|| view! { <Redirect path="/" /> })}
        <AuthCard title="Create Account" subtitle="Join the OrbitDrive cosmos today">
            <form class="drive-auth-form" novalidate=true on:submit=on_submit>
                <FormAlert message=server_error />
                <Show when=move || server_sources.with(|sources| !sources.is_empty()) fallback=|| ()>
                    <ul class="drive-auth-sources">
                        <For
                            each=move || server_sources.get()
                            key=|source| format!("{}:{}", source.path, source.message)
                            let:source
                        >
                            <li>{source.message}</li>
                        </For>
                    </ul>
                </Show>
                <AuthField
                    label="Full Name"
                    field="name"
                    input_type="text"
                    value=name
                    errors
                    autocomplete="name"
                />
                <AuthField
                    label="Email"
                    field="email"
                    input_type="email"
                    value=email
                    errors
                    autocomplete="email"
                    placeholder="name@example.com"
                />
                <AuthField
                    label="Password"
                    field="password"
                    input_type="password"
                    value=password
                    errors
                    autocomplete="new-password"
                />
                <AuthField
                    label="Confirm Password"
                    field="confirmPassword"
                    input_type="password"
                    value=confirm_password
                    errors
                    autocomplete="new-password"
                />
                <button class="drive-button wide" type="submit" disabled=move || submitting.get()>
                    {move || if submitting.get() { "Creating account..." } else { "Create Account" }}
                </button>
            </form>
            <p class="drive-auth-footer">
                "Already a member? " <A href="/login">"Sign In"</A>
            </p>
        </AuthCard>
    }
}

#[component]
/// Requests a password reset email.
pub fn ForgotPasswordPage() -> impl IntoView {
    let runtime = use_drive_runtime();
    let email = create_rw_signal(String::new());
    let errors = create_rw_signal(FormErrors::default());
    let server_error = create_rw_signal(None::<String>);
    let submitting = create_rw_signal(false);
    let sent = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let request = EmailRequest {
            email: email.get_untracked().trim().to_string(),
        };
        let mut found = FormErrors::default();
        found.check(validate_email(&request.email));
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        server_error.set(None);
        submitting.set(true);
        let client = runtime.host.get_value().client();
        spawn_local(async move {
            match client.forgot_password(&request).await {
                Ok(()) => sent.set(true),
                Err(err) => {
                    logging::warn!("forgot-password request failed: {err}");
                    server_error.set(Some(
                        err.user_message("Something went wrong. Please try again."),
                    ));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        <AuthCard title="Forgot Password?" subtitle="Enter your email to receive a reset link">
            <Show
                when=move || sent.get()
                fallback=move || {
                    view! {
                        <form class="drive-auth-form" novalidate=true on:submit=on_submit>
                            <FormAlert message=server_error />
                            <AuthField
                                label="Email"
                                field="email"
                                input_type="email"
                                value=email
                                errors
                                autocomplete="email"
                                placeholder="name@example.com"
                            />
                            <button
                                class="drive-button wide"
                                type="submit"
                                disabled=move || submitting.get()
                            >
                                {move || if submitting.get() { "Sending..." } else { "Send Reset Link" }}
                            </button>
                        </form>
                    }
                }
            >
                <div class="drive-auth-success" role="status">
                    <h2>"Check your inbox!"</h2>
                    <p>
                        "If an account exists for that email, we have sent password reset instructions."
                    </p>
                </div>
            </Show>
            <p class="drive-auth-footer">
                <A href="/login">"Back to Login"</A>
            </p>
        </AuthCard>
    }
}

#[component]
/// Sets a new password from the `?token=` link sent by email.
pub fn ResetPasswordPage() -> impl IntoView {
    let runtime = use_drive_runtime();
    let query = use_query_map();
    let token = move || {
        query.with(|query| {
            query
                .get("token")
                .filter(|token| !token.trim().is_empty())
                .cloned()
        })
    };
    let password = create_rw_signal(String::new());
    let confirm_password = create_rw_signal(String::new());
    let errors = create_rw_signal(FormErrors::default());
    let server_error = create_rw_signal(None::<String>);
    let submitting = create_rw_signal(false);
    let done = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(token) = token() else {
            return;
        };
        if submitting.get_untracked() {
            return;
        }
        let request = ResetPasswordRequest {
            password: password.get_untracked(),
            confirm_password: confirm_password.get_untracked(),
        };
        let mut found = FormErrors::default();
        found.check(validate_new_password(&request.password));
        found.check(validate_confirm_password(
            &request.password,
            &request.confirm_password,
        ));
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        server_error.set(None);
        submitting.set(true);
        let client = runtime.host.get_value().client();
        spawn_local(async move {
            match client.reset_password(&token, &request).await {
                Ok(()) => done.set(true),
                Err(err) => {
                    logging::warn!("password reset failed: {err}");
                    server_error.set(Some(
                        err.user_message("Something went wrong. Please try again."),
                    ));
                }
            }
            submitting.set(false);
        });
    };

    view! {
        {move || match (token(), done.get()) {
            (None, _) => {
                view! {
                    <div class="drive-auth">
                        <div class="drive-auth-card">
                            <p class="drive-auth-error" role="alert">
                                "Invalid or missing reset token."
                            </p>
                            <p class="drive-auth-footer">
                                <A href="/login">"Return to Login"</A>
                            </p>
                        </div>
                    </div>
                }
                .into_view()
            }
            (Some(_), true) => {
                view! {
                    <AuthCard title="Reset Password" subtitle="Create a strong new password">
                        <div class="drive-auth-success" role="status">
                            <h2>"Password Reset Successful!"</h2>
                            <p>
                                "Your password has been updated properly. You can now sign in with your new credentials."
                            </p>
                        </div>
                        <p class="drive-auth-footer">
                            <A href="/login">"Back to Login"</A>
                        </p>
                    </AuthCard>
                }
                .into_view()
            }
            (Some(_), false) => {
                view! {
                    <AuthCard title="Reset Password" subtitle="Create a strong new password">
                        <form class="drive-auth-form" novalidate=true on:submit=on_submit>
                            <FormAlert message=server_error />
                            <AuthField
                                label="New Password"
                                field="password"
                                input_type="password"
                                value=password
                                errors
                                autocomplete="new-password"
                            />
                            <AuthField
                                label="Confirm Password"
                                field="confirmPassword"
                                input_type="password"
                                value=confirm_password
                                errors
                                autocomplete="new-password"
                            />
                            <button
                                class="drive-button wide"
                                type="submit"
                                disabled=move || submitting.get()
                            >
                                {move || if submitting.get() { "Updating..." } else { "Reset Password" }}
                            </button>
                        </form>
                    </AuthCard>
                }
                .into_view()
            }
        }}
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Verification {
    Pending,
    Verified,
    Failed(String),
}

#[component]
/// Confirms the `/verify-email/:token` link and signs the account in.
pub fn VerifyEmailPage() -> impl IntoView {
    let runtime = use_drive_runtime();
    let navigate = use_navigate();
    let params = use_params_map();
    let status = create_rw_signal(Verification::Pending);

    // Runs once per token; the link is single-use.
    create_effect(move |previous: Option<Option<String>>| {
        let token = params.with(|params| params.get("token").cloned());
        if previous.as_ref() == Some(&token) {
            return token;
        }
        let Some(value) = token.clone().filter(|token| !token.trim().is_empty()) else {
            status.set(Verification::Failed(
                "The verification link is invalid or has expired.".to_string(),
            ));
            return token;
        };
        status.set(Verification::Pending);
        let client = runtime.host.get_value().client();
        let navigate = navigate.clone();
        spawn_local(async move {
            match client.verify_email(&value).await {
                Ok(response) => {
                    status.set(Verification::Verified);
                    runtime.dispatch_action(DriveAction::PushToast {
                        level: ToastLevel::Success,
                        message: "Email verified successfully!".to_string(),
                    });
                    runtime.dispatch_action(DriveAction::SetCredentials {
                        user: response.user,
                        access_token: response.access_token,
                    });
                    set_timeout(
                        move || navigate("/", NavigateOptions::default()),
                        VERIFY_REDIRECT_DELAY,
                    );
                }
                Err(err) => {
                    logging::warn!("email verification failed: {err}");
                    status.set(Verification::Failed(
                        err.user_message("The verification link is invalid or has expired."),
                    ));
                }
            }
        });
        token
    });

    view! {
        <div class="drive-auth">
            <div class="drive-auth-card drive-verify" role="status" aria-live="polite">
                {move || match status.get() {
                    Verification::Pending => {
                        view! {
                            <span class="drive-spinner" aria-hidden="true"></span>
                            <h1>"Verifying your email"</h1>
                            <p>"Please wait while we secure your connection..."</p>
                        }
                        .into_view()
                    }
                    Verification::Verified => {
                        view! {
                            <h1>"Email Verified!"</h1>
                            <p>"Redirecting you to your drive..."</p>
                        }
                        .into_view()
                    }
                    Verification::Failed(message) => {
                        view! {
                            <h1>"Verification Failed"</h1>
                            <p class="drive-auth-error">{message}</p>
                            <ResendVerification runtime />
                            <p class="drive-auth-footer">
                                <A href="/login">"Back to Login"</A>
                            </p>
                        }
                        .into_view()
                    }
                }}
            </div>
        </div>
    }
}

#[component]
fn ResendVerification(runtime: DriveRuntimeContext) -> impl IntoView {
    let email = create_rw_signal(
        runtime
            .state
            .with_untracked(|state| state.auth.user.as_ref().map(|user| user.email.clone()))
            .unwrap_or_default(),
    );
    let errors = create_rw_signal(FormErrors::default());
    let notice = create_rw_signal(None::<String>);
    let submitting = create_rw_signal(false);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        if submitting.get_untracked() {
            return;
        }
        let request = EmailRequest {
            email: email.get_untracked().trim().to_string(),
        };
        let mut found = FormErrors::default();
        found.check(validate_email(&request.email));
        let valid = found.is_empty();
        errors.set(found);
        if !valid {
            return;
        }

        submitting.set(true);
        let client = runtime.host.get_value().client();
        spawn_local(async move {
            let message = match client.resend_verification_email(&request).await {
                Ok(()) => "A new verification link is on its way.".to_string(),
                Err(err) => {
                    logging::warn!("resending verification email failed: {err}");
                    err.user_message("Something went wrong. Please try again.")
                }
            };
            notice.set(Some(message));
            submitting.set(false);
        });
    };

    view! {
        <form class="drive-auth-form" novalidate=true on:submit=on_submit>
            <FormAlert message=notice />
            <AuthField label="Email" field="email" input_type="email" value=email errors />
            <button class="drive-button secondary wide" type="submit" disabled=move || submitting.get()>
                "Resend verification email"
            </button>
        </form>
    }
}
