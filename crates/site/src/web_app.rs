use drive_runtime::{
    Dashboard, DriveProvider, DriveServices, ForgotPasswordPage, LoginPage, ProtectedRoute,
    RegisterPage, ResetPasswordPage, VerifyEmailPage,
};
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

#[component]
pub fn SiteApp() -> impl IntoView {
    provide_meta_context();

    view! {
        <Title text="OrbitDrive" />
        <Meta name="description" content="Cloud file manager for your OrbitDrive storage." />

        <DriveProvider services=DriveServices::browser()>
            <Router>
                <main class="site-root">
                    <Routes>
                        <Route path="" view=DriveEntry />
                        <Route path="/login" view=LoginPage />
                        <Route path="/register" view=RegisterPage />
                        <Route path="/forgot-password" view=ForgotPasswordPage />
                        <Route path="/reset-password" view=ResetPasswordPage />
                        <Route path="/verify-email/:token" view=VerifyEmailPage />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>
            </Router>
        </DriveProvider>
    }
}

#[component]
pub fn DriveEntry() -> impl IntoView {
    view! {
        <ProtectedRoute>
            <Dashboard />
        </ProtectedRoute>
    }
}

#[component]
fn NotFound() -> impl IntoView {
    view! { <Redirect path="/" /> }
}
