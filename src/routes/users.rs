use super::{RouteEntry, RoutePolicy};
use crate::controller::Handler;
use crate::validation::{Validator, Variant};

/// User account routes.
///
/// Under the compatible policy only sign-up, email verification and login
/// validate their bodies, and the reset route is guarded but not validated.
pub fn routes(policy: RoutePolicy) -> Vec<RouteEntry> {
    let strict = policy == RoutePolicy::Strict;

    vec![
        RouteEntry::post("/users/signUp", Handler::Register).validate(Variant::Register),
        RouteEntry::post("/users/verifyEmail", Handler::VerifyEmail).validate(Variant::VerifyEmail),
        RouteEntry::post("/users/resendEmailVerification", Handler::ResendEmailVerification)
            .when(strict, |e| e.validate(Variant::ResendOtp)),
        RouteEntry::post("/users/login", Handler::Login).validate(Variant::Login),
        RouteEntry::post("/users/forgotPassword", Handler::ForgotPassword)
            .when(strict, |e| e.validate(Variant::ForgotPassword)),
        RouteEntry::post("/users/verifyPasswordOtp", Handler::VerifyPasswordOtp),
        RouteEntry::post("/users/reset", Handler::ResetPassword)
            .authorize()
            .when(strict, |e| {
                e.validate_with(Validator::new(Variant::ResetPassword).with_confirmation())
            }),
    ]
}
