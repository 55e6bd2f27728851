use super::{FieldRule, Step};
use std::fmt;

const FULLNAME_MSG: &str = "FullName is required and must be at least 4 characters";
const USERNAME_MSG: &str = "UserName is required and must be at least 3 characters";
const EMAIL_MSG: &str = "Invalid email address";
const PASSWORD_MSG: &str = "Password must be at least 8 characters";
const PHONE_MSG: &str = "PhoneNumber must be in a valid format";
const LOCATION_MSG: &str = "Location is required";
const LOGIN_USERNAME_MSG: &str = "username is required";
const PROFILE_PIC_MSG: &str = "ProfilePic is required";
const OTP_MSG: &str = "otp is required and must be exactly 6 characters";

const FULLNAME_STEPS: &[Step] = &[Step::Trim, Step::NotEmpty, Step::min_len(4)];
const EMAIL_STEPS: &[Step] = &[Step::Email, Step::NormalizeEmail];
const PASSWORD_STEPS: &[Step] = &[Step::Trim, Step::min_len(8)];
const PHONE_STEPS: &[Step] = &[Step::MobilePhone];
const PRESENT_STEPS: &[Step] = &[Step::Trim, Step::NotEmpty];
const USERNAME_STEPS: &[Step] = &[Step::Trim, Step::NotEmpty, Step::min_len(3)];
const OTP_STEPS: &[Step] = &[Step::Trim, Step::NotEmpty, Step::exact_len(6)];

const REGISTER: &[FieldRule] = &[
    FieldRule::required("fullname", FULLNAME_MSG, FULLNAME_STEPS),
    FieldRule::required("username", USERNAME_MSG, USERNAME_STEPS),
    FieldRule::required("email", EMAIL_MSG, EMAIL_STEPS),
    FieldRule::required("password_hash", PASSWORD_MSG, PASSWORD_STEPS),
    FieldRule::optional("phone", PHONE_MSG, PHONE_STEPS),
    FieldRule::optional("phone2", PHONE_MSG, PHONE_STEPS),
    FieldRule::optional("location", LOCATION_MSG, PRESENT_STEPS),
];

const LOGIN: &[FieldRule] = &[
    FieldRule::optional("email", EMAIL_MSG, EMAIL_STEPS),
    FieldRule::optional("username", LOGIN_USERNAME_MSG, PRESENT_STEPS),
    FieldRule::required("password_hash", PASSWORD_MSG, PASSWORD_STEPS),
];

// Profile updates spell the name field `fullName`, unlike registration.
const UPDATE: &[FieldRule] = &[
    FieldRule::optional("fullName", FULLNAME_MSG, FULLNAME_STEPS),
    FieldRule::optional("phone", PHONE_MSG, PHONE_STEPS),
    FieldRule::optional("phone2", PHONE_MSG, PHONE_STEPS),
    FieldRule::optional("location", LOCATION_MSG, PRESENT_STEPS),
    FieldRule::optional("profile_pic", PROFILE_PIC_MSG, PRESENT_STEPS),
];

const CHANGE_PASSWORD: &[FieldRule] = &[
    FieldRule::required("password_hash", PASSWORD_MSG, PASSWORD_STEPS),
    FieldRule::required("new_password", PASSWORD_MSG, PASSWORD_STEPS),
    FieldRule::required("confirm_password", PASSWORD_MSG, PASSWORD_STEPS),
];

const VERIFY_EMAIL: &[FieldRule] = &[FieldRule::required("otp", OTP_MSG, OTP_STEPS)];

const EMAIL_ONLY: &[FieldRule] = &[FieldRule::required("email", EMAIL_MSG, EMAIL_STEPS)];

const RESET_PASSWORD: &[FieldRule] = &[
    FieldRule::required("new_password", PASSWORD_MSG, PASSWORD_STEPS),
    FieldRule::required("confirm_password", PASSWORD_MSG, PASSWORD_STEPS),
];

/// The request shapes that have a validator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    Register,
    Login,
    Update,
    ChangePassword,
    VerifyEmail,
    ResendOtp,
    ForgotPassword,
    ResetPassword,
}

impl Variant {
    pub const ALL: [Variant; 8] = [
        Variant::Register,
        Variant::Login,
        Variant::Update,
        Variant::ChangePassword,
        Variant::VerifyEmail,
        Variant::ResendOtp,
        Variant::ForgotPassword,
        Variant::ResetPassword,
    ];

    /// The variant's rules, in the order their messages are reported.
    pub fn rules(self) -> &'static [FieldRule] {
        match self {
            Variant::Register => REGISTER,
            Variant::Login => LOGIN,
            Variant::Update => UPDATE,
            Variant::ChangePassword => CHANGE_PASSWORD,
            Variant::VerifyEmail => VERIFY_EMAIL,
            Variant::ResendOtp | Variant::ForgotPassword => EMAIL_ONLY,
            Variant::ResetPassword => RESET_PASSWORD,
        }
    }

    pub(crate) fn confirmation_pair(self) -> Option<(&'static str, &'static str)> {
        match self {
            Variant::ChangePassword | Variant::ResetPassword => {
                Some(("new_password", "confirm_password"))
            }
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Variant::Register => "register",
            Variant::Login => "login",
            Variant::Update => "update",
            Variant::ChangePassword => "changePassword",
            Variant::VerifyEmail => "verifyEmail",
            Variant::ResendOtp => "resendOtp",
            Variant::ForgotPassword => "forgotPassword",
            Variant::ResetPassword => "resetPassword",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
