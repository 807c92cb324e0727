use serde::Deserialize;
use validator::Validate;

pub use supplydesk_auth::IssuedToken;

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserDto {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 100,
        message = "Password must be between 6 and 100 characters"
    ))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match"))]
    pub confirm_password: String,
}

#[derive(Deserialize, Validate)]
pub struct LoginUserDto {
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 100,
        message = "Password must be between 6 and 100 characters"
    ))]
    pub password: String,
}
