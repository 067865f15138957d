use contracts::system::users::{
    ChangePasswordDto, CreateUserDto, CreateUserResponse, UpdateProfileDto, UpdateUserDto, User,
};
use uuid::Uuid;

use crate::shared::http::{self, ApiError};

/// Fetch all users
pub async fn fetch_users() -> Result<Vec<User>, ApiError> {
    http::get_json("/users").await
}

/// Create new user; the response carries the generated temporary password
pub async fn create_user(dto: &CreateUserDto) -> Result<CreateUserResponse, ApiError> {
    dto.validate().map_err(ApiError::Validation)?;
    http::post_json("/users", dto).await
}

pub async fn update_user(id: Uuid, dto: &UpdateUserDto) -> Result<User, ApiError> {
    http::put_json(&format!("/users/{}", id), dto).await
}

pub async fn delete_user(id: Uuid) -> Result<(), ApiError> {
    http::delete(&format!("/users/{}", id)).await
}

/// Current user profile
pub async fn fetch_me() -> Result<User, ApiError> {
    http::get_json("/users/me").await
}

pub async fn update_me(dto: &UpdateProfileDto) -> Result<User, ApiError> {
    http::put_json("/users/me", dto).await
}

pub async fn change_password(dto: &ChangePasswordDto) -> Result<(), ApiError> {
    dto.validate().map_err(ApiError::Validation)?;
    http::post_json_no_content("/users/me/change-password", dto).await
}
