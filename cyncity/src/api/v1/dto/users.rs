use serde::Deserialize;
use validator::Validate;

use crate::error::{CyncityError, Result};
use crate::models::{NewUser, UserPatch, UserRole, UserStatus};
use crate::validation::{required, validate_role, validate_status, OrderedValidate};

/// Request body for `POST /api/v1/users`.
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[validate(
        required(message = "Name is required"),
        length(min = 2, message = "Name must be at least 2 characters")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "Email is required"),
        email(message = "Invalid email address")
    )]
    pub email: Option<String>,
    /// One of `admin`, `editor`, `viewer`.
    #[validate(
        required(message = "Role is required"),
        custom(function = "validate_role")
    )]
    pub role: Option<String>,
    /// One of `active`, `suspended`.
    #[validate(
        required(message = "Status is required"),
        custom(function = "validate_status")
    )]
    pub status: Option<String>,
}

impl OrderedValidate for CreateUserRequest {
    const FIELD_ORDER: &'static [&'static str] = &["name", "email", "role", "status"];
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = CyncityError;

    fn try_from(req: CreateUserRequest) -> Result<Self> {
        req.validate_ordered()?;
        Ok(Self {
            name: required(req.name, "name")?,
            email: required(req.email, "email")?,
            role: parse_role(required(req.role, "role")?)?,
            status: parse_status(required(req.status, "status")?)?,
        })
    }
}

/// Request body for `PATCH /api/v1/users/{id}`. Absent fields are left as is.
#[derive(Debug, Clone, Default, Deserialize, Validate, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    #[validate(custom(function = "validate_role"))]
    pub role: Option<String>,
    #[validate(custom(function = "validate_status"))]
    pub status: Option<String>,
}

impl OrderedValidate for UpdateUserRequest {
    const FIELD_ORDER: &'static [&'static str] = &["name", "email", "role", "status"];
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = CyncityError;

    fn try_from(req: UpdateUserRequest) -> Result<Self> {
        req.validate_ordered()?;
        Ok(Self {
            name: req.name,
            email: req.email,
            role: req.role.map(parse_role).transpose()?,
            status: req.status.map(parse_status).transpose()?,
        })
    }
}

fn parse_role(raw: String) -> Result<UserRole> {
    raw.parse().map_err(CyncityError::Validation)
}

fn parse_status(raw: String) -> Result<UserStatus> {
    raw.parse().map_err(CyncityError::Validation)
}
