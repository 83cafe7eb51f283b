//! Identity of the back-office caller.
//!
//! Tokens are issued by the external auth service and stored in the identity
//! cookie; this module only verifies and decodes them.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::{FromRequest, HttpRequest, dev::Payload, error::ErrorUnauthorized, web};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::models::config::ServerConfig;

/// Claims carried by the identity token.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub exp: usize,
}

impl AuthenticatedUser {
    /// Verifies the HS256 signature and expiry of `token`.
    pub fn from_jwt(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<AuthenticatedUser>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<ServerConfig>>() else {
            log::error!("Server config is not registered, cannot verify identity");
            return ready(Err(ErrorUnauthorized("unauthorized")));
        };

        let Some(token) = req
            .get_identity()
            .ok()
            .and_then(|identity| identity.id().ok())
        else {
            return ready(Err(ErrorUnauthorized("unauthorized")));
        };

        ready(
            AuthenticatedUser::from_jwt(&token, &config.secret).map_err(|err| {
                log::warn!("Rejected identity token: {err}");
                ErrorUnauthorized("unauthorized")
            }),
        )
    }
}

/// Returns `true` when `role` is among the user's roles.
pub fn check_role(role: &str, roles: &[String]) -> bool {
    roles.iter().any(|r| r == role)
}
