//! Declarative request schemas
//!
//! Each endpoint declares a schema type; `Validated<T>` deserializes the
//! body and runs the schema before the handler executes, so handler code
//! only ever sees accepted payloads. A rejected request produces a single
//! aggregate Validation error listing every violated field's message,
//! joined with ", ". Validation accepts or rejects; it does not coerce.

use std::sync::OnceLock;

use axum::{
    Json, async_trait,
    extract::{FromRequest, Request},
};
use regex::Regex;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use common::{error::AppError, messages};

use crate::models::{Credentials, ItemFilter, NewClothingItem, NewUser, ProfileUpdate, Weather};

pub(crate) const NAME_MIN: usize = 2;
pub(crate) const NAME_MAX: usize = 30;
pub(crate) const PASSWORD_MIN: usize = 8;

pub(crate) fn is_valid_email(email: &str) -> bool {
    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });
    regex.is_match(email)
}

pub(crate) fn is_valid_url(url: &str) -> bool {
    static URL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = URL_REGEX.get_or_init(|| {
        Regex::new(
            r"^https?://(www\.)?[-a-zA-Z0-9@:%._+~#=]{1,256}\.[a-zA-Z0-9()]{2,63}\b([-/a-zA-Z0-9()@:%_+.~#?&=]*)$",
        )
        .expect("Failed to compile url regex")
    });
    regex.is_match(url)
}

/// A request schema: deserialized shape in, validated payload out.
pub trait Schema: DeserializeOwned {
    type Valid;

    /// Accept or reject the payload, aggregating every violated field's
    /// message into one Validation error.
    fn validate(self) -> Result<Self::Valid, AppError>;
}

/// Extractor that runs the schema before the handler body executes.
pub struct Validated<T: Schema>(pub T::Valid);

#[async_trait]
impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: Schema,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|_| AppError::validation(messages::INVALID_DATA))?;
        Ok(Self(payload.validate()?))
    }
}

// Per-field checks. Each returns the field's first violation; violations
// are aggregated across fields by the schema impls below.

fn required(value: Option<String>, missing: &str) -> Result<String, String> {
    value.ok_or_else(|| missing.to_string())
}

fn name_field(value: Option<String>) -> Result<String, String> {
    let name = required(value, messages::NAME_REQUIRED)?;
    let len = name.chars().count();
    if len < NAME_MIN {
        return Err(messages::NAME_TOO_SHORT.to_string());
    }
    if len > NAME_MAX {
        return Err(messages::NAME_TOO_LONG.to_string());
    }
    Ok(name)
}

fn email_field(value: Option<String>) -> Result<String, String> {
    let email = required(value, messages::EMAIL_REQUIRED)?;
    if !is_valid_email(&email) {
        return Err(messages::INVALID_EMAIL.to_string());
    }
    Ok(email)
}

fn password_field(value: Option<String>) -> Result<String, String> {
    let password = required(value, messages::PASSWORD_REQUIRED)?;
    if password.len() < PASSWORD_MIN {
        return Err(messages::PASSWORD_TOO_SHORT.to_string());
    }
    Ok(password)
}

fn url_field(value: Option<String>, missing: &str) -> Result<String, String> {
    let url = required(value, missing)?;
    if !is_valid_url(&url) {
        return Err(messages::INVALID_URL.to_string());
    }
    Ok(url)
}

fn weather_field(value: Option<String>) -> Result<Weather, String> {
    let weather = required(value, messages::WEATHER_REQUIRED)?;
    Weather::parse(&weather).ok_or_else(|| messages::INVALID_WEATHER.to_string())
}

fn aggregate(violations: Vec<Option<String>>) -> AppError {
    let joined: Vec<String> = violations.into_iter().flatten().collect();
    AppError::validation(joined.join(", "))
}

/// POST /signup body.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
}

impl Schema for SignupRequest {
    type Valid = NewUser;

    fn validate(self) -> Result<NewUser, AppError> {
        let name = name_field(self.name);
        let email = email_field(self.email);
        let password = password_field(self.password);
        let avatar = url_field(self.avatar, messages::AVATAR_REQUIRED);

        match (name, email, password, avatar) {
            (Ok(name), Ok(email), Ok(password), Ok(avatar)) => Ok(NewUser {
                name,
                email,
                password,
                avatar,
            }),
            (name, email, password, avatar) => Err(aggregate(vec![
                name.err(),
                email.err(),
                password.err(),
                avatar.err(),
            ])),
        }
    }
}

/// POST /signin body.
#[derive(Debug, Deserialize)]
pub struct SigninRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Schema for SigninRequest {
    type Valid = Credentials;

    fn validate(self) -> Result<Credentials, AppError> {
        let email = email_field(self.email);
        let password = password_field(self.password);

        match (email, password) {
            (Ok(email), Ok(password)) => Ok(Credentials { email, password }),
            (email, password) => Err(aggregate(vec![email.err(), password.err()])),
        }
    }
}

/// PATCH /users/me body. Both fields are required.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub avatar: Option<String>,
}

impl Schema for UpdateProfileRequest {
    type Valid = ProfileUpdate;

    fn validate(self) -> Result<ProfileUpdate, AppError> {
        let name = name_field(self.name);
        let avatar = url_field(self.avatar, messages::AVATAR_REQUIRED);

        match (name, avatar) {
            (Ok(name), Ok(avatar)) => Ok(ProfileUpdate { name, avatar }),
            (name, avatar) => Err(aggregate(vec![name.err(), avatar.err()])),
        }
    }
}

/// POST /items body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub name: Option<String>,
    pub weather: Option<String>,
    pub image_url: Option<String>,
}

impl Schema for CreateItemRequest {
    type Valid = NewClothingItem;

    fn validate(self) -> Result<NewClothingItem, AppError> {
        let name = name_field(self.name);
        let weather = weather_field(self.weather);
        let image_url = url_field(self.image_url, messages::IMAGE_URL_REQUIRED);

        match (name, weather, image_url) {
            (Ok(name), Ok(weather), Ok(image_url)) => Ok(NewClothingItem {
                name,
                weather,
                image_url,
            }),
            (name, weather, image_url) => Err(aggregate(vec![
                name.err(),
                weather.err(),
                image_url.err(),
            ])),
        }
    }
}

/// GET /items query. Both filters are optional.
#[derive(Debug, Default, Deserialize)]
pub struct ItemsFilterQuery {
    pub weather: Option<String>,
    pub owner: Option<String>,
}

impl Schema for ItemsFilterQuery {
    type Valid = ItemFilter;

    fn validate(self) -> Result<ItemFilter, AppError> {
        let weather = match self.weather {
            Some(raw) => match Weather::parse(&raw) {
                Some(weather) => Ok(Some(weather)),
                None => Err(messages::INVALID_WEATHER.to_string()),
            },
            None => Ok(None),
        };
        let owner = match self.owner {
            Some(raw) => match raw.parse() {
                Ok(owner) => Ok(Some(owner)),
                Err(_) => Err(messages::INVALID_ID_FORMAT.to_string()),
            },
            None => Ok(None),
        };

        match (weather, owner) {
            (Ok(weather), Ok(owner)) => Ok(ItemFilter { weather, owner }),
            (weather, owner) => Err(aggregate(vec![weather.err(), owner.err()])),
        }
    }
}
