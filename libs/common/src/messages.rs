//! Canonical client-facing message strings
//!
//! Every message the service sends to a client lives here so that wording
//! stays consistent between the validator, the fault translator, and the
//! handlers.

/// Generic message for any 500-class failure. Raw internal detail is never
/// sent to the client.
pub const DEFAULT_SERVER_ERROR: &str = "An error occurred on the server";

pub const AUTHORIZATION_REQUIRED: &str = "Authorization required";
pub const INVALID_CREDENTIALS: &str = "Incorrect email or password";

pub const EMAIL_ALREADY_EXISTS: &str = "Email already exists";
pub const USER_NOT_FOUND: &str = "User not found";
pub const INVALID_USER_ID: &str = "Invalid user ID";
pub const CLOTHING_ITEM_NOT_FOUND: &str = "Clothing item not found";
pub const INVALID_ITEM_ID: &str = "Invalid item ID";
pub const FORBIDDEN_ACCESS: &str = "Access forbidden";
pub const CLOTHING_ITEM_DELETED: &str = "Clothing item deleted";
pub const ROUTE_NOT_FOUND: &str = "Route not found";

pub const INVALID_DATA: &str = "Invalid data provided";

pub const NAME_REQUIRED: &str = "Name is required";
pub const NAME_TOO_SHORT: &str = "Name must be at least 2 characters long";
pub const NAME_TOO_LONG: &str = "Name must be no more than 30 characters long";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const INVALID_EMAIL: &str = "Invalid email format";
pub const PASSWORD_REQUIRED: &str = "Password is required";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters long";
pub const AVATAR_REQUIRED: &str = "Avatar is required";
pub const IMAGE_URL_REQUIRED: &str = "Image URL is required";
pub const INVALID_URL: &str = "Invalid URL format";
pub const WEATHER_REQUIRED: &str = "Weather is required";
pub const INVALID_WEATHER: &str = "Weather must be one of: hot, warm, cold";
pub const INVALID_ID_FORMAT: &str = "Invalid ID format";
