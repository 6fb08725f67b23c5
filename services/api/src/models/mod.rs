//! Domain models for users and clothing items

pub mod clothing_item;
pub mod object_id;
pub mod user;

pub use clothing_item::{ClothingItem, ItemFilter, NewClothingItem, Weather};
pub use object_id::ObjectId;
pub use user::{Credentials, NewUser, ProfileUpdate, User, UserResponse};
