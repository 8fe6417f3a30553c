pub mod number;
pub mod recipe;
pub mod user;

pub use number::NumberInput;
pub use recipe::{Recipe, RecipeFields, RecipeInput, ValidationError};
pub use user::User;
