//! Wire representations of stored records.

use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::ingredient::Ingredient;
use crate::domain::recipe::Recipe;
use crate::domain::tag::Tag;
use crate::domain::user::User;

#[derive(Debug, Serialize)]
pub struct RecipeSummary {
    pub id: i64,
    pub title: String,
    pub time_minutes: i32,
    pub price: Decimal,
    pub link: String,
}

#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    pub description: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RecipeRepresentation {
    Summary(RecipeSummary),
    Detail(RecipeDetail),
}

fn summary(recipe: &Recipe) -> RecipeRepresentation {
    RecipeRepresentation::Summary(RecipeSummary::from(recipe))
}

fn detail(recipe: &Recipe) -> RecipeRepresentation {
    RecipeRepresentation::Detail(RecipeDetail {
        summary: RecipeSummary::from(recipe),
        description: recipe.description.clone(),
    })
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link.clone(),
        }
    }
}

/// The operation a recipe request performs; decides which representation
/// the response uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecipeAction {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
}

impl RecipeAction {
    pub fn representation(self) -> fn(&Recipe) -> RecipeRepresentation {
        match self {
            RecipeAction::List => summary,
            RecipeAction::Retrieve
            | RecipeAction::Create
            | RecipeAction::Update
            | RecipeAction::PartialUpdate => detail,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
}

impl From<Tag> for TagResponse {
    fn from(tag: Tag) -> Self {
        Self {
            id: tag.id,
            name: tag.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct IngredientResponse {
    pub id: i64,
    pub name: String,
}

impl From<Ingredient> for IngredientResponse {
    fn from(ingredient: Ingredient) -> Self {
        Self {
            id: ingredient.id,
            name: ingredient.name,
        }
    }
}

/// Public profile; never carries the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}
