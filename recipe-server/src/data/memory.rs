//! In-process implementation of every repository trait, used by the test
//! suite to drive handlers without a database.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::data::ingredient_repository::IngredientRepository;
use crate::data::recipe_repository::RecipeRepository;
use crate::data::tag_repository::TagRepository;
use crate::data::token_repository::TokenRepository;
use crate::data::user_repository::UserRepository;
use crate::domain::error::DomainError;
use crate::domain::ingredient::Ingredient;
use crate::domain::recipe::{NewRecipe, Recipe, RecipeChanges};
use crate::domain::tag::Tag;
use crate::domain::user::User;
use crate::infrastructure::security::generate_token_key;

#[derive(Default)]
struct Tables {
    users: HashMap<Uuid, User>,
    tokens: HashMap<String, Uuid>,
    recipes: BTreeMap<i64, Recipe>,
    tags: BTreeMap<i64, Tag>,
    ingredients: BTreeMap<i64, Ingredient>,
    last_id: i64,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().expect("memory store poisoned")
    }

    pub fn recipe(&self, id: i64) -> Option<Recipe> {
        self.tables().recipes.get(&id).cloned()
    }

    pub fn tag(&self, id: i64) -> Option<Tag> {
        self.tables().tags.get(&id).cloned()
    }

    pub fn ingredient(&self, id: i64) -> Option<Ingredient> {
        self.tables().ingredients.get(&id).cloned()
    }

    pub fn recipe_count(&self) -> usize {
        self.tables().recipes.len()
    }

    pub fn deactivate(&self, user_id: Uuid) {
        if let Some(user) = self.tables().users.get_mut(&user_id) {
            user.is_active = false;
        }
    }
}

fn apply_changes(changes: RecipeChanges, recipe: &mut Recipe) {
    if let Some(title) = changes.title {
        recipe.title = title;
    }
    if let Some(time_minutes) = changes.time_minutes {
        recipe.time_minutes = time_minutes;
    }
    if let Some(price) = changes.price {
        recipe.price = price;
    }
    if let Some(link) = changes.link {
        recipe.link = link;
    }
    if let Some(description) = changes.description {
        recipe.description = description;
    }
    recipe.updated_at = Utc::now();
}

fn by_name_desc(a: &str, a_id: i64, b: &str, b_id: i64) -> std::cmp::Ordering {
    b.cmp(a).then(b_id.cmp(&a_id))
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        let mut tables = self.tables();
        if tables.users.values().any(|u| u.email == user.email) {
            return Err(DomainError::EmailTaken);
        }
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .tables()
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.tables().users.get(&id).cloned())
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn get_or_create(&self, user_id: Uuid) -> Result<String, DomainError> {
        let mut tables = self.tables();
        if let Some((key, _)) = tables.tokens.iter().find(|(_, owner)| **owner == user_id) {
            return Ok(key.clone());
        }
        let key = generate_token_key();
        tables.tokens.insert(key.clone(), user_id);
        Ok(key)
    }

    async fn find_user(&self, key: &str) -> Result<Option<User>, DomainError> {
        let tables = self.tables();
        Ok(tables
            .tokens
            .get(key)
            .and_then(|user_id| tables.users.get(user_id))
            .cloned())
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Recipe>, DomainError> {
        Ok(self
            .tables()
            .recipes
            .values()
            .rev()
            .filter(|r| r.user_id == owner)
            .cloned()
            .collect())
    }

    async fn find_for_owner(&self, id: i64, owner: Uuid) -> Result<Option<Recipe>, DomainError> {
        Ok(self
            .tables()
            .recipes
            .get(&id)
            .filter(|r| r.user_id == owner)
            .cloned())
    }

    async fn create(&self, owner: Uuid, recipe: NewRecipe) -> Result<Recipe, DomainError> {
        let mut tables = self.tables();
        let now = Utc::now();
        let created = Recipe {
            id: tables.next_id(),
            user_id: owner,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            description: recipe.description,
            created_at: now,
            updated_at: now,
        };
        tables.recipes.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: i64,
        owner: Uuid,
        changes: RecipeChanges,
    ) -> Result<Option<Recipe>, DomainError> {
        let mut tables = self.tables();
        Ok(tables
            .recipes
            .get_mut(&id)
            .filter(|r| r.user_id == owner)
            .map(|recipe| {
                apply_changes(changes, recipe);
                recipe.clone()
            }))
    }

    async fn delete(&self, id: i64, owner: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables();
        let owned = tables.recipes.get(&id).is_some_and(|r| r.user_id == owner);
        if owned {
            tables.recipes.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl TagRepository for MemoryStore {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Tag>, DomainError> {
        let mut tags: Vec<Tag> = self
            .tables()
            .tags
            .values()
            .filter(|t| t.user_id == owner)
            .cloned()
            .collect();
        tags.sort_by(|a, b| by_name_desc(&a.name, a.id, &b.name, b.id));
        Ok(tags)
    }

    async fn find_for_owner(&self, id: i64, owner: Uuid) -> Result<Option<Tag>, DomainError> {
        Ok(self
            .tables()
            .tags
            .get(&id)
            .filter(|t| t.user_id == owner)
            .cloned())
    }

    async fn create(&self, owner: Uuid, name: String) -> Result<Tag, DomainError> {
        let mut tables = self.tables();
        let tag = Tag {
            id: tables.next_id(),
            user_id: owner,
            name,
        };
        tables.tags.insert(tag.id, tag.clone());
        Ok(tag)
    }

    async fn rename(
        &self,
        id: i64,
        owner: Uuid,
        name: Option<String>,
    ) -> Result<Option<Tag>, DomainError> {
        let mut tables = self.tables();
        Ok(tables
            .tags
            .get_mut(&id)
            .filter(|t| t.user_id == owner)
            .map(|tag| {
                if let Some(name) = name {
                    tag.name = name;
                }
                tag.clone()
            }))
    }

    async fn delete(&self, id: i64, owner: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables();
        let owned = tables.tags.get(&id).is_some_and(|t| t.user_id == owner);
        if owned {
            tables.tags.remove(&id);
        }
        Ok(owned)
    }
}

#[async_trait]
impl IngredientRepository for MemoryStore {
    async fn list_for_owner(&self, owner: Uuid) -> Result<Vec<Ingredient>, DomainError> {
        let mut ingredients: Vec<Ingredient> = self
            .tables()
            .ingredients
            .values()
            .filter(|i| i.user_id == owner)
            .cloned()
            .collect();
        ingredients.sort_by(|a, b| by_name_desc(&a.name, a.id, &b.name, b.id));
        Ok(ingredients)
    }

    async fn find_for_owner(
        &self,
        id: i64,
        owner: Uuid,
    ) -> Result<Option<Ingredient>, DomainError> {
        Ok(self
            .tables()
            .ingredients
            .get(&id)
            .filter(|i| i.user_id == owner)
            .cloned())
    }

    async fn create(&self, owner: Uuid, name: String) -> Result<Ingredient, DomainError> {
        let mut tables = self.tables();
        let ingredient = Ingredient {
            id: tables.next_id(),
            user_id: owner,
            name,
        };
        tables.ingredients.insert(ingredient.id, ingredient.clone());
        Ok(ingredient)
    }

    async fn rename(
        &self,
        id: i64,
        owner: Uuid,
        name: Option<String>,
    ) -> Result<Option<Ingredient>, DomainError> {
        let mut tables = self.tables();
        Ok(tables
            .ingredients
            .get_mut(&id)
            .filter(|i| i.user_id == owner)
            .map(|ingredient| {
                if let Some(name) = name {
                    ingredient.name = name;
                }
                ingredient.clone()
            }))
    }

    async fn delete(&self, id: i64, owner: Uuid) -> Result<bool, DomainError> {
        let mut tables = self.tables();
        let owned = tables
            .ingredients
            .get(&id)
            .is_some_and(|i| i.user_id == owner);
        if owned {
            tables.ingredients.remove(&id);
        }
        Ok(owned)
    }
}
