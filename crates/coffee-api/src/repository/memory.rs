//! 인메모리 음료 저장소 (테스트용).

use std::collections::BTreeMap;

use async_trait::async_trait;
use coffee_core::{Drink, Ingredient};
use tokio::sync::RwLock;

use super::{DrinkRepository, RepositoryError};

#[derive(Debug, Default)]
struct Store {
    drinks: BTreeMap<i32, Drink>,
    last_id: i32,
}

impl Store {
    fn title_taken(&self, title: &str, except: Option<i32>) -> bool {
        self.drinks
            .values()
            .any(|d| d.title == title && Some(d.id()) != except)
    }
}

/// PostgreSQL과 같은 규칙(id 자동 증가, 제목 유일)을 따르는 인메모리 저장소.
#[derive(Debug, Default)]
pub struct InMemoryDrinkRepository {
    store: RwLock<Store>,
    unavailable: bool,
}

impl InMemoryDrinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 모든 연산이 `Unavailable`로 실패하는 저장소.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    fn ensure_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable {
            Err(RepositoryError::Unavailable(
                "in-memory store is offline".to_string(),
            ))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DrinkRepository for InMemoryDrinkRepository {
    async fn list_all(&self) -> Result<Vec<Drink>, RepositoryError> {
        self.ensure_available()?;
        Ok(self.store.read().await.drinks.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> Result<Option<Drink>, RepositoryError> {
        self.ensure_available()?;
        Ok(self.store.read().await.drinks.get(&id).cloned())
    }

    async fn create(&self, title: &str, recipe: &[Ingredient]) -> Result<Drink, RepositoryError> {
        self.ensure_available()?;
        let mut store = self.store.write().await;

        if store.title_taken(title, None) {
            return Err(RepositoryError::Conflict(title.to_string()));
        }

        store.last_id += 1;
        let drink = Drink::new(store.last_id, title, recipe.to_vec());
        store.drinks.insert(drink.id(), drink.clone());
        Ok(drink)
    }

    async fn update(&self, drink: &Drink) -> Result<Drink, RepositoryError> {
        self.ensure_available()?;
        let mut store = self.store.write().await;

        if !store.drinks.contains_key(&drink.id()) {
            return Err(RepositoryError::NotFound);
        }
        if store.title_taken(&drink.title, Some(drink.id())) {
            return Err(RepositoryError::Conflict(drink.title.clone()));
        }

        store.drinks.insert(drink.id(), drink.clone());
        Ok(drink.clone())
    }

    async fn delete(&self, drink: &Drink) -> Result<(), RepositoryError> {
        self.ensure_available()?;
        self.store
            .write()
            .await
            .drinks
            .remove(&drink.id())
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        self.ensure_available()
    }
}
