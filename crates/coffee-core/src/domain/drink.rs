//! 음료 도메인 모델.
//!
//! 메뉴의 음료와 레시피를 정의하고, 두 가지 직렬화 뷰를 제공합니다:
//! - [`DrinkShort`]: 공개 목록용. 재료는 `{color, parts}`만 노출
//! - [`DrinkLong`]: 권한 있는 상세 조회용. 재료 이름 포함
//!
//! 레시피는 저장소에 JSON 텍스트로 보관되며 [`encode_recipe`] /
//! [`decode_recipe`]로 변환합니다.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DomainError, DomainResult};

/// 음료 제목 최대 길이 (문자 수)
pub const MAX_TITLE_LEN: usize = 80;

/// 레시피 재료.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct Ingredient {
    /// 표시 색상 (예: "blue", "#6f4e37")
    #[validate(length(min = 1, message = "색상은 비어 있을 수 없습니다"))]
    pub color: String,
    /// 재료 이름
    #[validate(length(min = 1, message = "재료 이름은 비어 있을 수 없습니다"))]
    pub name: String,
    /// 비율
    #[validate(range(min = 1, message = "비율은 1 이상이어야 합니다"))]
    pub parts: i32,
}

impl Ingredient {
    /// 새 재료 생성.
    pub fn new(color: impl Into<String>, name: impl Into<String>, parts: i32) -> Self {
        Self {
            color: color.into(),
            name: name.into(),
            parts,
        }
    }
}

/// 공개용 재료 뷰 (이름 제외).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortIngredient {
    pub color: String,
    pub parts: i32,
}

impl From<&Ingredient> for ShortIngredient {
    fn from(ingredient: &Ingredient) -> Self {
        Self {
            color: ingredient.color.clone(),
            parts: ingredient.parts,
        }
    }
}

/// 메뉴 음료.
///
/// `id`는 저장소가 생성 시 부여하며 이후 변경할 수 없습니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Drink {
    id: i32,
    /// 표시 제목 (저장소에서 유일)
    pub title: String,
    /// 순서가 있는 재료 목록
    pub recipe: Vec<Ingredient>,
}

impl Drink {
    /// 저장소에서 읽은 값으로 음료 생성.
    pub fn new(id: i32, title: impl Into<String>, recipe: Vec<Ingredient>) -> Self {
        Self {
            id,
            title: title.into(),
            recipe,
        }
    }

    /// 저장소가 부여한 식별자.
    pub fn id(&self) -> i32 {
        self.id
    }

    /// 공개 목록용 뷰.
    pub fn short(&self) -> DrinkShort {
        DrinkShort {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.iter().map(ShortIngredient::from).collect(),
        }
    }

    /// 상세 조회용 뷰.
    pub fn long(&self) -> DrinkLong {
        DrinkLong {
            id: self.id,
            title: self.title.clone(),
            recipe: self.recipe.clone(),
        }
    }

    /// 저장용 레시피 텍스트.
    pub fn encoded_recipe(&self) -> DomainResult<String> {
        encode_recipe(&self.recipe)
    }
}

/// 공개 목록용 음료 뷰.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkShort {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<ShortIngredient>,
}

/// 상세 조회용 음료 뷰.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrinkLong {
    pub id: i32,
    pub title: String,
    pub recipe: Vec<Ingredient>,
}

/// 레시피를 저장용 JSON 텍스트로 변환.
pub fn encode_recipe(recipe: &[Ingredient]) -> DomainResult<String> {
    serde_json::to_string(recipe).map_err(|e| DomainError::RecipeEncoding(e.to_string()))
}

/// 저장된 JSON 텍스트를 레시피로 변환.
pub fn decode_recipe(raw: &str) -> DomainResult<Vec<Ingredient>> {
    serde_json::from_str(raw).map_err(|e| DomainError::RecipeDecoding(e.to_string()))
}
