//! User database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{AuthProvider, DomainError, User};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub public_id: i64,
    pub name: String,
    pub age: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub image_url: Option<String>,
    pub email_verified: bool,
    pub password: Option<String>,
    pub hidden_from_search: bool,
    pub provider: String,
    pub provider_id: Option<String>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::user_profile::Entity")]
    UserProfile,
}

impl Related<super::user_profile::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProfile.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Convert database model to domain entity
impl TryFrom<Model> for User {
    type Error = DomainError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(User {
            id: model.id,
            public_id: model.public_id,
            name: model.name,
            age: model.age,
            email: model.email,
            image_url: model.image_url,
            email_verified: model.email_verified,
            password: model.password,
            hidden_from_search: model.hidden_from_search,
            provider: AuthProvider::parse(&model.provider)?,
            provider_id: model.provider_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
