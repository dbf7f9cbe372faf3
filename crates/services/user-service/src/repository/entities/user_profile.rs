//! User profile database entity for SeaORM.

use sea_orm::entity::prelude::*;

use domain::{DomainResult, UserProfile, UserRole, UserTechnology};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Uuid,
    /// Canonical role name, e.g. "MENTOR"
    pub user_role: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(has_many = "super::user_technology::Entity")]
    UserTechnologies,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::user_technology::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserTechnologies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Assemble the domain profile from this row and its technology rows.
    ///
    /// Fails only if the stored role is outside the vocabulary.
    pub fn into_domain(
        self,
        technologies: Vec<super::user_technology::Model>,
    ) -> DomainResult<UserProfile> {
        Ok(UserProfile {
            id: self.id,
            user_id: self.user_id,
            user_role: UserRole::parse(&self.user_role)?,
            technologies: technologies.into_iter().map(UserTechnology::from).collect(),
        })
    }
}
