use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "guides")]
pub struct Model {
    /// Same value as the guide's `users.id`.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub full_name: String,
    pub bio: String,
    pub location: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub specialties: Json,
    #[sea_orm(column_type = "JsonBinary")]
    pub languages: Json,
    pub day_rate: i64,
    pub verified: bool,
    /// Storage key in the private `verification-docs` bucket.
    pub verification_doc_key: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
