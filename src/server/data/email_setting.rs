//! Email setting data repository.

use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
};
use std::collections::HashMap;

use migration::OnConflict;

use crate::server::model::email::EmailSetting;

/// Repository providing database operations for mail configuration.
pub struct EmailSettingRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> EmailSettingRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Gets one setting value.
    pub async fn get(&self, key: &str) -> Result<Option<String>, DbErr> {
        let entity = entity::prelude::EmailSetting::find_by_id(key)
            .one(self.db)
            .await?;

        Ok(entity.map(|e| e.value))
    }

    /// Gets several setting values at once.
    ///
    /// Absent keys are simply missing from the returned map.
    pub async fn get_values(&self, keys: &[&str]) -> Result<HashMap<String, String>, DbErr> {
        let entities = entity::prelude::EmailSetting::find()
            .filter(entity::email_setting::Column::Key.is_in(keys.iter().copied()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(|e| (e.key, e.value)).collect())
    }

    /// Gets every setting, grouped then keyed alphabetically.
    pub async fn list_all(&self) -> Result<Vec<EmailSetting>, DbErr> {
        let entities = entity::prelude::EmailSetting::find()
            .order_by_asc(entity::email_setting::Column::Group)
            .order_by_asc(entity::email_setting::Column::Key)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(EmailSetting::from_entity).collect())
    }

    /// Creates or overwrites a setting.
    pub async fn upsert(&self, key: &str, value: &str, group: &str) -> Result<EmailSetting, DbErr> {
        let entity = entity::prelude::EmailSetting::insert(entity::email_setting::ActiveModel {
            key: ActiveValue::Set(key.to_string()),
            value: ActiveValue::Set(value.to_string()),
            group: ActiveValue::Set(group.to_string()),
            updated_at: ActiveValue::Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::column(entity::email_setting::Column::Key)
                .update_columns([
                    entity::email_setting::Column::Value,
                    entity::email_setting::Column::UpdatedAt,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        Ok(EmailSetting::from_entity(entity))
    }
}
