use crate::server::data::email_setting::EmailSettingRepository;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod get_values;
mod upsert;
