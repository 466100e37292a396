use crate::server::{
    data::email_template::EmailTemplateRepository,
    model::email::UpdateEmailTemplateParam,
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod find_active_by_code;
mod update;
