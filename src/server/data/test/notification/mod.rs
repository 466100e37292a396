use crate::server::{
    data::notification::NotificationRepository,
    model::notification::{CreateNotificationParam, NotificationKind},
};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod insert_and_read;
