use crate::server::{
    data::person::PersonRepository,
    model::person::{UpdatePersonParam, UpdateQuotaParam},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod increment_invites_used;
mod list_sponsors;
mod ranking;
mod search;
mod update;
mod update_quota;
