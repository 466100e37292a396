use crate::server::{
    data::account::AccountRepository,
    model::account::{Role, UpdateAccountParam},
};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod delete;
mod insert;
mod update;
