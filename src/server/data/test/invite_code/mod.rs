use crate::server::data::invite_code::InviteCodeRepository;
use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod assign;
mod find_first_available;
mod insert_batch;
mod release;
