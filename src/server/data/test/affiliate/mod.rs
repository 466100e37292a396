use crate::server::{
    data::affiliate::AffiliateRepository,
    model::affiliate::{AffiliateStatus, CreateAffiliateParam},
};
use chrono::Utc;
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod count_by_status;
mod create;
mod get_all_paginated;
mod mark_sent;
mod oldest_pending;
mod transition_from_pending;
