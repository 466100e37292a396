use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, GovernorLayer};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    model::{
        affiliate::{
            AffiliateDto, AffiliateStatsDto, ApprovalResultDto, CreateAffiliateDto,
            DailyCountDto, DailyStatsDto, PaginatedAffiliatesDto, RejectAffiliateDto,
        },
        api::ErrorDto,
        invite_code::{
            GenerateCodesDto, GenerateCodesResultDto, InviteCodeDto, InviteCodeStatsDto,
            PaginatedInviteCodesDto,
        },
        sponsor::{SponsorDto, SponsorRankingEntryDto, UpdateSponsorInvitesDto},
    },
    server::{
        controller::{
            account, admin, affiliate, auth, dashboard, email_admin, invite_code, notification,
            person, sponsor,
        },
        error::{config::ConfigError, AppError},
        state::AppState,
    },
};

/// OpenAPI documentation for the annotated (core domain) endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(
        affiliate::list_affiliates,
        affiliate::get_affiliate,
        affiliate::create_affiliate,
        affiliate::approve_affiliate,
        affiliate::reject_affiliate,
        affiliate::affiliate_stats,
        affiliate::affiliates_per_day,
        invite_code::list_codes,
        invite_code::generate_codes,
        invite_code::code_stats,
        invite_code::codes_per_day,
        sponsor::list_sponsors,
        sponsor::get_sponsor,
        sponsor::sponsor_affiliates,
        sponsor::update_sponsor_invites,
        sponsor::sponsor_ranking,
    ),
    components(schemas(
        AffiliateDto,
        PaginatedAffiliatesDto,
        CreateAffiliateDto,
        RejectAffiliateDto,
        ApprovalResultDto,
        AffiliateStatsDto,
        DailyCountDto,
        DailyStatsDto,
        InviteCodeDto,
        PaginatedInviteCodesDto,
        GenerateCodesDto,
        GenerateCodesResultDto,
        InviteCodeStatsDto,
        SponsorDto,
        UpdateSponsorInvitesDto,
        SponsorRankingEntryDto,
        ErrorDto,
    ))
)]
struct ApiDoc;

/// Builds the application router: API routes, OpenAPI docs, CORS and rate
/// limiting. The session layer is applied by the caller after merging.
pub fn router(state: AppState) -> Result<Router, AppError> {
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(5)
            .burst_size(50)
            .finish()
            .ok_or_else(|| {
                AppError::InternalError("Invalid rate limiter configuration".to_string())
            })?,
    );

    let cors_origin = state
        .config
        .app_url
        .parse::<HeaderValue>()
        .map_err(|_| ConfigError::InvalidEnvVar {
            name: "APP_URL".to_string(),
            reason: "not a valid origin".to_string(),
        })?;

    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    let api = Router::new()
        // auth
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        // affiliates
        .route(
            "/api/affiliates",
            get(affiliate::list_affiliates).post(affiliate::create_affiliate),
        )
        .route("/api/affiliates/stats", get(affiliate::affiliate_stats))
        .route(
            "/api/affiliates/stats-per-day",
            get(affiliate::affiliates_per_day),
        )
        .route("/api/affiliates/{id}", get(affiliate::get_affiliate))
        .route(
            "/api/affiliates/{id}/approve",
            post(affiliate::approve_affiliate),
        )
        .route(
            "/api/affiliates/{id}/reject",
            post(affiliate::reject_affiliate),
        )
        // sponsors
        .route("/api/sponsors", get(sponsor::list_sponsors))
        .route("/api/sponsors/ranking", get(sponsor::sponsor_ranking))
        .route("/api/sponsors/{id}", get(sponsor::get_sponsor))
        .route(
            "/api/sponsors/{id}/affiliates",
            get(sponsor::sponsor_affiliates),
        )
        .route(
            "/api/sponsors/{id}/invites",
            put(sponsor::update_sponsor_invites),
        )
        // people
        .route("/api/people", get(person::list_people))
        .route(
            "/api/people/{id}",
            get(person::get_person).put(person::update_person),
        )
        // invite codes
        .route("/api/invite-codes", get(invite_code::list_codes))
        .route(
            "/api/invite-codes/generate",
            post(invite_code::generate_codes),
        )
        .route("/api/invite-codes/stats", get(invite_code::code_stats))
        .route(
            "/api/invite-codes/stats-per-day",
            get(invite_code::codes_per_day),
        )
        // accounts
        .route(
            "/api/accounts",
            get(account::list_accounts).post(account::create_account),
        )
        .route(
            "/api/accounts/change-password",
            post(account::change_password),
        )
        .route(
            "/api/accounts/{id}",
            put(account::update_account).delete(account::delete_account),
        )
        // email administration
        .route(
            "/api/admin/email-templates",
            get(email_admin::list_templates).post(email_admin::create_template),
        )
        .route(
            "/api/admin/email-templates/{id}",
            put(email_admin::update_template).delete(email_admin::delete_template),
        )
        .route(
            "/api/admin/email-settings",
            get(email_admin::list_settings).put(email_admin::update_setting),
        )
        .route(
            "/api/admin/email-settings/test",
            post(email_admin::send_test_email),
        )
        // admin actions
        .route("/api/admin/anonymize", post(admin::anonymize))
        // dashboard
        .route("/api/dashboard/metrics", get(dashboard::metrics))
        .route(
            "/api/dashboard/latest-affiliates",
            get(dashboard::latest_affiliates),
        )
        .route(
            "/api/dashboard/sponsors-per-day",
            get(dashboard::sponsors_per_day),
        )
        .route(
            "/api/dashboard/affiliates-per-state",
            get(dashboard::affiliates_per_state),
        )
        .route(
            "/api/dashboard/sponsors-per-state",
            get(dashboard::sponsors_per_state),
        )
        // notifications
        .route("/api/notifications", get(notification::list_notifications))
        .route(
            "/api/notifications/{id}/read",
            post(notification::mark_read),
        )
        .layer(GovernorLayer::new(governor_config))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(api.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi())))
}
