use chrono::NaiveDate;

use super::repositories::LocalRepository;
use super::repository::RepositoryError;
use super::services;
use crate::models::{
    DangerLevel, ForecastId, ForecastStatus, LikelihoodLevel, ProblemSlot, SectorKey, SizeLevel,
};

fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, day).unwrap()
}

fn key(s: &str) -> SectorKey {
    s.parse().unwrap()
}

#[tokio::test]
async fn test_create_draft_assigns_id_and_trims() {
    let repo = LocalRepository::new();
    let forecast = services::create_draft(&repo, "  Whistler ", date(1), " ana ")
        .await
        .unwrap();
    assert_eq!(forecast.id, Some(ForecastId::new(1)));
    assert_eq!(forecast.region, "Whistler");
    assert_eq!(forecast.author, "ana");
    assert_eq!(forecast.status, ForecastStatus::Draft);
}

#[tokio::test]
async fn test_create_draft_rejects_blank_region() {
    let repo = LocalRepository::new();
    let err = services::create_draft(&repo, "   ", date(1), "ana")
        .await
        .unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
    assert_eq!(repo.forecast_count(), 0);
}

#[tokio::test]
async fn test_save_recomputes_stale_ratings() {
    let repo = LocalRepository::new();
    let mut forecast = services::create_draft(&repo, "Whistler", date(1), "ana")
        .await
        .unwrap();

    // Edit without going through the editor: ratings are stale until saved.
    forecast.primary.likelihood = LikelihoodLevel::Likely;
    forecast.primary.size = SizeLevel::VeryLarge;
    forecast.primary.sectors.insert(key("alp_S"));
    assert_eq!(forecast.danger.alp, DangerLevel::Low);

    let info = services::save_forecast(&repo, &mut forecast).await.unwrap();
    assert_eq!(info.danger.alp, DangerLevel::Considerable);
    assert_eq!(forecast.danger.alp, DangerLevel::Considerable);

    let stored = services::get_danger_ratings(&repo, info.forecast_id)
        .await
        .unwrap();
    assert_eq!(stored, forecast.danger);
}

#[tokio::test]
async fn test_save_without_id_inserts() {
    let repo = LocalRepository::new();
    let mut forecast = crate::models::Forecast::draft("Whistler", date(2), "ana");
    let info = services::save_forecast(&repo, &mut forecast).await.unwrap();
    assert_eq!(forecast.id, Some(info.forecast_id));
    assert_eq!(repo.forecast_count(), 1);
}

#[tokio::test]
async fn test_publish_lifecycle() {
    let repo = LocalRepository::new();
    let draft = services::create_draft(&repo, "Whistler", date(1), "ana")
        .await
        .unwrap();
    let id = draft.id.unwrap();

    let published = services::publish_forecast(&repo, id).await.unwrap();
    assert!(published.is_published());
    assert!(published.published_at.is_some());

    let err = services::publish_forecast(&repo, id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));

    let draft = services::unpublish_forecast(&repo, id).await.unwrap();
    assert_eq!(draft.status, ForecastStatus::Draft);
    assert!(draft.published_at.is_none());

    let err = services::unpublish_forecast(&repo, id).await.unwrap_err();
    assert!(matches!(err, RepositoryError::ValidationError { .. }));
}

#[tokio::test]
async fn test_list_published_filters_status_and_region() {
    let repo = LocalRepository::new();
    let a = services::create_draft(&repo, "Whistler", date(1), "ana")
        .await
        .unwrap();
    let b = services::create_draft(&repo, "Revelstoke", date(2), "ana")
        .await
        .unwrap();
    services::create_draft(&repo, "Whistler", date(3), "ana")
        .await
        .unwrap();

    services::publish_forecast(&repo, a.id.unwrap())
        .await
        .unwrap();
    services::publish_forecast(&repo, b.id.unwrap())
        .await
        .unwrap();

    let all = services::list_published(&repo, None).await.unwrap();
    assert_eq!(all.len(), 2);
    // Newest date first.
    assert_eq!(all[0].region, "Revelstoke");

    let whistler = services::list_published(&repo, Some("whistler"))
        .await
        .unwrap();
    assert_eq!(whistler.len(), 1);
    assert_eq!(whistler[0].forecast_id, a.id.unwrap());
}

#[tokio::test]
async fn test_delete_unknown_is_not_found() {
    let repo = LocalRepository::new();
    let err = services::delete_forecast(&repo, ForecastId::new(99))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.context().entity_id.as_deref(), Some("99"));
}

#[tokio::test]
async fn test_open_editor_round_trip() {
    let repo = LocalRepository::new();
    let draft = services::create_draft(&repo, "Whistler", date(1), "ana")
        .await
        .unwrap();
    let id = draft.id.unwrap();

    let mut editor = services::open_editor(&repo, id).await.unwrap();
    editor.set_secondary_enabled(true);
    editor.set_size(ProblemSlot::Secondary, SizeLevel::Historic);
    editor.toggle_sector(ProblemSlot::Secondary, key("btl_W"));
    let mut forecast = editor.finish();
    services::save_forecast(&repo, &mut forecast).await.unwrap();

    let reloaded = services::get_forecast(&repo, id).await.unwrap();
    assert!(reloaded.secondary_enabled);
    // Possible / Historic -> Considerable.
    assert_eq!(reloaded.danger.btl, DangerLevel::Considerable);
}

#[tokio::test]
async fn test_health_check_reports_outage() {
    let repo = LocalRepository::new();
    assert!(services::health_check(&repo).await.unwrap());
    repo.set_healthy(false);
    assert!(!services::health_check(&repo).await.unwrap());
}
