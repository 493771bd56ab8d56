//! Integration tests for the geofence domain service over the real
//! SurrealDB repository (in-memory engine).

use perimeter_core::error::PerimeterError;
use perimeter_core::models::geofence::{
    Address, CreateGeofence, GeoCodeData, Geometry, UpdateGeofence,
};
use perimeter_db::repository::SurrealGeofenceRepository;
use perimeter_service::GeofenceService;
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use uuid::Uuid;

/// Helper: spin up in-memory DB, run migrations, build the service.
async fn setup() -> GeofenceService<SurrealGeofenceRepository<surrealdb::engine::local::Db>> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    perimeter_db::run_migrations(&db).await.unwrap();
    GeofenceService::new(SurrealGeofenceRepository::new(db))
}

fn fence(name: &str, coordinates: &[f64]) -> CreateGeofence {
    CreateGeofence {
        client_id: "client-1".into(),
        name: name.into(),
        mobile_number: 9_876_543_210,
        address: Address {
            zip_code: "560001".into(),
            country: "India".into(),
            state: "Karnataka".into(),
            area: "MG Road".into(),
            city: "Bengaluru".into(),
            district: "Bengaluru Urban".into(),
        },
        final_address: "MG Road, Bengaluru 560001".into(),
        location_type: None,
        geo_code_data: GeoCodeData {
            code_type: "Feature".into(),
            geometry: Geometry {
                geometry_type: "Point".into(),
                coordinates: coordinates.to_vec(),
                radius: 250.0,
            },
        },
        created_by: "ops@example.com".into(),
    }
}

// -----------------------------------------------------------------------
// Create + duplicate guard
// -----------------------------------------------------------------------

#[tokio::test]
async fn create_returns_assigned_record() {
    let svc = setup().await;

    let created = svc.create(fence("Warehouse A", &[12.9, 77.6])).await.unwrap();
    assert_eq!(created.name, "Warehouse A");

    let fetched = svc.get(created.id).await.unwrap();
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
async fn duplicate_name_or_coordinates_rejected() {
    let svc = setup().await;
    svc.create(fence("Warehouse A", &[12.9, 77.6])).await.unwrap();

    // Name collision with fresh coordinates.
    let err = svc
        .create(fence("Warehouse A", &[1.0, 1.0]))
        .await
        .unwrap_err();
    match err {
        PerimeterError::Duplicate { message } => assert_eq!(
            message,
            "a geofence with the same name or coordinates already exists"
        ),
        other => panic!("expected duplicate error, got {other:?}"),
    }

    // Coordinate collision with a fresh name.
    let err = svc
        .create(fence("Warehouse B", &[12.9, 77.6]))
        .await
        .unwrap_err();
    assert!(matches!(err, PerimeterError::Duplicate { .. }));

    // Only the first record made it in.
    let page = svc.list(1, 10).await.unwrap();
    assert_eq!(page.total, 1);
}

#[tokio::test]
async fn invalid_payload_rejected_before_store_access() {
    let svc = setup().await;

    let err = svc.create(fence("", &[12.9, 77.6])).await.unwrap_err();
    assert!(matches!(err, PerimeterError::Validation { .. }));

    // Nothing was persisted.
    let page = svc.list(1, 10).await.unwrap();
    assert_eq!(page.total, 0);
}

// -----------------------------------------------------------------------
// Pagination + search
// -----------------------------------------------------------------------

#[tokio::test]
async fn list_page_two_of_fifteen_records() {
    let svc = setup().await;
    for i in 0..15 {
        svc.create(fence(&format!("Fence {i:02}"), &[f64::from(i), 0.0]))
            .await
            .unwrap();
    }

    let first = svc.list(1, 10).await.unwrap();
    assert_eq!(first.items.len(), 10);
    assert_eq!(first.total, 15);

    let second = svc.list(2, 10).await.unwrap();
    assert_eq!(second.items.len(), 5);
    assert_eq!(second.total, 15);
}

#[tokio::test]
async fn list_total_is_independent_of_page_and_limit() {
    let svc = setup().await;
    for i in 0..4 {
        svc.create(fence(&format!("Fence {i}"), &[f64::from(i), 0.0]))
            .await
            .unwrap();
    }

    for (page, limit) in [(1, 2), (2, 2), (1, 100), (7, 3)] {
        let result = svc.list(page, limit).await.unwrap();
        assert_eq!(result.total, 4, "page={page} limit={limit}");
    }
}

#[tokio::test]
async fn empty_search_matches_list_total() {
    let svc = setup().await;
    for i in 0..3 {
        svc.create(fence(&format!("Fence {i}"), &[f64::from(i), 0.0]))
            .await
            .unwrap();
    }

    let listed = svc.list(1, 10).await.unwrap();
    let searched = svc.search(1, 10, "").await.unwrap();
    assert_eq!(searched.total, listed.total);
}

#[tokio::test]
async fn search_is_case_insensitive_substring_match() {
    let svc = setup().await;
    let mut blr = fence("South Hub", &[1.0, 1.0]);
    blr.address.city = "BLR Layout".into();
    svc.create(blr).await.unwrap();
    let mut mum = fence("West Hub", &[2.0, 2.0]);
    mum.address.city = "Mumbai".into();
    mum.address.state = "Maharashtra".into();
    svc.create(mum).await.unwrap();

    // Substring of the city, different case.
    let result = svc.search(1, 10, "blr").await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name, "South Hub");

    // Interior substring also matches.
    let result = svc.search(1, 10, "umba").await.unwrap();
    assert_eq!(result.total, 1);
    assert_eq!(result.items[0].name, "West Hub");
}

// -----------------------------------------------------------------------
// Get / update / delete
// -----------------------------------------------------------------------

#[tokio::test]
async fn operations_on_unknown_id_fail_with_not_found() {
    let svc = setup().await;
    let ghost = Uuid::new_v4();

    assert!(matches!(
        svc.get(ghost).await,
        Err(PerimeterError::NotFound { .. })
    ));
    assert!(matches!(
        svc.update(
            ghost,
            UpdateGeofence {
                name: Some("Ghost".into()),
                ..Default::default()
            }
        )
        .await,
        Err(PerimeterError::NotFound { .. })
    ));
    assert!(matches!(
        svc.delete(ghost).await,
        Err(PerimeterError::NotFound { .. })
    ));
}

#[tokio::test]
async fn deleted_record_is_gone_for_good() {
    let svc = setup().await;
    let created = svc.create(fence("Warehouse A", &[12.9, 77.6])).await.unwrap();

    svc.delete(created.id).await.unwrap();

    assert!(matches!(
        svc.get(created.id).await,
        Err(PerimeterError::NotFound { .. })
    ));
    assert!(matches!(
        svc.delete(created.id).await,
        Err(PerimeterError::NotFound { .. })
    ));
}

#[tokio::test]
async fn update_preserves_id_and_authorship() {
    let svc = setup().await;
    let created = svc.create(fence("Warehouse A", &[12.9, 77.6])).await.unwrap();

    let updated = svc
        .update(
            created.id,
            UpdateGeofence {
                name: Some("Warehouse A1".into()),
                mobile_number: Some(9_000_000_000),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_by, created.created_by);
    assert_eq!(updated.created_at, created.created_at);
    assert_eq!(updated.name, "Warehouse A1");
    assert_eq!(updated.mobile_number, 9_000_000_000);
}

#[tokio::test]
async fn update_skips_duplicate_guard_for_coordinates() {
    let svc = setup().await;
    let a = svc.create(fence("Warehouse A", &[12.9, 77.6])).await.unwrap();
    let b = svc.create(fence("Warehouse B", &[1.0, 1.0])).await.unwrap();

    // The guard runs only at creation: editing B onto A's coordinates
    // is accepted.
    let updated = svc
        .update(
            b.id,
            UpdateGeofence {
                geo_code_data: Some(a.geo_code_data.clone()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(
        updated.geo_code_data.geometry.coordinates,
        a.geo_code_data.geometry.coordinates
    );
}

#[tokio::test]
async fn update_rename_collision_fails_on_store_index() {
    let svc = setup().await;
    svc.create(fence("Warehouse A", &[12.9, 77.6])).await.unwrap();
    let b = svc.create(fence("Warehouse B", &[1.0, 1.0])).await.unwrap();

    // No application-level re-check, but the unique name index still
    // rejects the colliding rename.
    let result = svc
        .update(
            b.id,
            UpdateGeofence {
                name: Some("Warehouse A".into()),
                ..Default::default()
            },
        )
        .await;
    assert!(matches!(result, Err(PerimeterError::Duplicate { .. })));
}
