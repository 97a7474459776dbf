use application::{QueryService, TimeWindow};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use domain::{
    Container, ContainerRepository, Direction, DomainError, Measured, WeighingRecord,
    WeighingRepository,
};
use mockall::mock;
use std::sync::Arc;

mock! {
    pub Records {}

    #[async_trait]
    impl WeighingRepository for Records {
        async fn find_in_range(
            &self,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
            directions: &[Direction],
        ) -> Result<Vec<WeighingRecord>, DomainError>;
        async fn find_by_session(&self, session_id: i64) -> Result<Vec<WeighingRecord>, DomainError>;
        async fn find_by_truck_in_range(
            &self,
            truck: &str,
            from: DateTime<Utc>,
            to: DateTime<Utc>,
        ) -> Result<Vec<WeighingRecord>, DomainError>;
        async fn find_all(&self) -> Result<Vec<WeighingRecord>, DomainError>;
    }
}

mock! {
    pub Registry {}

    #[async_trait]
    impl ContainerRepository for Registry {
        async fn find_by_id(&self, id: &str) -> Result<Option<Container>, DomainError>;
        async fn find_many(&self, ids: &[String]) -> Result<Vec<Container>, DomainError>;
        async fn find_all(&self) -> Result<Vec<Container>, DomainError>;
    }
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 18, hour, minute, 0).unwrap()
}

fn window() -> TimeWindow {
    TimeWindow::new(at(0, 0), at(23, 59))
}

fn ids(containers: &[&str]) -> Vec<String> {
    containers.iter().map(|c| c.to_string()).collect()
}

fn opened(truck: &str, containers: &[&str], hour: u32) -> WeighingRecord {
    WeighingRecord::open(
        at(hour, 0).timestamp(),
        truck.to_string(),
        ids(containers),
        18_000,
        "orange".into(),
        at(hour, 0),
    )
}

fn closed(open: &WeighingRecord, tara: i64, neto: Measured) -> WeighingRecord {
    let ts = open.timestamp + chrono::Duration::minutes(30);
    WeighingRecord::close(ts.timestamp(), open, tara, neto, ts)
}

fn service(records: MockRecords, registry: MockRegistry) -> QueryService {
    QueryService::new(Arc::new(records), Arc::new(registry))
}

#[tokio::test]
async fn test_list_transactions_passes_filter() {
    let first = opened("AB-100", &["C1"], 8);
    let out = closed(&first, 8_000, Measured::Known(9_500));

    let mut records = MockRecords::new();
    records
        .expect_find_in_range()
        .withf(|_, _, directions| directions.to_vec() == vec![Direction::Out])
        .times(1)
        .returning(move |_, _, _| Ok(vec![out.clone()]));

    let views = service(records, MockRegistry::new())
        .list_transactions(window(), &[Direction::Out])
        .await
        .unwrap();

    assert_eq!(views.len(), 1);
    assert_eq!(views[0].direction, Direction::Out);
    assert_eq!(views[0].bruto, 18_000);
    assert_eq!(views[0].neto, Measured::Known(9_500));
    assert_eq!(views[0].produce, "orange");
}

#[tokio::test]
async fn test_open_leg_lists_neto_as_na() {
    let first = opened("AB-100", &["C1"], 8);

    let mut records = MockRecords::new();
    records
        .expect_find_in_range()
        .returning(move |_, _, _| Ok(vec![first.clone()]));

    let views = service(records, MockRegistry::new())
        .list_transactions(window(), &Direction::ALL)
        .await
        .unwrap();
    assert_eq!(views[0].neto, Measured::Unknown);
}

#[tokio::test]
async fn test_session_prefers_out_leg() {
    let first = opened("AB-100", &["C1"], 8);
    let out = closed(&first, 8_000, Measured::Known(9_500));
    let session_id = first.id;

    let mut records = MockRecords::new();
    let legs = vec![first.clone(), out.clone()];
    records
        .expect_find_by_session()
        .withf(move |id| *id == session_id)
        .returning(move |_| Ok(legs.clone()));

    let view = service(records, MockRegistry::new())
        .session(session_id)
        .await
        .unwrap();
    assert_eq!(view.id, out.id);
    assert_eq!(view.session_id, session_id);
    assert_eq!(view.truck_tara, Some(8_000));
    assert_eq!(view.neto, Some(Measured::Known(9_500)));
}

#[tokio::test]
async fn test_open_session_returns_in_leg() {
    let first = opened("AB-100", &["C1"], 8);
    let id = first.id;

    let mut records = MockRecords::new();
    records
        .expect_find_by_session()
        .returning(move |_| Ok(vec![first.clone()]));

    let view = service(records, MockRegistry::new()).session(id).await.unwrap();
    assert_eq!(view.id, id);
    assert_eq!(view.direction, Direction::In);
    assert_eq!(view.neto, None);
}

#[tokio::test]
async fn test_missing_session() {
    let mut records = MockRecords::new();
    records.expect_find_by_session().returning(|_| Ok(vec![]));

    let err = service(records, MockRegistry::new())
        .session(42)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn test_item_as_truck() {
    let morning = opened("AB-100", &["C1"], 8);
    let morning_out = closed(&morning, 8_000, Measured::Known(9_500));
    let noon = opened("AB-100", &["C2"], 12);
    let noon_out = closed(&noon, 8_100, Measured::Known(9_600));
    let history = vec![morning.clone(), morning_out, noon.clone(), noon_out];

    let mut records = MockRecords::new();
    records
        .expect_find_by_truck_in_range()
        .withf(|truck, _, _| truck.to_string() == "AB-100")
        .returning(move |_, _, _| Ok(history.clone()));
    records.expect_find_in_range().never();

    let item = service(records, MockRegistry::new())
        .item("AB-100", window())
        .await
        .unwrap();
    assert_eq!(item.id, "AB-100");
    assert_eq!(item.tara, Measured::Known(8_100));
    assert_eq!(item.sessions, vec![morning.id, noon.id]);
}

#[tokio::test]
async fn test_item_truck_without_out_has_unknown_tara() {
    let morning = opened("AB-100", &[], 8);

    let mut records = MockRecords::new();
    records
        .expect_find_by_truck_in_range()
        .returning(move |_, _, _| Ok(vec![morning.clone()]));

    let item = service(records, MockRegistry::new())
        .item("AB-100", window())
        .await
        .unwrap();
    assert_eq!(item.tara, Measured::Unknown);
}

#[tokio::test]
async fn test_item_as_container() {
    let first = opened("AB-100", &["C1", "C2"], 8);
    let second = opened("CD-200", &["C2"], 10);
    let other = opened("EF-300", &["C3"], 11);
    let all = vec![first.clone(), second.clone(), other];

    let mut records = MockRecords::new();
    records
        .expect_find_by_truck_in_range()
        .returning(|_, _, _| Ok(vec![]));
    records
        .expect_find_in_range()
        .returning(move |_, _, _| Ok(all.clone()));

    let mut registry = MockRegistry::new();
    registry
        .expect_find_by_id()
        .withf(|id| id.to_string() == "C2")
        .returning(|_| Ok(Some(Container::new("C2", Some(661), Some("lb".into())))));

    let item = service(records, registry).item("C2", window()).await.unwrap();
    assert_eq!(item.tara, Measured::Known(299));
    assert_eq!(item.sessions, vec![first.id, second.id]);
}

#[tokio::test]
async fn test_item_unknown_everywhere() {
    let mut records = MockRecords::new();
    records
        .expect_find_by_truck_in_range()
        .returning(|_, _, _| Ok(vec![]));
    records.expect_find_in_range().returning(|_, _, _| Ok(vec![]));

    let err = service(records, MockRegistry::new())
        .item("ZZ-999", window())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound(_)));
}

#[tokio::test]
async fn test_unknown_containers() {
    let first = opened("AB-100", &["C1", "C2"], 8);
    let second = opened("CD-200", &["C3", "C1"], 10);
    let standalone = WeighingRecord::standalone(
        at(11, 0).timestamp(),
        "C5".into(),
        900,
        Measured::Unknown,
        "na".into(),
        at(11, 0),
    );
    let all = vec![first, second, standalone];

    let mut records = MockRecords::new();
    records.expect_find_all().returning(move || Ok(all.clone()));

    let mut registry = MockRegistry::new();
    registry
        .expect_find_many()
        .withf(|ids| ids.to_vec() == ["C1", "C2", "C3", "C5"])
        .returning(|_| {
            Ok(vec![
                Container::new("C1", Some(500), Some("kg".into())),
                Container::new("C2", None, Some("kg".into())),
                Container::new("C3", Some(0), Some("kg".into())),
            ])
        });

    let unknown = service(records, registry).unknown_containers().await.unwrap();
    assert_eq!(unknown, vec!["C2".to_string(), "C3".into(), "C5".into()]);
}

#[tokio::test]
async fn test_store_errors_propagate() {
    let mut records = MockRecords::new();
    records
        .expect_find_in_range()
        .returning(|_, _, _| Err(DomainError::StoreUnavailable("pool timed out".into())));

    let err = service(records, MockRegistry::new())
        .list_transactions(window(), &Direction::ALL)
        .await
        .unwrap_err();
    assert!(err.is_retryable());
}
