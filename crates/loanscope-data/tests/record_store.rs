//! Record store behaviour against the shared population fixture.

use loanscope_common::{Gender, LoanscopeError};
use loanscope_data::{Frame, RecordStore};
use loanscope_test_utils::{fixture, REFERENCE_APPLICANT, SESSION};
use pretty_assertions::assert_eq;

#[tokio::test]
async fn test_select_then_current_returns_same_applicant() {
    let fx = fixture();
    let population = Frame::load(&fx.population).await.unwrap();
    let store = RecordStore::open(&fx.records, &population).await.unwrap();

    for id in population.ids().to_vec() {
        let selected = store.select(SESSION, &population, id).await.unwrap();
        let current = store.current(SESSION).await.unwrap();
        assert_eq!(current.applicant_id, id);
        assert_eq!(current, selected);
        assert_eq!(population.ids()[current.row_index], id);
    }
}

#[tokio::test]
async fn test_reference_applicant_is_forty_year_old_male() {
    let fx = fixture();
    let population = Frame::load(&fx.population).await.unwrap();
    let store = RecordStore::open(&fx.records, &population).await.unwrap();

    let client = store.select(SESSION, &population, REFERENCE_APPLICANT).await.unwrap();
    assert_eq!(client.age, 40);
    assert_eq!(client.gender, Gender::Male);
    assert_eq!(client.row_index, 0);
}

#[tokio::test]
async fn test_selection_overwrites_and_survives_reopen() {
    let fx = fixture();
    let population = Frame::load(&fx.population).await.unwrap();

    {
        let store = RecordStore::open(&fx.records, &population).await.unwrap();
        store.select(SESSION, &population, 100002).await.unwrap();
        store.select(SESSION, &population, 100007).await.unwrap();
    }

    let content = std::fs::read_to_string(&fx.records).unwrap();
    assert_eq!(content.lines().count(), 2, "header plus exactly one record");

    let reopened = RecordStore::open(&fx.records, &population).await.unwrap();
    let current = reopened.current(SESSION).await.unwrap();
    assert_eq!(current.applicant_id, 100007);
    assert_eq!(current.gender, Gender::Female);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let fx = fixture();
    let population = Frame::load(&fx.population).await.unwrap();
    let store = RecordStore::open(&fx.records, &population).await.unwrap();

    store.select("officer-a", &population, 100003).await.unwrap();
    store.select("officer-b", &population, 100008).await.unwrap();

    assert_eq!(store.current("officer-a").await.unwrap().applicant_id, 100003);
    assert_eq!(store.current("officer-b").await.unwrap().applicant_id, 100008);
    assert!(matches!(
        store.current("officer-c").await,
        Err(LoanscopeError::UninitializedState)
    ));
}

#[tokio::test]
async fn test_reopen_realigns_rows_with_a_changed_population() {
    let fx = fixture();
    std::fs::write(
        &fx.records,
        "session,applicant_id,row_index,age,gender\n\
default,100002,5,24,Femme\n\
gone,100099,0,30,Homme\n",
    )
    .unwrap();
    let population = Frame::from_reader(
        "SK_ID_CURR,DAYS_BIRTH,CODE_GENDER\n100001,-14600,0\n100002,-16765,1\n".as_bytes(),
    )
    .unwrap();

    let store = RecordStore::open(&fx.records, &population).await.unwrap();
    let current = store.current(SESSION).await.unwrap();
    assert_eq!(current.applicant_id, 100002);
    assert_eq!(Some(current.row_index), population.row_of(100002).ok());
    assert_eq!(current.age, 45);

    // the vanished applicant no longer counts as a selection
    assert!(matches!(store.current("gone").await, Err(LoanscopeError::UninitializedState)));

    let content = std::fs::read_to_string(&fx.records).unwrap();
    assert_eq!(content.lines().count(), 2);
    assert!(content.contains("default,100002,1,45,Femme"));
}
