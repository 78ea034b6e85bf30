//! Unit tests for the in-memory OTP repository

use chrono::{Duration, Utc};

use crate::domain::entities::otp::{NewOtpRecord, OtpPurpose};
use crate::repositories::otp::{InMemoryOtpRepository, OtpRepository};

fn new_record(target: &str, purpose: OtpPurpose, code: &str) -> NewOtpRecord {
    NewOtpRecord::new(target, purpose, code, Duration::minutes(5))
}

#[tokio::test]
async fn test_issue_assigns_increasing_ids() {
    let repo = InMemoryOtpRepository::new();

    let first = repo.issue(new_record("a@x.com", OtpPurpose::VerifyEmail, "111111")).await.unwrap();
    let second = repo.issue(new_record("b@x.com", OtpPurpose::VerifyEmail, "222222")).await.unwrap();

    assert!(second.id > first.id);
    assert!(!first.is_verified);
    assert_eq!(repo.len().await, 2);
}

#[tokio::test]
async fn test_issue_supersedes_pending_records_for_same_pair_only() {
    let repo = InMemoryOtpRepository::new();

    let old = repo.issue(new_record("a@x.com", OtpPurpose::VerifyEmail, "111111")).await.unwrap();
    let other_purpose = repo.issue(new_record("a@x.com", OtpPurpose::ResetPassword, "333333")).await.unwrap();
    let new = repo.issue(new_record("a@x.com", OtpPurpose::VerifyEmail, "222222")).await.unwrap();

    let old = repo.find_by_id(old.id).await.unwrap().unwrap();
    assert!(old.is_verified);
    assert!(old.is_superseded());

    let other_purpose = repo.find_by_id(other_purpose.id).await.unwrap().unwrap();
    assert!(other_purpose.is_pending());

    let pending = repo.find_latest_pending("a@x.com", OtpPurpose::VerifyEmail).await.unwrap().unwrap();
    assert_eq!(pending.id, new.id);
}

#[tokio::test]
async fn test_latest_follows_insertion_order_not_timestamps() {
    let repo = InMemoryOtpRepository::new();
    let now = Utc::now();

    // Stamped later but stored first, as when a slower issuer commits last
    let mut early_commit = new_record("a@x.com", OtpPurpose::VerifyEmail, "222222");
    early_commit.created_at = now + Duration::milliseconds(5);
    let mut late_commit = new_record("a@x.com", OtpPurpose::VerifyEmail, "111111");
    late_commit.created_at = now;

    let early_commit = repo.issue(early_commit).await.unwrap();
    let late_commit = repo.issue(late_commit).await.unwrap();

    let latest = repo.find_latest("a@x.com", OtpPurpose::VerifyEmail).await.unwrap().unwrap();
    assert_eq!(latest.id, late_commit.id);
    let pending = repo.find_latest_pending("a@x.com", OtpPurpose::VerifyEmail).await.unwrap().unwrap();
    assert_eq!(pending.id, late_commit.id);

    let all = repo.find_all("a@x.com", OtpPurpose::VerifyEmail).await.unwrap();
    assert_eq!(all.iter().map(|r| r.id).collect::<Vec<_>>(), vec![late_commit.id, early_commit.id]);
    assert!(all[1].is_superseded());
}

#[tokio::test]
async fn test_mark_verified_is_conditional() {
    let repo = InMemoryOtpRepository::new();
    let record = repo.issue(new_record("a@x.com", OtpPurpose::VerifyEmail, "111111")).await.unwrap();

    assert!(repo.mark_verified(record.id, "token-1").await.unwrap());
    assert!(!repo.mark_verified(record.id, "token-2").await.unwrap());

    let stored = repo.find_by_id(record.id).await.unwrap().unwrap();
    assert_eq!(stored.verify_token.as_deref(), Some("token-1"));
    assert!(repo.find_latest_pending("a@x.com", OtpPurpose::VerifyEmail).await.unwrap().is_none());
}

#[tokio::test]
async fn test_consume_verify_token_is_conditional() {
    let repo = InMemoryOtpRepository::new();
    let record = repo.issue(new_record("a@x.com", OtpPurpose::VerifyEmail, "111111")).await.unwrap();
    repo.mark_verified(record.id, "token").await.unwrap();

    assert!(repo.consume_verify_token(record.id, Utc::now()).await.unwrap());
    assert!(!repo.consume_verify_token(record.id, Utc::now()).await.unwrap());
}

#[tokio::test]
async fn test_unavailable_store_fails_every_call() {
    let repo = InMemoryOtpRepository::new();
    repo.set_unavailable(true);

    assert!(repo.issue(new_record("a@x.com", OtpPurpose::VerifyEmail, "111111")).await.is_err());
    assert!(repo.find_latest("a@x.com", OtpPurpose::VerifyEmail).await.is_err());

    repo.set_unavailable(false);
    assert!(repo.find_latest("a@x.com", OtpPurpose::VerifyEmail).await.unwrap().is_none());
}
