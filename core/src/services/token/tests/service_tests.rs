//! Unit tests for token issuance and verification

use uuid::Uuid;

use crate::domain::entities::token::{TokenClaims, TOKEN_LIFETIME_SECS};
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::services::token::{extract_bearer_token, TokenService, TokenServiceConfig};

fn create_test_service() -> TokenService {
    TokenService::new(TokenServiceConfig::default()).expect("Failed to create token service")
}

fn assert_invalid(result: DomainResult<TokenClaims>) {
    assert!(matches!(
        result.unwrap_err(),
        DomainError::Token(TokenError::InvalidToken)
    ));
}

#[test]
fn test_issue_and_verify_round_trip() {
    let service = create_test_service();
    let subject = Uuid::new_v4();

    let token = service.issue(subject, "pastor@example.com", true).unwrap();
    let claims = service.verify(&token).unwrap();

    assert_eq!(claims.subject_id().unwrap(), subject);
    assert_eq!(claims.email, "pastor@example.com");
    assert!(claims.email_verified);
    assert_eq!(claims.lifetime(), TOKEN_LIFETIME_SECS);
}

#[test]
fn test_token_is_compact_and_url_safe() {
    let service = create_test_service();
    let token = service
        .issue(Uuid::new_v4(), "pastor@example.com", false)
        .unwrap();

    let segments: Vec<&str> = token.split('.').collect();
    assert_eq!(segments.len(), 3);
    assert!(segments.iter().all(|s| !s.is_empty()));
    assert!(!token.contains('+'));
    assert!(!token.contains('/'));
    assert!(!token.contains('='));
}

#[test]
fn test_issue_rejects_empty_email() {
    let service = create_test_service();
    let result = service.issue(Uuid::new_v4(), "", true);

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Validation { .. }
    ));
}

#[test]
fn test_tampering_any_segment_invalidates() {
    let service = create_test_service();
    let token = service
        .issue(Uuid::new_v4(), "pastor@example.com", true)
        .unwrap();

    let segments: Vec<&str> = token.split('.').collect();
    for i in 0..3 {
        let mut tampered: Vec<String> = segments.iter().map(|s| s.to_string()).collect();
        let replacement = if tampered[i].starts_with('A') { "B" } else { "A" };
        tampered[i] = format!("{}{}", replacement, &tampered[i][1..]);

        assert_invalid(service.verify(&tampered.join(".")));
    }
}

#[test]
fn test_expired_token_rejected_despite_valid_signature() {
    let service = create_test_service();
    let subject = Uuid::new_v4();
    let issued_at = 1_000_000_000;

    let token = service
        .issue_at(subject, "pastor@example.com", true, issued_at)
        .unwrap();

    // Valid right up to and including the expiry instant
    assert!(service
        .verify_at(&token, issued_at + TOKEN_LIFETIME_SECS)
        .is_ok());
    assert_invalid(service.verify_at(&token, issued_at + TOKEN_LIFETIME_SECS + 1));
}

#[test]
fn test_wrong_segment_count_rejected() {
    let service = create_test_service();

    assert_invalid(service.verify(""));
    assert_invalid(service.verify("only-one-segment"));
    assert_invalid(service.verify("two.segments"));
    assert_invalid(service.verify("a.b.c.d"));
    assert_invalid(service.verify(".."));
    assert_invalid(service.verify("a..c"));
}

#[test]
fn test_non_base64url_segment_rejected() {
    let service = create_test_service();
    let token = service
        .issue(Uuid::new_v4(), "pastor@example.com", true)
        .unwrap();

    let segments: Vec<&str> = token.split('.').collect();
    let bad_signature = format!("{}.{}.{}", segments[0], segments[1], "!!not-base64url!!");
    assert_invalid(service.verify(&bad_signature));

    let bad_payload = format!("{}.{}.{}", segments[0], "%%%", segments[2]);
    assert_invalid(service.verify(&bad_payload));
}

#[test]
fn test_signature_depends_on_payload() {
    let service = create_test_service();
    let subject = Uuid::new_v4();

    let first = service
        .issue_at(subject, "pastor@example.com", true, 1_000_000_000)
        .unwrap();
    let second = service
        .issue_at(subject, "pastor@example.com", true, 1_000_000_001)
        .unwrap();

    assert_ne!(first, second);

    let first_sig = first.split('.').nth(2).unwrap();
    let second_sig = second.split('.').nth(2).unwrap();
    assert_ne!(first_sig, second_sig);
}

#[test]
fn test_token_from_different_secret_rejected() {
    let issuer = TokenService::new(TokenServiceConfig {
        secret: "secret-one".to_string(),
        ..Default::default()
    })
    .unwrap();
    let verifier = TokenService::new(TokenServiceConfig {
        secret: "secret-two".to_string(),
        ..Default::default()
    })
    .unwrap();

    let token = issuer
        .issue(Uuid::new_v4(), "pastor@example.com", true)
        .unwrap();

    assert!(issuer.verify(&token).is_ok());
    assert_invalid(verifier.verify(&token));
}

#[test]
fn test_issuance_scenario_at_fixed_time() {
    let service = create_test_service();
    let subject = Uuid::new_v4();
    let issued_at = 1_000_000_000;

    let token = service
        .issue_at(subject, "a@b.com", true, issued_at)
        .unwrap();
    let claims = service.verify_at(&token, issued_at + 1).unwrap();

    assert_eq!(claims.subject_id().unwrap(), subject);
    assert_eq!(claims.email, "a@b.com");
    assert!(claims.email_verified);
    assert_eq!(claims.iat, 1_000_000_000);
    assert_eq!(claims.exp, 1_000_000_000 + 31_536_000);

    assert_invalid(service.verify_at(&token, claims.exp + 1));
}

#[test]
fn test_service_from_shared_config() {
    let config = pa_shared::config::TokenConfig::new("shared-config-secret").with_lifetime_days(7);
    let service = TokenService::new(config.into()).unwrap();

    let token = service
        .issue(Uuid::new_v4(), "pastor@example.com", false)
        .unwrap();
    let claims = service.verify(&token).unwrap();

    assert_eq!(claims.lifetime(), 7 * 86_400);
}

#[test]
fn test_non_positive_lifetime_rejected() {
    let result = TokenService::new(TokenServiceConfig {
        secret: "secret".to_string(),
        token_lifetime_secs: 0,
    });

    assert!(matches!(
        result.unwrap_err(),
        DomainError::Validation { .. }
    ));
}

#[test]
fn test_extract_bearer_token() {
    assert_eq!(extract_bearer_token("Bearer abc.def.ghi"), Some("abc.def.ghi"));
    assert_eq!(extract_bearer_token("Bearer   abc"), Some("abc"));
    assert_eq!(extract_bearer_token("abc.def.ghi"), None);
    assert_eq!(extract_bearer_token("Bearer "), None);
    assert_eq!(extract_bearer_token(""), None);
}
