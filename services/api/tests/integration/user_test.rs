use foodgram_api::domain::repository::UserRepository;
use foodgram_api::domain::types::{NewUser, User};
use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::auth::{LoginInput, LoginUseCase, verify_password};
use foodgram_api::usecase::user::{
    GetUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase, SetPasswordInput,
    SetPasswordUseCase,
};
use foodgram_domain::pagination::{Page, PageRequest};
use foodgram_testing::auth::test_keys;

use crate::helpers::{MemoryDb, MockUserRepo, NO_PASSWORD, with_password};

fn registration(email: &str, username: &str) -> RegisterUserInput {
    RegisterUserInput {
        email: email.into(),
        username: username.into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        password: "analytical-engine".into(),
    }
}

/// Lookups miss rows committed by a concurrent registration; the insert does not.
struct StaleLookups(MockUserRepo);

impl UserRepository for StaleLookups {
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, FoodgramError> {
        self.0.find_by_id(id).await
    }

    async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<User>, FoodgramError> {
        self.0.find_by_ids(ids).await
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, FoodgramError> {
        Ok(None)
    }

    async fn find_by_username(&self, _username: &str) -> Result<Option<User>, FoodgramError> {
        Ok(None)
    }

    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError> {
        self.0.create(user).await
    }

    async fn list(&self, page: PageRequest) -> Result<Page<User>, FoodgramError> {
        self.0.list(page).await
    }

    async fn update_password(&self, id: i32, password_hash: &str) -> Result<(), FoodgramError> {
        self.0.update_password(id, password_hash).await
    }
}

// ── RegisterUserUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_user_with_normalized_email_and_hashed_password() {
    let db = MemoryDb::new();
    let uc = RegisterUserUseCase { users: db.users() };

    let user = uc
        .execute(registration("  Ada@Example.COM ", "ada"))
        .await
        .unwrap();
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.username, "ada");
    assert!(!user.is_staff);
    assert!(verify_password("analytical-engine", &user.password_hash));
    assert_eq!(db.lock().users.len(), 1);
}

#[tokio::test]
async fn should_reject_registration_that_loses_insert_race() {
    let db = MemoryDb::new();
    db.add_user(1, "ada");
    let uc = RegisterUserUseCase {
        users: StaleLookups(db.users()),
    };

    let err = uc
        .execute(registration("ada@example.com", "countess"))
        .await
        .unwrap_err();
    let FoodgramError::Validation(fields) = err else {
        panic!("expected Validation, got {err:?}");
    };
    assert!(fields.contains("email"));
    assert!(!fields.contains("username"));
    assert_eq!(db.lock().users.len(), 1);
}

#[tokio::test]
async fn should_reject_taken_email_and_username() {
    let db = MemoryDb::new();
    db.add_user(1, "ada");
    let uc = RegisterUserUseCase { users: db.users() };

    let err = uc
        .execute(registration("ADA@example.com", "ada"))
        .await
        .unwrap_err();
    let FoodgramError::Validation(fields) = err else {
        panic!("expected Validation, got {err:?}");
    };
    assert_eq!(
        fields.get("email").unwrap(),
        ["a user with that email already exists"]
    );
    assert_eq!(
        fields.get("username").unwrap(),
        ["a user with that username already exists"]
    );
    assert_eq!(db.lock().users.len(), 1);
}

#[tokio::test]
async fn should_reject_reserved_username_bad_email_and_empty_fields() {
    let db = MemoryDb::new();
    let uc = RegisterUserUseCase { users: db.users() };
    let input = RegisterUserInput {
        email: "not-an-email".into(),
        username: "me".into(),
        first_name: " ".into(),
        last_name: "x".repeat(151),
        password: String::new(),
    };

    let err = uc.execute(input).await.unwrap_err();
    let FoodgramError::Validation(fields) = err else {
        panic!("expected Validation, got {err:?}");
    };
    for field in ["email", "username", "first_name", "last_name", "password"] {
        assert!(fields.contains(field), "missing error for {field}");
    }
    assert!(db.lock().users.is_empty());
}

// ── LoginUseCase ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_issue_token_for_valid_credentials() {
    let db = MemoryDb::new();
    db.add_user(7, "ada");
    with_password(&db, 7, "analytical-engine");
    let uc = LoginUseCase {
        users: db.users(),
        tokens: test_keys(),
    };

    let issued = uc
        .execute(LoginInput {
            email: "ADA@example.com".into(),
            password: "analytical-engine".into(),
        })
        .await
        .unwrap();
    let info = test_keys().validate(&issued.token).unwrap();
    assert_eq!(info.user_id, 7);
    assert!(!info.is_staff);

    let err = uc
        .execute(LoginInput {
            email: "ada@example.com".into(),
            password: "difference-engine".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FoodgramError::InvalidCredentials), "got {err:?}");
}

#[tokio::test]
async fn should_reject_login_for_unknown_email() {
    let db = MemoryDb::new();
    let uc = LoginUseCase {
        users: db.users(),
        tokens: test_keys(),
    };
    let err = uc
        .execute(LoginInput {
            email: "nobody@example.com".into(),
            password: "whatever".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, FoodgramError::InvalidCredentials), "got {err:?}");
}

// ── SetPasswordUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_change_password_after_checking_current_one() {
    let db = MemoryDb::new();
    db.add_user(7, "ada");
    with_password(&db, 7, "old-pass");
    let uc = SetPasswordUseCase { users: db.users() };

    let err = uc
        .execute(
            7,
            SetPasswordInput {
                current_password: "wrong".into(),
                new_password: "new-pass".into(),
            },
        )
        .await
        .unwrap_err();
    let FoodgramError::Validation(fields) = err else {
        panic!("expected Validation, got {err:?}");
    };
    assert!(fields.contains("current_password"));

    uc.execute(
        7,
        SetPasswordInput {
            current_password: "old-pass".into(),
            new_password: "new-pass".into(),
        },
    )
    .await
    .unwrap();
    let hash = db.lock().users[0].password_hash.clone();
    assert!(verify_password("new-pass", &hash));
    assert!(!verify_password("old-pass", &hash));
}

#[tokio::test]
async fn should_reject_empty_new_password() {
    let db = MemoryDb::new();
    db.add_user(7, "ada");
    let uc = SetPasswordUseCase { users: db.users() };

    let err = uc
        .execute(
            7,
            SetPasswordInput {
                current_password: "anything".into(),
                new_password: String::new(),
            },
        )
        .await
        .unwrap_err();
    let FoodgramError::Validation(fields) = err else {
        panic!("expected Validation, got {err:?}");
    };
    assert!(fields.contains("new_password"));
    assert_eq!(db.lock().users[0].password_hash, NO_PASSWORD);
}

// ── GetUserUseCase / ListUsersUseCase ────────────────────────────────────────

#[tokio::test]
async fn should_resolve_is_subscribed_for_caller() {
    let db = MemoryDb::new();
    db.add_user(1, "reader");
    db.add_user(2, "chef");
    db.follow(1, 2);
    let uc = GetUserUseCase {
        users: db.users(),
        subscriptions: db.subscriptions(),
    };

    assert!(uc.execute(Some(1), 2).await.unwrap().is_subscribed);
    assert!(!uc.execute(Some(3), 2).await.unwrap().is_subscribed);
    assert!(!uc.execute(None, 2).await.unwrap().is_subscribed);

    let err = uc.execute(None, 4242).await.unwrap_err();
    assert!(matches!(err, FoodgramError::UserNotFound), "got {err:?}");
}

#[tokio::test]
async fn should_page_users_by_id() {
    let db = MemoryDb::new();
    for (id, name) in [(3, "carol"), (1, "alice"), (2, "bob")] {
        db.add_user(id, name);
    }
    db.follow(1, 3);
    let uc = ListUsersUseCase {
        users: db.users(),
        subscriptions: db.subscriptions(),
    };

    let page = uc
        .execute(Some(1), PageRequest::new(Some(2), Some(2)))
        .await
        .unwrap();
    assert_eq!(page.count, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.items[0].user.username, "carol");
    assert!(page.items[0].is_subscribed);
}
