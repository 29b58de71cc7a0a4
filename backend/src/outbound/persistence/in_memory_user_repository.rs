//! In-process credential store backed by a `tokio` read/write lock.
//!
//! Every mutation runs under a single write guard, which makes the
//! uniqueness check on insert and the read-modify-write of saved books
//! atomic with respect to concurrent requests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{Book, BookId, EmailAddress, User, UserId};

/// [`UserRepository`] keeping accounts in memory for the process lifetime.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    async fn update<F>(&self, id: &UserId, apply: F) -> Option<User>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.users.write().await;
        let user = users.get_mut(id)?;
        apply(user);
        Some(user.clone())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut users = self.users.write().await;
        if users.values().any(|other| other.username() == user.username()) {
            return Err(UserPersistenceError::duplicate_username(
                user.username().as_ref(),
            ));
        }
        if users.values().any(|other| other.email() == user.email()) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        if users.contains_key(user.id()) {
            return Err(UserPersistenceError::query(format!(
                "user id already present: {}",
                user.id()
            )));
        }
        users.insert(user.id().clone(), user.clone());
        debug!(user_id = %user.id(), total = users.len(), "user stored");
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let users = self.users.read().await;
        Ok(users.values().find(|user| user.email() == email).cloned())
    }

    async fn add_book(
        &self,
        id: &UserId,
        book: &Book,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .update(id, |user| {
                user.save_book(book.clone());
            })
            .await)
    }

    async fn remove_book(
        &self,
        id: &UserId,
        book_id: &BookId,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .update(id, |user| {
                user.remove_book(book_id);
            })
            .await)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use super::*;
    use crate::domain::{BookDetails, PasswordHash, Username};
    use rstest::{fixture, rstest};

    fn account(username: &str, email: &str) -> User {
        User::new(
            UserId::random(),
            Username::new(username).expect("username"),
            EmailAddress::new(email).expect("email"),
            PasswordHash::new("hash"),
        )
    }

    fn book(id: &str) -> Book {
        Book::new(
            BookId::new(id).expect("book id"),
            BookDetails {
                title: format!("Title {id}"),
                ..BookDetails::default()
            },
        )
    }

    #[fixture]
    fn alice() -> User {
        account("alice", "a@x.com")
    }

    #[rstest]
    #[tokio::test]
    async fn stored_users_are_found_by_id_and_email(alice: User) {
        let repo = InMemoryUserRepository::new();
        repo.insert(&alice).await.expect("insert");

        let by_id = repo.find_by_id(alice.id()).await.expect("lookup");
        let by_email = repo
            .find_by_email(&EmailAddress::new("A@X.COM").expect("email"))
            .await
            .expect("lookup");

        assert_eq!(by_id.as_ref(), Some(&alice));
        assert_eq!(by_email.as_ref(), Some(&alice));
    }

    #[rstest]
    #[case::username("alice", "other@x.com", "username")]
    #[case::email("bob", "a@x.com", "email")]
    #[tokio::test]
    async fn insert_rejects_taken_identifiers(
        alice: User,
        #[case] username: &str,
        #[case] email: &str,
        #[case] field: &str,
    ) {
        let repo = InMemoryUserRepository::new();
        repo.insert(&alice).await.expect("insert");

        let error = repo
            .insert(&account(username, email))
            .await
            .expect_err("duplicate must be rejected");
        let expected = match field {
            "username" => UserPersistenceError::duplicate_username(username),
            _ => UserPersistenceError::duplicate_email(email),
        };
        assert_eq!(error, expected);
    }

    #[rstest]
    #[tokio::test]
    async fn saving_the_same_book_twice_keeps_one_entry(alice: User) {
        let repo = InMemoryUserRepository::new();
        repo.insert(&alice).await.expect("insert");

        repo.add_book(alice.id(), &book("b1")).await.expect("add");
        let user = repo
            .add_book(alice.id(), &book("b1"))
            .await
            .expect("add")
            .expect("user exists");

        assert_eq!(user.book_count(), 1);
    }

    #[rstest]
    #[tokio::test]
    async fn removing_an_absent_book_is_a_no_op(alice: User) {
        let repo = InMemoryUserRepository::new();
        repo.insert(&alice).await.expect("insert");
        repo.add_book(alice.id(), &book("b1")).await.expect("add");

        let user = repo
            .remove_book(alice.id(), &BookId::new("b2").expect("book id"))
            .await
            .expect("remove")
            .expect("user exists");

        assert_eq!(user.book_count(), 1);
    }

    #[tokio::test]
    async fn book_updates_for_unknown_users_return_none() {
        let repo = InMemoryUserRepository::new();
        let missing = UserId::random();

        assert!(repo.add_book(&missing, &book("b1")).await.expect("add").is_none());
        assert!(
            repo.remove_book(&missing, &BookId::new("b1").expect("book id"))
                .await
                .expect("remove")
                .is_none()
        );
    }

    #[tokio::test]
    async fn concurrent_saves_of_distinct_books_are_all_kept() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let user = account("alice", "a@x.com");
        repo.insert(&user).await.expect("insert");

        let handles: Vec<_> = (0..16)
            .map(|n| {
                let repo = Arc::clone(&repo);
                let id = user.id().clone();
                tokio::spawn(async move { repo.add_book(&id, &book(&format!("b{n}"))).await })
            })
            .collect();
        for handle in handles {
            handle.await.expect("join").expect("add");
        }

        let stored = repo
            .find_by_id(user.id())
            .await
            .expect("lookup")
            .expect("user exists");
        assert_eq!(stored.book_count(), 16);
    }

    #[tokio::test]
    async fn concurrent_registrations_with_one_email_admit_exactly_one() {
        let repo = Arc::new(InMemoryUserRepository::new());

        let handles: Vec<_> = (0..8)
            .map(|n| {
                let repo = Arc::clone(&repo);
                let user = account(&format!("user{n}"), "same@x.com");
                tokio::spawn(async move { repo.insert(&user).await })
            })
            .collect();
        let mut admitted = 0;
        for handle in handles {
            if handle.await.expect("join").is_ok() {
                admitted += 1;
            }
        }

        assert_eq!(admitted, 1);
    }
}
