//! PostgreSQL-backed `UserRepository` implementation.
//!
//! Reconciliation runs in one transaction: lock the subject's row if it
//! exists, then either insert it or rewrite the cached claim fields. A unique
//! violation on insert means a concurrent request created the row first and
//! surfaces as [`UserPersistenceError::DuplicateSubject`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{Reconciliation, UserPersistenceError, UserRepository};
use crate::domain::{IdentityClaim, LocalUser, ProfileUpdate, SubjectId};

use super::diesel_helpers::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserClaimChangeset, UserProfileChangeset, UserRow};
use super::pool::DbPool;
use super::schema::users;

#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_user(row: UserRow) -> Result<LocalUser, UserPersistenceError> {
    let subject_id = SubjectId::new(row.subject_id)
        .map_err(|err| UserPersistenceError::query(format!("stored subject id invalid: {err}")))?;
    Ok(LocalUser {
        subject_id,
        email: row.email,
        display_name: row.display_name,
        avatar_url: row.avatar_url,
        created_at: row.created_at,
    })
}

/// Build a user from a row already known to belong to `subject_id`.
fn row_for_subject(subject_id: &SubjectId, row: UserRow) -> LocalUser {
    LocalUser {
        subject_id: subject_id.clone(),
        email: row.email,
        display_name: row.display_name,
        avatar_url: row.avatar_url,
        created_at: row.created_at,
    }
}

fn map_reconcile_error(subject_id: &SubjectId, error: DieselError) -> UserPersistenceError {
    if is_unique_violation(&error) {
        UserPersistenceError::duplicate_subject(subject_id.as_ref())
    } else {
        map_diesel_error(error)
    }
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn reconcile(&self, claim: &IdentityClaim) -> Result<Reconciliation, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let subject_id = &claim.subject_id;

        conn.transaction::<_, DieselError, _>(|conn| {
            async move {
                let existing: Option<UserRow> = users::table
                    .find(subject_id.as_ref())
                    .select(UserRow::as_select())
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;

                let Some(row) = existing else {
                    let created: UserRow = diesel::insert_into(users::table)
                        .values(&NewUserRow {
                            subject_id: subject_id.as_ref(),
                            email: claim.email.as_deref(),
                            display_name: claim.display_name.as_deref(),
                            avatar_url: claim.avatar_url.as_deref(),
                        })
                        .returning(UserRow::as_returning())
                        .get_result(conn)
                        .await?;
                    return Ok(Reconciliation::Created(row_for_subject(subject_id, created)));
                };

                let mut user = row_for_subject(subject_id, row);
                if !user.apply_claim(claim) {
                    return Ok(Reconciliation::Unchanged(user));
                }

                diesel::update(users::table.find(subject_id.as_ref()))
                    .set(&UserClaimChangeset {
                        email: user.email.as_deref(),
                        display_name: user.display_name.as_deref(),
                        avatar_url: user.avatar_url.as_deref(),
                    })
                    .execute(conn)
                    .await?;
                Ok(Reconciliation::Updated(user))
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| map_reconcile_error(subject_id, err))
    }

    async fn find_by_subject(
        &self,
        subject_id: &SubjectId,
    ) -> Result<Option<LocalUser>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: Option<UserRow> = users::table
            .find(subject_id.as_ref())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_user).transpose()
    }

    async fn update_profile(
        &self,
        subject_id: &SubjectId,
        update: &ProfileUpdate,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        if update.is_empty() {
            let exists = diesel::select(diesel::dsl::exists(
                users::table.find(subject_id.as_ref()),
            ))
            .get_result::<bool>(&mut conn)
            .await
            .map_err(map_diesel_error)?;
            return Ok(exists);
        }

        let updated = diesel::update(users::table.find(subject_id.as_ref()))
            .set(&UserProfileChangeset {
                display_name: update.display_name(),
                avatar_url: update.avatar_url(),
            })
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(updated > 0)
    }
}
